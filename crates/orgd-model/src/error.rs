//! Error types for the org model

/// Errors raised while constructing or parsing model values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Label does not name a known experience tier
    #[error("unknown experience tier: '{0}'")]
    UnknownExperienceTier(String),

    /// Label does not name a known availability state
    #[error("unknown availability status: '{0}'")]
    UnknownAvailability(String),

    /// Label does not name a phase
    #[error("unknown phase: '{0}' (expected 'current' or 'future')")]
    UnknownPhase(String),

    /// Label does not name a transition status
    #[error("unknown transition status: '{0}'")]
    UnknownTransitionStatus(String),

    /// Competency level outside the proficiency scale
    #[error("competency level {level} out of range (expected {min}..={max})")]
    LevelOutOfRange {
        /// Offending level
        level: u8,
        /// Lowest accepted level
        min: u8,
        /// Highest accepted level
        max: u8,
    },

    /// Requirement weight is negative or not finite
    #[error("invalid competency weight: {0}")]
    InvalidWeight(f64),
}
