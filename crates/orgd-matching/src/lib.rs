//! orgd Matching
//!
//! Scores personnel against vacant org-chart positions.
//!
//! # Overview
//!
//! - [`vacancy`]: resolve a node's roles and personnel, derive vacancy and required skills
//! - [`scoring`]: additive point score for one candidate ([`MatchWeights`])
//! - [`engine`]: candidate pool, potential-match count, sorted suggestions
//! - [`cache`]: memoized potential-match counts keyed on collection revision
//! - [`competency`]: role-to-competency match score and gap list
//!
//! Every function here is total: missing references, empty lists and empty
//! skill sets produce zero scores or empty results, never errors.
//!
//! # Example
//!
//! ```rust
//! use orgd_matching::compute_matches;
//! use orgd_model::{AvailabilityStatus, ExperienceTier, Node, NodeId, Person, PersonId, Role, RoleId};
//!
//! let roles = vec![Role::new(RoleId::from("r1"), "Line Manager").with_skills(["lean"])];
//! let personnel = vec![Person::new(PersonId::from("p1"), "Ada")
//!     .with_skills(["lean"])
//!     .with_experience(ExperienceTier::Senior)
//!     .with_availability(AvailabilityStatus::Available)];
//! let node = Node::new(NodeId::from("n1"), "Line 1").with_roles([RoleId::from("r1")]);
//!
//! let result = compute_matches(&node, &roles, &personnel);
//! assert!(result.has_vacancy);
//! assert_eq!(result.potential_match_count, 1);
//! // 20 (skill) + 30 (leadership) + 20 (senior) + 15 (available)
//! assert_eq!(result.matched_personnel[0].match_score(), 85);
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod competency;
pub mod engine;
pub mod scoring;
pub mod vacancy;

// Re-exports
pub use cache::{CacheStats, MatchCountCache};
pub use competency::{score_competencies, CompetencyGap, CompetencyMatch};
pub use engine::{compute_matches, potential_match_count, MatchEngine, MatchResult, MatchedPerson};
pub use scoring::{requires_leadership, score_candidate, CandidateScore, MatchWeights, LEADERSHIP_KEYWORDS};
pub use vacancy::{assigned_personnel, assigned_roles, has_vacancy, required_skills, NodeAssignment};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for matching
    pub use crate::{
        compute_matches, score_competencies, MatchEngine, MatchResult, MatchWeights,
        MatchedPerson, NodeAssignment,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
