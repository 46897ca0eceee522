//! Closed enums for the org model
//!
//! Experience and availability arrive from user-entered data as free-form
//! labels. They are parsed leniently into closed enums: an unknown label is
//! kept verbatim in an `Other` variant and written back unchanged, and a
//! missing or non-string value lands in a catch-all instead of failing the
//! whole import.

use crate::error::ModelError;
use crate::serde_helpers::lenient_label;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Normalize a label for comparison: trimmed, lowercase, `-`/`_` as spaces
fn normalize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Experience tier of a person
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ExperienceTier {
    /// Entry Level
    EntryLevel,
    /// Junior
    Junior,
    /// Mid-Level
    MidLevel,
    /// Senior
    Senior,
    /// Lead
    Lead,
    /// Management
    Management,
    /// Label that names no known tier, kept as written
    Other(String),
    /// Missing or not a label at all
    #[default]
    Unrecognized,
}

impl ExperienceTier {
    /// All recognized tiers, most junior first
    pub const ALL: [ExperienceTier; 6] = [
        ExperienceTier::EntryLevel,
        ExperienceTier::Junior,
        ExperienceTier::MidLevel,
        ExperienceTier::Senior,
        ExperienceTier::Lead,
        ExperienceTier::Management,
    ];

    /// Display label, as used on the wire
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ExperienceTier::EntryLevel => "Entry Level",
            ExperienceTier::Junior => "Junior",
            ExperienceTier::MidLevel => "Mid-Level",
            ExperienceTier::Senior => "Senior",
            ExperienceTier::Lead => "Lead",
            ExperienceTier::Management => "Management",
            ExperienceTier::Other(label) => label.as_str(),
            ExperienceTier::Unrecognized => "Unrecognized",
        }
    }

    /// Base points this tier contributes to a match score
    #[inline]
    #[must_use]
    pub fn base_score(&self) -> u32 {
        match self {
            ExperienceTier::EntryLevel => 5,
            ExperienceTier::Junior => 10,
            ExperienceTier::MidLevel => 15,
            ExperienceTier::Senior => 20,
            ExperienceTier::Lead => 25,
            ExperienceTier::Management => 30,
            ExperienceTier::Other(_) | ExperienceTier::Unrecognized => 0,
        }
    }

    /// Tiers that qualify for the leadership bonus
    #[inline]
    #[must_use]
    pub fn qualifies_for_leadership(&self) -> bool {
        matches!(
            self,
            ExperienceTier::Lead | ExperienceTier::Management | ExperienceTier::Senior
        )
    }

    /// Parse a label, keeping anything unknown as [`ExperienceTier::Other`]
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label
            .parse()
            .unwrap_or_else(|_| ExperienceTier::Other(label.to_string()))
    }
}

impl FromStr for ExperienceTier {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "entry level" | "entry" => Ok(ExperienceTier::EntryLevel),
            "junior" => Ok(ExperienceTier::Junior),
            "mid level" | "mid" => Ok(ExperienceTier::MidLevel),
            "senior" => Ok(ExperienceTier::Senior),
            "lead" => Ok(ExperienceTier::Lead),
            "management" => Ok(ExperienceTier::Management),
            "unrecognized" => Ok(ExperienceTier::Unrecognized),
            _ => Err(ModelError::UnknownExperienceTier(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ExperienceTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ExperienceTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = lenient_label(deserializer)?;
        Ok(label.map_or(ExperienceTier::Unrecognized, |l| ExperienceTier::from_label(&l)))
    }
}

/// Availability of a person for reassignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AvailabilityStatus {
    /// Available
    Available,
    /// Partially Available
    PartiallyAvailable,
    /// Not Available
    NotAvailable,
    /// Label that names no known state, kept as written
    Other(String),
    /// Not recorded
    #[default]
    Unknown,
}

impl AvailabilityStatus {
    /// All recognized states
    pub const ALL: [AvailabilityStatus; 4] = [
        AvailabilityStatus::Available,
        AvailabilityStatus::PartiallyAvailable,
        AvailabilityStatus::NotAvailable,
        AvailabilityStatus::Unknown,
    ];

    /// Display label, as used on the wire
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::PartiallyAvailable => "Partially Available",
            AvailabilityStatus::NotAvailable => "Not Available",
            AvailabilityStatus::Other(label) => label.as_str(),
            AvailabilityStatus::Unknown => "Unknown",
        }
    }

    /// Whether the person may be suggested for a vacancy
    #[inline]
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        !matches!(self, AvailabilityStatus::NotAvailable)
    }

    /// Parse a label, keeping anything unknown as [`AvailabilityStatus::Other`]
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label
            .parse()
            .unwrap_or_else(|_| AvailabilityStatus::Other(label.to_string()))
    }
}

impl FromStr for AvailabilityStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "available" => Ok(AvailabilityStatus::Available),
            "partially available" | "partial" => Ok(AvailabilityStatus::PartiallyAvailable),
            "not available" | "unavailable" => Ok(AvailabilityStatus::NotAvailable),
            "unknown" => Ok(AvailabilityStatus::Unknown),
            _ => Err(ModelError::UnknownAvailability(s.to_string())),
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AvailabilityStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for AvailabilityStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = lenient_label(deserializer)?;
        Ok(label.map_or(AvailabilityStatus::Unknown, |l| AvailabilityStatus::from_label(&l)))
    }
}

/// Organizational snapshot being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The organization as it is
    Current,
    /// The planned organization
    Future,
}

impl Phase {
    /// Both phases, current first
    pub const ALL: [Phase; 2] = [Phase::Current, Phase::Future];

    /// The other phase
    #[inline]
    #[must_use]
    pub fn other(&self) -> Phase {
        match self {
            Phase::Current => Phase::Future,
            Phase::Future => Phase::Current,
        }
    }

    /// Wire label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Current => "current",
            Phase::Future => "future",
        }
    }
}

impl FromStr for Phase {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "current" => Ok(Phase::Current),
            "future" => Ok(Phase::Future),
            _ => Err(ModelError::UnknownPhase(s.to_string())),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a planned personnel transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionStatus {
    /// Planned, not started
    #[default]
    Planned,
    /// Underway
    InProgress,
    /// Done
    Completed,
    /// Abandoned
    Cancelled,
}

impl TransitionStatus {
    /// Whether no further status change is expected
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransitionStatus::Completed | TransitionStatus::Cancelled)
    }
}

impl FromStr for TransitionStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "planned" => Ok(TransitionStatus::Planned),
            "in progress" | "inprogress" => Ok(TransitionStatus::InProgress),
            "completed" | "done" => Ok(TransitionStatus::Completed),
            "cancelled" | "canceled" => Ok(TransitionStatus::Cancelled),
            _ => Err(ModelError::UnknownTransitionStatus(s.to_string())),
        }
    }
}
