//! Candidate scoring
//!
//! A candidate's raw score is an additive sum of independent components:
//!
//! | component | points |
//! |-----------|--------|
//! | each required skill the candidate holds | `per_skill` (20) |
//! | leadership role and Senior/Lead/Management tier | `leadership_bonus` (30) |
//! | experience tier | [`orgd_model::ExperienceTier::base_score`] (0-30) |
//! | Available / Partially Available | `available_bonus` (15) / `partially_available_bonus` (5) |
//!
//! The skill component is uncapped; only the displayed percentage is clamped.

use orgd_model::{AvailabilityStatus, Person, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Title fragments that mark a role as a leadership position
pub const LEADERSHIP_KEYWORDS: [&str; 3] = ["director", "manager", "lead"];

/// Upper bound of the displayed match percentage
pub const MAX_PERCENTAGE: u32 = 100;

/// Point values for the additive score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    /// Points per overlapping skill
    pub per_skill: u32,
    /// Points for a leadership-qualified candidate on a leadership role
    pub leadership_bonus: u32,
    /// Points for an Available candidate
    pub available_bonus: u32,
    /// Points for a Partially Available candidate
    pub partially_available_bonus: u32,
}

impl MatchWeights {
    /// Default weights
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Availability component for a status
    #[inline]
    #[must_use]
    pub fn availability_bonus(&self, availability: &AvailabilityStatus) -> u32 {
        match availability {
            AvailabilityStatus::Available => self.available_bonus,
            AvailabilityStatus::PartiallyAvailable => self.partially_available_bonus,
            AvailabilityStatus::NotAvailable
            | AvailabilityStatus::Other(_)
            | AvailabilityStatus::Unknown => 0,
        }
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            per_skill: 20,
            leadership_bonus: 30,
            available_bonus: 15,
            partially_available_bonus: 5,
        }
    }
}

/// Whether any role title contains a leadership keyword (case-insensitive)
#[must_use]
pub fn requires_leadership<'a, I>(roles: I) -> bool
where
    I: IntoIterator<Item = &'a Role>,
{
    roles.into_iter().any(|role| {
        let title = role.title.to_lowercase();
        LEADERSHIP_KEYWORDS.iter().any(|k| title.contains(k))
    })
}

/// Score of one candidate against one vacancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateScore {
    /// Unclamped point sum, used for ordering
    pub match_score: u32,
    /// `min(match_score, 100)`, used for display
    pub match_percentage: u32,
    /// Distinct required skills the candidate holds
    pub matched_skills_count: usize,
    /// Size of the required-skill set
    pub total_required_skills: usize,
}

/// Score a candidate
///
/// Availability is only scored here; the decision to exclude "Not Available"
/// candidates belongs to the caller building the pool.
#[must_use]
pub fn score_candidate(
    person: &Person,
    required: &BTreeSet<String>,
    leadership_role: bool,
    weights: &MatchWeights,
) -> CandidateScore {
    let matched: BTreeSet<&str> = person
        .skills
        .iter()
        .map(String::as_str)
        .filter(|s| required.contains(*s))
        .collect();
    let matched_skills_count = matched.len();

    let skill_points = weights
        .per_skill
        .saturating_mul(u32::try_from(matched_skills_count).unwrap_or(u32::MAX));
    let leadership_points = if leadership_role && person.experience.qualifies_for_leadership() {
        weights.leadership_bonus
    } else {
        0
    };

    let match_score = skill_points
        .saturating_add(leadership_points)
        .saturating_add(person.experience.base_score())
        .saturating_add(weights.availability_bonus(&person.availability));

    CandidateScore {
        match_score,
        match_percentage: match_score.min(MAX_PERCENTAGE),
        matched_skills_count,
        total_required_skills: required.len(),
    }
}
