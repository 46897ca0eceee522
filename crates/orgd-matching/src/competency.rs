//! Role-to-competency gap scoring
//!
//! A requirement that is met contributes its full weight. A requirement held
//! below the minimum contributes `level / minimum * weight` (partial credit).
//! The score is the percentage of total weight earned, rounded.

use orgd_model::{Competency, CompetencyId, CompetencyLevels, CompetencyRequirement};
use serde::{Deserialize, Serialize};

/// A requirement the person does not yet meet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyGap {
    /// Competency concerned
    pub competency_id: CompetencyId,
    /// Catalogue name, or the id when the catalogue lacks it
    pub name: String,
    /// Person's level (0 = not acquired)
    pub current_level: u8,
    /// Role's minimum
    pub required_level: u8,
    /// `required_level - current_level`
    pub gap: u8,
    /// Requirement marked essential
    pub is_essential: bool,
}

/// Competency fit of one person for one role
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyMatch {
    /// Weighted fit, 0..=100
    pub score_percent: u32,
    /// Requirements at or above minimum
    pub requirements_met: usize,
    /// Requirements considered
    pub requirements_total: usize,
    /// Unmet requirements, essential first, then largest gap first
    pub gaps: Vec<CompetencyGap>,
}

impl CompetencyMatch {
    /// Whether any essential requirement is unmet
    #[inline]
    #[must_use]
    pub fn has_essential_gap(&self) -> bool {
        self.gaps.iter().any(|g| g.is_essential)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn weighted_percent(earned: f64, total: f64) -> u32 {
    if total <= 0.0 || !total.is_finite() {
        return 0;
    }
    (100.0 * earned / total).round().clamp(0.0, 100.0) as u32
}

/// Score a person's acquired levels against a role's requirements
///
/// An empty requirement list, or one whose weights sum to zero, scores 0.
#[must_use]
pub fn score_competencies(
    requirements: &[CompetencyRequirement],
    levels: &CompetencyLevels,
    catalogue: &[Competency],
) -> CompetencyMatch {
    let mut earned = 0.0_f64;
    let mut total = 0.0_f64;
    let mut requirements_met = 0;
    let mut gaps = Vec::new();

    for req in requirements {
        let current = levels.level(&req.competency_id);
        total += req.weight;

        if current >= req.minimum_level {
            earned += req.weight;
            requirements_met += 1;
            continue;
        }

        if current > 0 {
            earned += f64::from(current) / f64::from(req.minimum_level) * req.weight;
        }

        let name = catalogue
            .iter()
            .find(|c| c.id == req.competency_id)
            .map_or_else(|| req.competency_id.to_string(), |c| c.name.clone());

        gaps.push(CompetencyGap {
            competency_id: req.competency_id.clone(),
            name,
            current_level: current,
            required_level: req.minimum_level,
            gap: req.minimum_level - current,
            is_essential: req.essential,
        });
    }

    gaps.sort_by(|a, b| {
        b.is_essential
            .cmp(&a.is_essential)
            .then_with(|| b.gap.cmp(&a.gap))
    });

    CompetencyMatch {
        score_percent: weighted_percent(earned, total),
        requirements_met,
        requirements_total: requirements.len(),
        gaps,
    }
}
