//! Skill coverage of the placed roles by the assigned workforce

use orgd_matching::NodeAssignment;
use orgd_store::OrgChart;
use serde::Serialize;
use std::collections::BTreeSet;

/// Which required skills the assigned workforce holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCoverage {
    /// Skills required by roles placed on nodes, sorted
    pub required: Vec<String>,
    /// Required skills held by somebody assigned to a node
    pub covered: Vec<String>,
    /// Required skills nobody assigned holds
    pub uncovered: Vec<String>,
    /// `covered / required`, rounded percent; 100 when nothing is required
    pub percent: u32,
}

/// Compute coverage
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn skill_coverage(chart: &OrgChart) -> SkillCoverage {
    let mut required = BTreeSet::new();
    let mut held = BTreeSet::new();

    for node in &chart.nodes {
        let assignment = NodeAssignment::resolve(node, &chart.roles, &chart.personnel);
        required.extend(assignment.required_skills());
        for person in &assignment.personnel {
            held.extend(person.skills.iter().cloned());
        }
    }

    let (covered, uncovered): (Vec<String>, Vec<String>) =
        required.iter().cloned().partition(|s| held.contains(s));

    let percent = if required.is_empty() {
        100
    } else {
        (100.0 * covered.len() as f64 / required.len() as f64).round() as u32
    };

    SkillCoverage {
        required: required.into_iter().collect(),
        covered,
        uncovered,
        percent,
    }
}
