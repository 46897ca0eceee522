//! Succession risk of filled nodes

use orgd_matching::NodeAssignment;
use orgd_model::{NodeId, PersonId};
use orgd_store::OrgChart;
use serde::Serialize;

/// How exposed a node is to losing its incumbents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Two or more successors
    Low,
    /// One successor
    Medium,
    /// No successor
    High,
}

impl RiskLevel {
    /// Risk for a successor count
    #[must_use]
    pub fn from_successors(count: usize) -> Self {
        match count {
            0 => RiskLevel::High,
            1 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

/// Succession outlook of one filled node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessionRisk {
    /// Node
    pub node: NodeId,
    /// Node title
    pub title: String,
    /// People sitting on the node
    pub incumbents: Vec<PersonId>,
    /// People who could step in
    pub successors: Vec<PersonId>,
    /// Risk derived from the successor count
    pub risk: RiskLevel,
}

/// Succession risk of every filled node, in node order
///
/// A successor is anyone off the node who is not "Not Available" and holds
/// one of the node's required skills; with no required skills, every such
/// person qualifies.
#[must_use]
pub fn succession_risks(chart: &OrgChart) -> Vec<SuccessionRisk> {
    chart
        .nodes
        .iter()
        .filter_map(|node| {
            let assignment = NodeAssignment::resolve(node, &chart.roles, &chart.personnel);
            if assignment.personnel.is_empty() {
                return None;
            }
            let required = assignment.required_skills();

            let successors: Vec<PersonId> = chart
                .personnel
                .iter()
                .filter(|p| !node.has_person(&p.id) && p.availability.is_assignable())
                .filter(|p| required.is_empty() || p.skills.iter().any(|s| required.contains(s)))
                .map(|p| p.id.clone())
                .collect();

            Some(SuccessionRisk {
                node: node.id.clone(),
                title: node.title.clone(),
                incumbents: assignment.personnel.iter().map(|p| p.id.clone()).collect(),
                risk: RiskLevel::from_successors(successors.len()),
                successors,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_test_utils::{plant_nodes, plant_personnel, plant_roles};
    use pretty_assertions::assert_eq;

    #[test]
    fn plant_risks() {
        let chart = OrgChart::new()
            .with_roles(plant_roles())
            .with_personnel(plant_personnel())
            .with_nodes(plant_nodes());
        let risks = succession_risks(&chart);

        let nodes: Vec<&str> = risks.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(nodes, vec!["n-plant", "n-ops", "n-floor"]);

        // Eli holds lean but is Not Available
        assert_eq!(risks[0].risk, RiskLevel::High);
        assert!(risks[0].successors.is_empty());

        // Scheduler adds no skills, so Fay does not qualify
        assert_eq!(
            risks[1].successors,
            vec![PersonId::from("p-cai")]
        );
        assert_eq!(risks[1].risk, RiskLevel::Medium);

        // Cai and Dev hold cnc
        assert_eq!(
            risks[2].successors,
            vec![PersonId::from("p-cai"), PersonId::from("p-dev")]
        );
        assert_eq!(risks[2].risk, RiskLevel::Low);
    }

    #[test]
    fn thresholds() {
        assert_eq!(RiskLevel::from_successors(0), RiskLevel::High);
        assert_eq!(RiskLevel::from_successors(1), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_successors(7), RiskLevel::Low);
        assert!(RiskLevel::High > RiskLevel::Low);
    }
}
