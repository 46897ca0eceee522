//! Headcount and staffing status

use orgd_matching::NodeAssignment;
use orgd_model::AvailabilityStatus;
use orgd_store::OrgChart;
use serde::Serialize;
use std::collections::BTreeMap;

/// Staffing totals of a chart
///
/// Every node is exactly one of filled, vacant or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Headcount {
    /// Nodes
    pub nodes: usize,
    /// Nodes with somebody assigned
    pub filled: usize,
    /// Nodes with roles and nobody assigned
    pub vacant: usize,
    /// Nodes with no roles and nobody assigned
    pub empty: usize,
    /// People in the chart
    pub personnel: usize,
    /// People sitting on at least one node
    pub assigned: usize,
    /// People sitting on no node
    pub unassigned: usize,
    /// People per availability label, every label present
    pub availability: BTreeMap<String, usize>,
}

impl Headcount {
    /// Share of role-carrying nodes that are filled, rounded percent
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn fill_rate(&self) -> u32 {
        let staffed = self.filled + self.vacant;
        if staffed == 0 {
            return 100;
        }
        (100.0 * self.filled as f64 / staffed as f64).round() as u32
    }
}

/// Count nodes and people
#[must_use]
pub fn headcount(chart: &OrgChart) -> Headcount {
    let mut counts = Headcount {
        nodes: chart.nodes.len(),
        personnel: chart.personnel.len(),
        ..Headcount::default()
    };

    for node in &chart.nodes {
        let assignment = NodeAssignment::resolve(node, &chart.roles, &chart.personnel);
        if !assignment.personnel.is_empty() {
            counts.filled += 1;
        } else if assignment.has_vacancy() {
            counts.vacant += 1;
        } else {
            counts.empty += 1;
        }
    }

    counts.assigned = chart
        .personnel
        .iter()
        .filter(|p| chart.is_assigned(&p.id))
        .count();
    counts.unassigned = counts.personnel - counts.assigned;

    for status in AvailabilityStatus::ALL {
        counts.availability.insert(status.label().to_string(), 0);
    }
    for person in &chart.personnel {
        *counts
            .availability
            .entry(person.availability.label().to_string())
            .or_default() += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_test_utils::{plant_nodes, plant_personnel, plant_roles};
    use pretty_assertions::assert_eq;

    #[test]
    fn plant_headcount() {
        let chart = OrgChart::new()
            .with_roles(plant_roles())
            .with_personnel(plant_personnel())
            .with_nodes(plant_nodes());
        let counts = headcount(&chart);

        assert_eq!(counts.nodes, 6);
        assert_eq!((counts.filled, counts.vacant, counts.empty), (3, 2, 1));
        assert_eq!((counts.assigned, counts.unassigned), (3, 3));
        assert_eq!(counts.availability["Available"], 3);
        assert_eq!(counts.availability["Not Available"], 1);
        assert_eq!(counts.availability["Unknown"], 1);
        assert_eq!(counts.fill_rate(), 60);
    }

    #[test]
    fn empty_chart() {
        let counts = headcount(&OrgChart::new());
        assert_eq!(counts.nodes, 0);
        assert_eq!(counts.availability.len(), 4);
        assert_eq!(counts.fill_rate(), 100);
    }
}
