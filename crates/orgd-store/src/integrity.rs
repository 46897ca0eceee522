//! Reference integrity checks
//!
//! Charts tolerate dangling references: matching and analytics skip ids that
//! resolve to nothing. These checks report them so they can be cleaned up.

use crate::chart::OrgChart;
use crate::error::EntityKind;
use serde::Serialize;
use std::collections::BTreeSet;

/// An id that resolves to nothing in its chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    /// Kind of the missing entity
    pub kind: EntityKind,
    /// Missing id
    pub id: String,
    /// What holds the reference, e.g. `node n-ops`
    pub referenced_by: String,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} references missing {} {}", self.referenced_by, self.kind, self.id)
    }
}

/// Integrity findings for one chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    /// Ids that resolve to nothing
    pub dangling: Vec<DanglingReference>,
    /// Ids used by more than one entity of the same kind
    pub duplicate_ids: Vec<String>,
    /// Reporting lines from a node to itself
    pub self_connections: Vec<String>,
}

impl IntegrityReport {
    /// Whether nothing was found
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.duplicate_ids.is_empty() && self.self_connections.is_empty()
    }
}

fn duplicates<'a>(kind: EntityKind, ids: impl Iterator<Item = &'a str>, out: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            out.push(format!("{kind} {id}"));
        }
    }
}

/// Check one chart
#[must_use]
pub fn check_integrity(chart: &OrgChart) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    let mut dangling = |kind: EntityKind, id: &str, by: String| {
        report.dangling.push(DanglingReference {
            kind,
            id: id.to_string(),
            referenced_by: by,
        });
    };

    for node in &chart.nodes {
        for role in &node.role_ids {
            if chart.role(role).is_none() {
                dangling(EntityKind::Role, role.as_str(), format!("node {}", node.id));
            }
        }
        for person in &node.personnel_ids {
            if chart.person(person).is_none() {
                dangling(EntityKind::Person, person.as_str(), format!("node {}", node.id));
            }
        }
    }

    for line in &chart.connections {
        for end in [&line.source, &line.target] {
            if chart.node(end).is_none() {
                dangling(
                    EntityKind::Node,
                    end.as_str(),
                    format!("line {} -> {}", line.source, line.target),
                );
            }
        }
    }

    for (role, requirements) in &chart.role_requirements {
        if chart.role(role).is_none() {
            dangling(EntityKind::Role, role.as_str(), "competency requirements".into());
        }
        for req in requirements {
            if chart.competency(&req.competency_id).is_none() {
                dangling(
                    EntityKind::Competency,
                    req.competency_id.as_str(),
                    format!("role {role}"),
                );
            }
        }
    }

    for person in chart.person_levels.keys() {
        if chart.person(person).is_none() {
            dangling(EntityKind::Person, person.as_str(), "competency levels".into());
        }
    }

    for transition in &chart.transitions {
        let by = format!("transition {}", transition.id);
        if chart.person(&transition.person_id).is_none() {
            dangling(EntityKind::Person, transition.person_id.as_str(), by.clone());
        }
        for node in [&transition.from_node, &transition.to_node].into_iter().flatten() {
            if chart.node(node).is_none() {
                dangling(EntityKind::Node, node.as_str(), by.clone());
            }
        }
    }

    duplicates(EntityKind::Role, chart.roles.iter().map(|r| r.id.as_str()), &mut report.duplicate_ids);
    duplicates(EntityKind::Person, chart.personnel.iter().map(|p| p.id.as_str()), &mut report.duplicate_ids);
    duplicates(EntityKind::Node, chart.nodes.iter().map(|n| n.id.as_str()), &mut report.duplicate_ids);

    report.self_connections = chart
        .connections
        .iter()
        .filter(|c| c.source == c.target)
        .map(|c| c.source.to_string())
        .collect();

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_test_utils::{connection, node, plant_connections, plant_nodes, plant_personnel, plant_roles};
    use pretty_assertions::assert_eq;

    #[test]
    fn plant_is_clean() {
        let chart = OrgChart::new()
            .with_roles(plant_roles())
            .with_personnel(plant_personnel())
            .with_nodes(plant_nodes())
            .with_connections(plant_connections());
        assert!(check_integrity(&chart).is_clean());
    }

    #[test]
    fn finds_dangling_and_duplicates() {
        let mut nodes = plant_nodes();
        nodes.push(node("n-ops", "Copy", &["r-ghost"], &["p-ghost"]));
        let mut lines = plant_connections();
        lines.push(connection("n-floor", "n-gone"));
        lines.push(connection("n-spare", "n-spare"));

        let chart = OrgChart::new()
            .with_roles(plant_roles())
            .with_personnel(plant_personnel())
            .with_nodes(nodes)
            .with_connections(lines);
        let report = check_integrity(&chart);

        let found: Vec<String> = report.dangling.iter().map(ToString::to_string).collect();
        assert_eq!(
            found,
            vec![
                "node n-ops references missing role r-ghost",
                "node n-ops references missing person p-ghost",
                "line n-floor -> n-gone references missing node n-gone",
            ]
        );
        assert_eq!(report.duplicate_ids, vec!["node n-ops"]);
        assert_eq!(report.self_connections, vec!["n-spare"]);
        assert!(!report.is_clean());
    }
}
