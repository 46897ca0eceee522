//! Hierarchy shape: roots, levels, depth and width
//!
//! Reporting lines whose endpoints are missing from the chart are ignored.
//! Traversal visits each node once, so cycles terminate.

use orgd_model::NodeId;
use orgd_store::OrgChart;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Reporting lines between existing nodes, deduplicated, in connection order
pub(crate) fn reporting_lines(chart: &OrgChart) -> Vec<(&NodeId, &NodeId)> {
    let known: BTreeSet<&NodeId> = chart.nodes.iter().map(|n| &n.id).collect();
    let mut seen = BTreeSet::new();
    chart
        .connections
        .iter()
        .filter(|c| c.source != c.target)
        .filter(|c| known.contains(&c.source) && known.contains(&c.target))
        .map(|c| (&c.source, &c.target))
        .filter(|line| seen.insert(*line))
        .collect()
}

/// Shape of a chart's hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    /// Nodes with no incoming line, in node order
    pub roots: Vec<NodeId>,
    /// Nodes per level, level 0 being the roots
    pub levels: Vec<Vec<NodeId>>,
    /// Number of levels
    pub depth: usize,
    /// Largest level
    pub width: usize,
    /// Nodes reachable from no root (only possible inside a cycle)
    pub unreachable: Vec<NodeId>,
}

impl Structure {
    /// Level of a node, if reachable
    #[must_use]
    pub fn level_of(&self, node: &NodeId) -> Option<usize> {
        self.levels.iter().position(|level| level.contains(node))
    }
}

/// Compute the hierarchy shape
#[must_use]
pub fn structure(chart: &OrgChart) -> Structure {
    let lines = reporting_lines(chart);

    let mut children: BTreeMap<&NodeId, Vec<&NodeId>> = BTreeMap::new();
    let mut has_parent: BTreeSet<&NodeId> = BTreeSet::new();
    for (source, target) in &lines {
        children.entry(*source).or_default().push(*target);
        has_parent.insert(*target);
    }

    let roots: Vec<&NodeId> = chart
        .nodes
        .iter()
        .map(|n| &n.id)
        .filter(|id| !has_parent.contains(id))
        .collect();

    let mut visited: BTreeSet<&NodeId> = roots.iter().copied().collect();
    let mut queue: VecDeque<(&NodeId, usize)> = roots.iter().map(|r| (*r, 0)).collect();
    let mut levels: Vec<Vec<NodeId>> = Vec::new();

    while let Some((node, level)) = queue.pop_front() {
        if levels.len() <= level {
            levels.push(Vec::new());
        }
        levels[level].push(node.clone());

        for child in children.get(node).into_iter().flatten() {
            if visited.insert(*child) {
                queue.push_back((*child, level + 1));
            }
        }
    }

    let unreachable = chart
        .nodes
        .iter()
        .filter(|n| !visited.contains(&n.id))
        .map(|n| n.id.clone())
        .collect();

    Structure {
        roots: roots.into_iter().cloned().collect(),
        depth: levels.len(),
        width: levels.iter().map(Vec::len).max().unwrap_or(0),
        levels,
        unreachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_test_utils::{connection, node, plant_connections, plant_nodes};
    use pretty_assertions::assert_eq;

    fn ids(list: &[&str]) -> Vec<NodeId> {
        list.iter().map(|s| NodeId::from(*s)).collect()
    }

    #[test]
    fn plant_hierarchy() {
        let chart = OrgChart::new()
            .with_nodes(plant_nodes())
            .with_connections(plant_connections());
        let shape = structure(&chart);

        assert_eq!(shape.roots, ids(&["n-plant", "n-spare"]));
        assert_eq!(shape.depth, 3);
        assert_eq!(shape.width, 3);
        assert_eq!(shape.levels[1], ids(&["n-quality", "n-maint", "n-ops"]));
        assert_eq!(shape.level_of(&NodeId::from("n-floor")), Some(2));
        assert!(shape.unreachable.is_empty());
    }

    #[test]
    fn cycle_terminates() {
        let chart = OrgChart::new()
            .with_nodes(vec![node("a", "A", &[], &[]), node("b", "B", &[], &[]), node("c", "C", &[], &[])])
            .with_connections(vec![connection("a", "b"), connection("b", "c"), connection("c", "b")]);
        let shape = structure(&chart);

        assert_eq!(shape.roots, ids(&["a"]));
        assert_eq!(shape.depth, 3);
        assert!(shape.unreachable.is_empty());
    }

    #[test]
    fn pure_cycle_is_unreachable() {
        let chart = OrgChart::new()
            .with_nodes(vec![node("a", "A", &[], &[]), node("b", "B", &[], &[])])
            .with_connections(vec![connection("a", "b"), connection("b", "a")]);
        let shape = structure(&chart);

        assert!(shape.roots.is_empty());
        assert_eq!(shape.depth, 0);
        assert_eq!(shape.unreachable, ids(&["a", "b"]));
    }

    #[test]
    fn dangling_and_duplicate_lines_ignored() {
        let chart = OrgChart::new()
            .with_nodes(vec![node("a", "A", &[], &[]), node("b", "B", &[], &[])])
            .with_connections(vec![
                connection("a", "b"),
                connection("a", "b"),
                connection("ghost", "a"),
            ]);

        assert_eq!(reporting_lines(&chart).len(), 1);
        assert_eq!(structure(&chart).roots, ids(&["a"]));
    }
}
