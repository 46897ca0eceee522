//! Read-only views over one chart of the store
//!
//! Every selector takes the store, a factory and a phase. A factory or phase
//! with no chart reads as an empty chart.

use crate::store::OrgStore;
use orgd_matching::{score_competencies, CompetencyMatch, MatchResult, NodeAssignment};
use orgd_model::{FactoryId, Node, NodeId, Person, PersonId, Phase, Role, RoleId};
use serde::Serialize;

/// A node with its references resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView<'a> {
    /// The node
    pub node: &'a Node,
    /// Resolved roles, in collection order
    pub roles: Vec<&'a Role>,
    /// Resolved personnel, in collection order
    pub personnel: Vec<&'a Person>,
    /// Roles assigned, nobody assigned
    pub has_vacancy: bool,
    /// Badge count
    pub potential_match_count: usize,
}

/// Resolve one node
pub fn node_view<'a>(
    store: &'a OrgStore,
    factory: &FactoryId,
    phase: Phase,
    node: &NodeId,
) -> Option<NodeView<'a>> {
    let chart = store.chart(factory, phase)?;
    let node = chart.node(node)?;
    let assignment = NodeAssignment::resolve(node, &chart.roles, &chart.personnel);
    let potential_match_count = potential_match_count(store, factory, phase, &node.id);

    Some(NodeView {
        node,
        has_vacancy: assignment.has_vacancy(),
        roles: assignment.roles,
        personnel: assignment.personnel,
        potential_match_count,
    })
}

/// Every node of the chart, resolved
pub fn node_views<'a>(store: &'a OrgStore, factory: &FactoryId, phase: Phase) -> Vec<NodeView<'a>> {
    store
        .chart(factory, phase)
        .map(|chart| {
            chart
                .nodes
                .iter()
                .filter_map(|n| node_view(store, factory, phase, &n.id))
                .collect()
        })
        .unwrap_or_default()
}

/// Nodes with roles but nobody assigned, in node order
pub fn vacant_nodes<'a>(store: &'a OrgStore, factory: &FactoryId, phase: Phase) -> Vec<&'a Node> {
    let Some(chart) = store.chart(factory, phase) else {
        return Vec::new();
    };
    chart
        .nodes
        .iter()
        .filter(|n| NodeAssignment::resolve(n, &chart.roles, &chart.personnel).has_vacancy())
        .collect()
}

/// People not sitting on any node, in collection order
pub fn unassigned_personnel<'a>(
    store: &'a OrgStore,
    factory: &FactoryId,
    phase: Phase,
) -> Vec<&'a Person> {
    let Some(chart) = store.chart(factory, phase) else {
        return Vec::new();
    };
    chart
        .personnel
        .iter()
        .filter(|p| !chart.is_assigned(&p.id))
        .collect()
}

/// Memoized badge count for a node; 0 for an unknown node
pub fn potential_match_count(
    store: &OrgStore,
    factory: &FactoryId,
    phase: Phase,
    node: &NodeId,
) -> usize {
    let Some(chart) = store.chart(factory, phase) else {
        return 0;
    };
    let Some(node) = chart.node(node) else {
        return 0;
    };
    store.engine().potential_match_count(
        node,
        &chart.roles,
        &chart.personnel,
        store.personnel_revision(factory, phase),
    )
}

/// Badge count and scored suggestions for a node
///
/// An unknown node yields an empty result.
pub fn matches_for_node(
    store: &OrgStore,
    factory: &FactoryId,
    phase: Phase,
    node: &NodeId,
) -> MatchResult {
    let Some(chart) = store.chart(factory, phase) else {
        return MatchResult::default();
    };
    let Some(target) = chart.node(node) else {
        return MatchResult::default();
    };
    let mut result = store.engine().compute(target, &chart.roles, &chart.personnel);
    result.potential_match_count = potential_match_count(store, factory, phase, node);
    result
}

/// Competency fit and gaps of a person for a role
///
/// `None` when either is missing from the chart. A person with no recorded
/// levels is scored as holding none.
pub fn development_plan(
    store: &OrgStore,
    factory: &FactoryId,
    phase: Phase,
    person: &PersonId,
    role: &RoleId,
) -> Option<CompetencyMatch> {
    let chart = store.chart(factory, phase)?;
    chart.person(person)?;
    chart.role(role)?;

    let levels = chart.levels_for(person).cloned().unwrap_or_default();
    Some(score_competencies(
        chart.requirements_for(role),
        &levels,
        &chart.competencies,
    ))
}
