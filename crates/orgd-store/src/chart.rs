//! One org chart: the collections held for a single (factory, phase)

use orgd_model::{
    Competency, CompetencyId, CompetencyLevels, CompetencyRequirement, Connection, FactoryId,
    Node, NodeId, Person, PersonId, Phase, Role, RoleId, Transition, TransitionId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Address of a chart in the store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChartKey {
    /// Factory
    pub factory: FactoryId,
    /// Current or future state
    pub phase: Phase,
}

impl ChartKey {
    /// Create key
    #[inline]
    pub fn new(factory: impl Into<FactoryId>, phase: Phase) -> Self {
        Self {
            factory: factory.into(),
            phase,
        }
    }

    /// Same factory, other phase
    #[inline]
    #[must_use]
    pub fn with_phase(&self, phase: Phase) -> Self {
        Self {
            factory: self.factory.clone(),
            phase,
        }
    }
}

impl std::fmt::Display for ChartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.factory, self.phase)
    }
}

/// Roles, personnel, nodes, reporting lines and competency data of one chart
///
/// Collections are ordered: iteration order is insertion order, and it is the
/// tie-break order for match suggestions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrgChart {
    /// Role catalogue
    pub roles: Vec<Role>,
    /// People
    pub personnel: Vec<Person>,
    /// Boxes on the canvas
    pub nodes: Vec<Node>,
    /// Reporting lines
    pub connections: Vec<Connection>,
    /// Competency catalogue
    pub competencies: Vec<Competency>,
    /// Requirements per role
    pub role_requirements: BTreeMap<RoleId, Vec<CompetencyRequirement>>,
    /// Acquired levels per person
    pub person_levels: BTreeMap<PersonId, CompetencyLevels>,
    /// Planned moves
    pub transitions: Vec<Transition>,
}

impl OrgChart {
    /// Create empty chart
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With roles
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// With personnel
    #[must_use]
    pub fn with_personnel(mut self, personnel: Vec<Person>) -> Self {
        self.personnel = personnel;
        self
    }

    /// With nodes
    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    /// With reporting lines
    #[must_use]
    pub fn with_connections(mut self, connections: Vec<Connection>) -> Self {
        self.connections = connections;
        self
    }

    /// Whether the chart holds nothing at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
            && self.personnel.is_empty()
            && self.nodes.is_empty()
            && self.connections.is_empty()
            && self.competencies.is_empty()
            && self.role_requirements.is_empty()
            && self.person_levels.is_empty()
            && self.transitions.is_empty()
    }

    /// Role by id
    pub fn role(&self, id: &RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| &r.id == id)
    }

    /// Person by id
    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.personnel.iter().find(|p| &p.id == id)
    }

    /// Node by id
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Competency by id
    pub fn competency(&self, id: &CompetencyId) -> Option<&Competency> {
        self.competencies.iter().find(|c| &c.id == id)
    }

    /// Transition by id
    pub fn transition(&self, id: &TransitionId) -> Option<&Transition> {
        self.transitions.iter().find(|t| &t.id == id)
    }

    pub(crate) fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// Requirements for a role (empty when none are set)
    pub fn requirements_for(&self, role: &RoleId) -> &[CompetencyRequirement] {
        self.role_requirements.get(role).map_or(&[], Vec::as_slice)
    }

    /// Acquired levels of a person, if any were recorded
    pub fn levels_for(&self, person: &PersonId) -> Option<&CompetencyLevels> {
        self.person_levels.get(person)
    }

    /// Nodes a person sits on, in node order
    pub fn nodes_of_person<'a>(&'a self, person: &'a PersonId) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.has_person(person))
    }

    /// Whether a person sits on any node
    pub fn is_assigned(&self, person: &PersonId) -> bool {
        self.nodes.iter().any(|n| n.has_person(person))
    }

    /// Nodes directly reporting to `node`, in connection order
    pub fn reports_of<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.connections
            .iter()
            .filter(move |c| &c.source == node)
            .map(|c| &c.target)
    }

    /// Whether a reporting line already exists
    pub fn has_connection(&self, source: &NodeId, target: &NodeId) -> bool {
        self.connections
            .iter()
            .any(|c| &c.source == source && &c.target == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_test_utils::{plant_connections, plant_nodes, plant_personnel, plant_roles};

    fn plant() -> OrgChart {
        OrgChart::new()
            .with_roles(plant_roles())
            .with_personnel(plant_personnel())
            .with_nodes(plant_nodes())
            .with_connections(plant_connections())
    }

    #[test]
    fn lookups() {
        let chart = plant();
        assert_eq!(chart.role(&RoleId::from("r-qm")).unwrap().title, "Quality Lead");
        assert_eq!(chart.person(&PersonId::from("p-ben")).unwrap().name, "Ben Ortiz");
        assert!(chart.node(&NodeId::from("n-nowhere")).is_none());
        assert!(chart.requirements_for(&RoleId::from("r-qm")).is_empty());
    }

    #[test]
    fn assignment_queries() {
        let chart = plant();
        assert!(chart.is_assigned(&PersonId::from("p-ada")));
        assert!(!chart.is_assigned(&PersonId::from("p-ben")));

        let ada = PersonId::from("p-ada");
        let on: Vec<&str> = chart.nodes_of_person(&ada).map(|n| n.id.as_str()).collect();
        assert_eq!(on, vec!["n-plant"]);
    }

    #[test]
    fn reports() {
        let chart = plant();
        let plant_id = NodeId::from("n-plant");
        let reports: Vec<&str> = chart.reports_of(&plant_id).map(NodeId::as_str).collect();
        assert_eq!(reports, vec!["n-quality", "n-maint", "n-ops"]);
        assert!(chart.has_connection(&NodeId::from("n-ops"), &NodeId::from("n-floor")));
        assert!(!chart.has_connection(&NodeId::from("n-floor"), &NodeId::from("n-ops")));
    }

    #[test]
    fn key_display() {
        let key = ChartKey::new("plant-a", Phase::Future);
        assert_eq!(key.to_string(), "plant-a/future");
        assert_eq!(key.with_phase(Phase::Current).phase, Phase::Current);
    }
}
