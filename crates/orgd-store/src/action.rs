//! Store actions and the reducer applying them to one chart
//!
//! Every arm validates before it mutates, so a rejected action leaves the
//! chart untouched.

use crate::chart::OrgChart;
use crate::error::{EntityKind, StoreError};
use orgd_model::{
    Competency, CompetencyId, CompetencyRequirement, Connection, Node, NodeId, Person, PersonId,
    Phase, Position, Role, RoleId, Transition, TransitionId, TransitionStatus,
};

/// A change to the store
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add a role to the catalogue
    AddRole(Role),
    /// Replace a role with the same id
    UpdateRole(Role),
    /// Remove a role and its competency requirements
    RemoveRole(RoleId),

    /// Add a person
    AddPerson(Person),
    /// Replace a person with the same id
    UpdatePerson(Person),
    /// Remove a person and their competency levels
    RemovePerson(PersonId),

    /// Add a node
    AddNode(Node),
    /// Remove a node
    RemoveNode(NodeId),
    /// Change a node's title
    RenameNode {
        /// Node
        node: NodeId,
        /// New title
        title: String,
    },
    /// Move a node on the canvas
    MoveNode {
        /// Node
        node: NodeId,
        /// X coordinate
        x: f64,
        /// Y coordinate
        y: f64,
    },

    /// Add a reporting line; existing lines are left as they are
    Connect {
        /// Manager node
        source: NodeId,
        /// Report node
        target: NodeId,
    },
    /// Remove a reporting line if present
    Disconnect {
        /// Manager node
        source: NodeId,
        /// Report node
        target: NodeId,
    },

    /// Place a role on a node
    AssignRole {
        /// Node
        node: NodeId,
        /// Role
        role: RoleId,
    },
    /// Take a role off a node
    UnassignRole {
        /// Node
        node: NodeId,
        /// Role
        role: RoleId,
    },
    /// Place a person on a node
    AssignPerson {
        /// Node
        node: NodeId,
        /// Person
        person: PersonId,
    },
    /// Take a person off a node
    UnassignPerson {
        /// Node
        node: NodeId,
        /// Person
        person: PersonId,
    },
    /// Drag a role from one node to another
    MoveRole {
        /// Role
        role: RoleId,
        /// Node it currently sits on
        from: NodeId,
        /// Destination node
        to: NodeId,
    },
    /// Drag a person from one node to another
    MovePerson {
        /// Person
        person: PersonId,
        /// Node they currently sit on
        from: NodeId,
        /// Destination node
        to: NodeId,
    },
    /// Reorder a node's role list
    ReorderRoles {
        /// Node
        node: NodeId,
        /// Index of the role to move
        from_index: usize,
        /// Index it ends up at
        to_index: usize,
    },
    /// Reorder a node's personnel list
    ReorderPersonnel {
        /// Node
        node: NodeId,
        /// Index of the person to move
        from_index: usize,
        /// Index they end up at
        to_index: usize,
    },

    /// Add a competency to the catalogue
    AddCompetency(Competency),
    /// Set or replace a role's requirement for one competency
    SetRequirement {
        /// Role
        role: RoleId,
        /// Requirement
        requirement: CompetencyRequirement,
    },
    /// Drop a role's requirement for one competency
    RemoveRequirement {
        /// Role
        role: RoleId,
        /// Competency
        competency: CompetencyId,
    },
    /// Record a person's level in a competency (0 clears it)
    SetPersonLevel {
        /// Person
        person: PersonId,
        /// Competency
        competency: CompetencyId,
        /// Level, 0..=5
        level: u8,
    },

    /// Record a planned move
    PlanTransition(Transition),
    /// Advance a planned move
    SetTransitionStatus {
        /// Transition
        id: TransitionId,
        /// New status
        status: TransitionStatus,
    },

    /// Replace one phase's chart with a copy of another's, same factory
    ClonePhase {
        /// Source phase
        from: Phase,
        /// Target phase
        to: Phase,
    },
}

impl Action {
    /// Short name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddRole(_) => "add_role",
            Self::UpdateRole(_) => "update_role",
            Self::RemoveRole(_) => "remove_role",
            Self::AddPerson(_) => "add_person",
            Self::UpdatePerson(_) => "update_person",
            Self::RemovePerson(_) => "remove_person",
            Self::AddNode(_) => "add_node",
            Self::RemoveNode(_) => "remove_node",
            Self::RenameNode { .. } => "rename_node",
            Self::MoveNode { .. } => "move_node",
            Self::Connect { .. } => "connect",
            Self::Disconnect { .. } => "disconnect",
            Self::AssignRole { .. } => "assign_role",
            Self::UnassignRole { .. } => "unassign_role",
            Self::AssignPerson { .. } => "assign_person",
            Self::UnassignPerson { .. } => "unassign_person",
            Self::MoveRole { .. } => "move_role",
            Self::MovePerson { .. } => "move_person",
            Self::ReorderRoles { .. } => "reorder_roles",
            Self::ReorderPersonnel { .. } => "reorder_personnel",
            Self::AddCompetency(_) => "add_competency",
            Self::SetRequirement { .. } => "set_requirement",
            Self::RemoveRequirement { .. } => "remove_requirement",
            Self::SetPersonLevel { .. } => "set_person_level",
            Self::PlanTransition(_) => "plan_transition",
            Self::SetTransitionStatus { .. } => "set_transition_status",
            Self::ClonePhase { .. } => "clone_phase",
        }
    }

    /// Whether applying the action can change the personnel collection
    #[must_use]
    pub fn touches_personnel(&self) -> bool {
        matches!(
            self,
            Self::AddPerson(_) | Self::UpdatePerson(_) | Self::RemovePerson(_) | Self::ClonePhase { .. }
        )
    }
}

fn ensure_node(chart: &OrgChart, id: &NodeId) -> Result<(), StoreError> {
    chart
        .node(id)
        .map(|_| ())
        .ok_or_else(|| StoreError::not_found(EntityKind::Node, id))
}

fn ensure_role(chart: &OrgChart, id: &RoleId) -> Result<(), StoreError> {
    chart
        .role(id)
        .map(|_| ())
        .ok_or_else(|| StoreError::not_found(EntityKind::Role, id))
}

fn ensure_person(chart: &OrgChart, id: &PersonId) -> Result<(), StoreError> {
    chart
        .person(id)
        .map(|_| ())
        .ok_or_else(|| StoreError::not_found(EntityKind::Person, id))
}

fn position_of<T>(items: &[T], matches: impl Fn(&T) -> bool, kind: EntityKind, id: &impl ToString) -> Result<usize, StoreError> {
    items
        .iter()
        .position(matches)
        .ok_or_else(|| StoreError::not_found(kind, id.to_string()))
}

fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), StoreError> {
    let len = items.len();
    if from >= len {
        return Err(StoreError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(StoreError::IndexOutOfRange { index: to, len });
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

impl OrgChart {
    /// Apply one action
    ///
    /// With `cascade` set, removing a role, person or node also retracts it
    /// from nodes, reporting lines and transitions. Otherwise references to
    /// the removed entity are left dangling.
    ///
    /// `ClonePhase` spans two charts and is a no-op here; the store applies it.
    pub fn apply(&mut self, action: Action, cascade: bool) -> Result<(), StoreError> {
        match action {
            Action::AddRole(role) => {
                if self.role(&role.id).is_some() {
                    return Err(StoreError::duplicate(EntityKind::Role, &role.id));
                }
                self.roles.push(role);
            }
            Action::UpdateRole(role) => {
                let idx = position_of(&self.roles, |r| r.id == role.id, EntityKind::Role, &role.id)?;
                self.roles[idx] = role;
            }
            Action::RemoveRole(id) => {
                let idx = position_of(&self.roles, |r| r.id == id, EntityKind::Role, &id)?;
                self.roles.remove(idx);
                self.role_requirements.remove(&id);
                if cascade {
                    for node in &mut self.nodes {
                        node.unassign_role(&id);
                    }
                }
            }

            Action::AddPerson(person) => {
                if self.person(&person.id).is_some() {
                    return Err(StoreError::duplicate(EntityKind::Person, &person.id));
                }
                self.personnel.push(person);
            }
            Action::UpdatePerson(person) => {
                let idx = position_of(&self.personnel, |p| p.id == person.id, EntityKind::Person, &person.id)?;
                self.personnel[idx] = person;
            }
            Action::RemovePerson(id) => {
                let idx = position_of(&self.personnel, |p| p.id == id, EntityKind::Person, &id)?;
                self.personnel.remove(idx);
                self.person_levels.remove(&id);
                if cascade {
                    for node in &mut self.nodes {
                        node.unassign_person(&id);
                    }
                    self.transitions.retain(|t| t.person_id != id);
                }
            }

            Action::AddNode(node) => {
                if self.node(&node.id).is_some() {
                    return Err(StoreError::duplicate(EntityKind::Node, &node.id));
                }
                self.nodes.push(node);
            }
            Action::RemoveNode(id) => {
                let idx = position_of(&self.nodes, |n| n.id == id, EntityKind::Node, &id)?;
                self.nodes.remove(idx);
                if cascade {
                    self.connections.retain(|c| !c.touches(&id));
                    for transition in &mut self.transitions {
                        if transition.from_node.as_ref() == Some(&id) {
                            transition.from_node = None;
                        }
                        if transition.to_node.as_ref() == Some(&id) {
                            transition.to_node = None;
                        }
                    }
                }
            }
            Action::RenameNode { node, title } => {
                let target = self
                    .node_mut(&node)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &node))?;
                target.title = title;
            }
            Action::MoveNode { node, x, y } => {
                let target = self
                    .node_mut(&node)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &node))?;
                target.position = Position::new(x, y);
            }

            Action::Connect { source, target } => {
                if source == target {
                    return Err(StoreError::SelfConnection(source));
                }
                ensure_node(self, &source)?;
                ensure_node(self, &target)?;
                if !self.has_connection(&source, &target) {
                    self.connections.push(Connection::new(source, target));
                }
            }
            Action::Disconnect { source, target } => {
                self.connections
                    .retain(|c| !(c.source == source && c.target == target));
            }

            Action::AssignRole { node, role } => {
                ensure_role(self, &role)?;
                let target = self
                    .node_mut(&node)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &node))?;
                target.assign_role(role);
            }
            Action::UnassignRole { node, role } => {
                let target = self
                    .node_mut(&node)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &node))?;
                target.unassign_role(&role);
            }
            Action::AssignPerson { node, person } => {
                ensure_person(self, &person)?;
                let target = self
                    .node_mut(&node)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &node))?;
                target.assign_person(person);
            }
            Action::UnassignPerson { node, person } => {
                let target = self
                    .node_mut(&node)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &node))?;
                target.unassign_person(&person);
            }
            Action::MoveRole { role, from, to } => {
                ensure_node(self, &to)?;
                let source = self
                    .node(&from)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &from))?;
                if !source.has_role(&role) {
                    return Err(StoreError::NotOnNode {
                        kind: EntityKind::Role,
                        id: role.to_string(),
                        node: from,
                    });
                }
                if from != to {
                    if let Some(source) = self.node_mut(&from) {
                        source.unassign_role(&role);
                    }
                    if let Some(dest) = self.node_mut(&to) {
                        dest.assign_role(role);
                    }
                }
            }
            Action::MovePerson { person, from, to } => {
                ensure_node(self, &to)?;
                let source = self
                    .node(&from)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &from))?;
                if !source.has_person(&person) {
                    return Err(StoreError::NotOnNode {
                        kind: EntityKind::Person,
                        id: person.to_string(),
                        node: from,
                    });
                }
                if from != to {
                    if let Some(source) = self.node_mut(&from) {
                        source.unassign_person(&person);
                    }
                    if let Some(dest) = self.node_mut(&to) {
                        dest.assign_person(person);
                    }
                }
            }
            Action::ReorderRoles {
                node,
                from_index,
                to_index,
            } => {
                let target = self
                    .node_mut(&node)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &node))?;
                reorder(&mut target.role_ids, from_index, to_index)?;
            }
            Action::ReorderPersonnel {
                node,
                from_index,
                to_index,
            } => {
                let target = self
                    .node_mut(&node)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Node, &node))?;
                reorder(&mut target.personnel_ids, from_index, to_index)?;
            }

            Action::AddCompetency(competency) => {
                if self.competency(&competency.id).is_some() {
                    return Err(StoreError::duplicate(EntityKind::Competency, &competency.id));
                }
                self.competencies.push(competency);
            }
            Action::SetRequirement { role, requirement } => {
                ensure_role(self, &role)?;
                let list = self.role_requirements.entry(role).or_default();
                match list
                    .iter_mut()
                    .find(|r| r.competency_id == requirement.competency_id)
                {
                    Some(existing) => *existing = requirement,
                    None => list.push(requirement),
                }
            }
            Action::RemoveRequirement { role, competency } => {
                if let Some(list) = self.role_requirements.get_mut(&role) {
                    list.retain(|r| r.competency_id != competency);
                    if list.is_empty() {
                        self.role_requirements.remove(&role);
                    }
                }
            }
            Action::SetPersonLevel {
                person,
                competency,
                level,
            } => {
                ensure_person(self, &person)?;
                let mut levels = self.person_levels.get(&person).cloned().unwrap_or_default();
                levels.set(competency, level)?;
                if levels.0.is_empty() {
                    self.person_levels.remove(&person);
                } else {
                    self.person_levels.insert(person, levels);
                }
            }

            Action::PlanTransition(transition) => {
                if self.transition(&transition.id).is_some() {
                    return Err(StoreError::duplicate(EntityKind::Transition, &transition.id));
                }
                ensure_person(self, &transition.person_id)?;
                for node in [&transition.from_node, &transition.to_node].into_iter().flatten() {
                    ensure_node(self, node)?;
                }
                self.transitions.push(transition);
            }
            Action::SetTransitionStatus { id, status } => {
                let target = self
                    .transitions
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Transition, &id))?;
                if target.status != status {
                    if target.status.is_terminal() {
                        return Err(StoreError::TransitionClosed(id));
                    }
                    target.status = status;
                }
            }

            Action::ClonePhase { .. } => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_test_utils::{competencies, plant_connections, plant_nodes, plant_personnel, plant_roles};
    use pretty_assertions::assert_eq;

    fn plant() -> OrgChart {
        OrgChart::new()
            .with_roles(plant_roles())
            .with_personnel(plant_personnel())
            .with_nodes(plant_nodes())
            .with_connections(plant_connections())
    }

    fn node_personnel<'a>(chart: &'a OrgChart, node: &str) -> Vec<&'a str> {
        chart
            .node(&NodeId::from(node))
            .unwrap()
            .personnel_ids
            .iter()
            .map(PersonId::as_str)
            .collect()
    }

    #[test]
    fn assigning_twice_keeps_one_occurrence() {
        let mut chart = plant();
        let assign = Action::AssignPerson {
            node: NodeId::from("n-quality"),
            person: PersonId::from("p-ben"),
        };
        chart.apply(assign.clone(), false).unwrap();
        chart.apply(assign, false).unwrap();

        assert_eq!(node_personnel(&chart, "n-quality"), vec!["p-ben"]);
    }

    #[test]
    fn rejected_action_leaves_chart_untouched() {
        let mut chart = plant();
        let before = chart.clone();

        let err = chart
            .apply(
                Action::AssignPerson {
                    node: NodeId::from("n-nowhere"),
                    person: PersonId::from("p-ben"),
                },
                false,
            )
            .unwrap_err();
        assert!(err.is_not_found());

        let err = chart.apply(Action::AddRole(plant_roles()[0].clone()), false).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { kind: EntityKind::Role, .. }));

        assert_eq!(chart, before);
    }

    #[test]
    fn connect_rejects_self_and_dedups() {
        let mut chart = plant();
        let err = chart
            .apply(
                Action::Connect {
                    source: NodeId::from("n-ops"),
                    target: NodeId::from("n-ops"),
                },
                false,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::SelfConnection(_)));

        let count = chart.connections.len();
        chart
            .apply(
                Action::Connect {
                    source: NodeId::from("n-ops"),
                    target: NodeId::from("n-floor"),
                },
                false,
            )
            .unwrap();
        assert_eq!(chart.connections.len(), count);

        chart
            .apply(
                Action::Disconnect {
                    source: NodeId::from("n-ops"),
                    target: NodeId::from("n-floor"),
                },
                false,
            )
            .unwrap();
        assert_eq!(chart.connections.len(), count - 1);
    }

    #[test]
    fn move_person_between_nodes() {
        let mut chart = plant();
        chart
            .apply(
                Action::MovePerson {
                    person: PersonId::from("p-fay"),
                    from: NodeId::from("n-floor"),
                    to: NodeId::from("n-ops"),
                },
                false,
            )
            .unwrap();

        assert!(node_personnel(&chart, "n-floor").is_empty());
        assert_eq!(node_personnel(&chart, "n-ops"), vec!["p-dev", "p-fay"]);

        let err = chart
            .apply(
                Action::MovePerson {
                    person: PersonId::from("p-fay"),
                    from: NodeId::from("n-floor"),
                    to: NodeId::from("n-ops"),
                },
                false,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::NotOnNode { kind: EntityKind::Person, .. }));
    }

    #[test]
    fn reorder_roles() {
        let mut chart = plant();
        chart
            .apply(
                Action::ReorderRoles {
                    node: NodeId::from("n-ops"),
                    from_index: 1,
                    to_index: 0,
                },
                false,
            )
            .unwrap();
        let roles: Vec<&str> = chart
            .node(&NodeId::from("n-ops"))
            .unwrap()
            .role_ids
            .iter()
            .map(RoleId::as_str)
            .collect();
        assert_eq!(roles, vec!["r-sc", "r-op"]);

        let err = chart
            .apply(
                Action::ReorderRoles {
                    node: NodeId::from("n-ops"),
                    from_index: 0,
                    to_index: 2,
                },
                false,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::IndexOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn remove_person_keeps_dangling_refs_without_cascade() {
        let mut chart = plant();
        chart.apply(Action::RemovePerson(PersonId::from("p-ada")), false).unwrap();

        assert!(chart.person(&PersonId::from("p-ada")).is_none());
        assert_eq!(node_personnel(&chart, "n-plant"), vec!["p-ada"]);
    }

    #[test]
    fn remove_with_cascade_retracts_references() {
        let mut chart = plant();
        chart
            .apply(
                Action::PlanTransition(Transition::plan(
                    PersonId::from("p-ada"),
                    Some(NodeId::from("n-plant")),
                    Some(NodeId::from("n-ops")),
                )),
                true,
            )
            .unwrap();

        chart.apply(Action::RemoveNode(NodeId::from("n-ops")), true).unwrap();
        assert!(chart.connections.iter().all(|c| !c.touches(&NodeId::from("n-ops"))));
        assert_eq!(chart.transitions[0].to_node, None);

        chart.apply(Action::RemovePerson(PersonId::from("p-ada")), true).unwrap();
        assert!(node_personnel(&chart, "n-plant").is_empty());
        assert!(chart.transitions.is_empty());

        chart.apply(Action::RemoveRole(RoleId::from("r-op")), true).unwrap();
        assert!(chart.nodes.iter().all(|n| !n.has_role(&RoleId::from("r-op"))));
    }

    #[test]
    fn requirements_and_levels() {
        let mut chart = plant();
        for c in competencies() {
            chart.apply(Action::AddCompetency(c), false).unwrap();
        }
        let req = CompetencyRequirement::new(CompetencyId::from("c-spc"), 3, 1.0).unwrap();
        chart
            .apply(
                Action::SetRequirement {
                    role: RoleId::from("r-qm"),
                    requirement: req,
                },
                false,
            )
            .unwrap();
        let stricter = CompetencyRequirement::new(CompetencyId::from("c-spc"), 4, 2.0).unwrap();
        chart
            .apply(
                Action::SetRequirement {
                    role: RoleId::from("r-qm"),
                    requirement: stricter,
                },
                false,
            )
            .unwrap();

        let reqs = chart.requirements_for(&RoleId::from("r-qm"));
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].minimum_level, 4);

        let err = chart
            .apply(
                Action::SetPersonLevel {
                    person: PersonId::from("p-ben"),
                    competency: CompetencyId::from("c-spc"),
                    level: 9,
                },
                false,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Model(_)));
        assert!(chart.levels_for(&PersonId::from("p-ben")).is_none());

        chart
            .apply(
                Action::SetPersonLevel {
                    person: PersonId::from("p-ben"),
                    competency: CompetencyId::from("c-spc"),
                    level: 3,
                },
                false,
            )
            .unwrap();
        assert_eq!(
            chart
                .levels_for(&PersonId::from("p-ben"))
                .unwrap()
                .level(&CompetencyId::from("c-spc")),
            3
        );

        chart
            .apply(
                Action::RemoveRequirement {
                    role: RoleId::from("r-qm"),
                    competency: CompetencyId::from("c-spc"),
                },
                false,
            )
            .unwrap();
        assert!(chart.role_requirements.is_empty());
    }

    #[test]
    fn closed_transitions_cannot_reopen() {
        let mut chart = plant();
        let transition = Transition::plan(PersonId::from("p-ben"), None, Some(NodeId::from("n-quality")));
        let id = transition.id.clone();
        chart.apply(Action::PlanTransition(transition), false).unwrap();

        chart
            .apply(
                Action::SetTransitionStatus {
                    id: id.clone(),
                    status: TransitionStatus::Completed,
                },
                false,
            )
            .unwrap();
        let err = chart
            .apply(
                Action::SetTransitionStatus {
                    id,
                    status: TransitionStatus::InProgress,
                },
                false,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::TransitionClosed(_)));
    }
}
