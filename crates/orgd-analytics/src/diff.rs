//! Differences between the current and future chart of a factory

use orgd_model::{NodeId, PersonId, RoleId};
use orgd_store::OrgChart;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Kind of difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    /// Only in the future chart
    Added,
    /// Only in the current chart
    Removed,
    /// In both, with different content
    Changed,
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DiffStatus::Added => "added",
            DiffStatus::Removed => "removed",
            DiffStatus::Changed => "changed",
        })
    }
}

/// Difference for one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDiff {
    /// Node
    pub node: NodeId,
    /// Kind of difference
    pub status: DiffStatus,
    /// Future title, or current title for removed nodes
    pub title: String,
    /// Previous title when it changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_title: Option<String>,
    /// Roles placed in the future only
    pub roles_added: Vec<RoleId>,
    /// Roles placed currently only
    pub roles_removed: Vec<RoleId>,
    /// People placed in the future only
    pub personnel_added: Vec<PersonId>,
    /// People placed currently only
    pub personnel_removed: Vec<PersonId>,
}

/// Difference for one catalogue role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDiff {
    /// Role
    pub role: RoleId,
    /// Kind of difference
    pub status: DiffStatus,
    /// Role title
    pub title: String,
}

/// A person whose set of nodes differs between phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelMove {
    /// Person
    pub person: PersonId,
    /// Display name
    pub name: String,
    /// Nodes sat on currently
    pub from: Vec<NodeId>,
    /// Nodes sat on in the future
    pub to: Vec<NodeId>,
}

/// Current-to-future differences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDiff {
    /// Node differences, current node order then added nodes
    pub nodes: Vec<NodeDiff>,
    /// Role catalogue differences
    pub roles: Vec<RoleDiff>,
    /// Personnel moves, current personnel order then newcomers
    pub moves: Vec<PersonnelMove>,
}

impl PhaseDiff {
    /// Whether the phases are equivalent
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.roles.is_empty() && self.moves.is_empty()
    }

    /// Node differences of one kind
    pub fn nodes_with(&self, status: DiffStatus) -> impl Iterator<Item = &NodeDiff> {
        self.nodes.iter().filter(move |d| d.status == status)
    }
}

fn only_in<T: Ord + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let right: BTreeSet<&T> = right.iter().collect();
    left.iter().filter(|x| !right.contains(x)).cloned().collect()
}

fn seats(chart: &OrgChart) -> BTreeMap<&PersonId, Vec<NodeId>> {
    let mut seats: BTreeMap<&PersonId, Vec<NodeId>> = BTreeMap::new();
    for node in &chart.nodes {
        for person in &node.personnel_ids {
            let list = seats.entry(person).or_default();
            if !list.contains(&node.id) {
                list.push(node.id.clone());
            }
        }
    }
    seats
}

fn diff_nodes(current: &OrgChart, future: &OrgChart) -> Vec<NodeDiff> {
    let mut diffs = Vec::new();

    for before in &current.nodes {
        match future.node(&before.id) {
            None => diffs.push(NodeDiff {
                node: before.id.clone(),
                status: DiffStatus::Removed,
                title: before.title.clone(),
                previous_title: None,
                roles_added: Vec::new(),
                roles_removed: before.role_ids.clone(),
                personnel_added: Vec::new(),
                personnel_removed: before.personnel_ids.clone(),
            }),
            Some(after) => {
                let diff = NodeDiff {
                    node: before.id.clone(),
                    status: DiffStatus::Changed,
                    title: after.title.clone(),
                    previous_title: (before.title != after.title).then(|| before.title.clone()),
                    roles_added: only_in(&after.role_ids, &before.role_ids),
                    roles_removed: only_in(&before.role_ids, &after.role_ids),
                    personnel_added: only_in(&after.personnel_ids, &before.personnel_ids),
                    personnel_removed: only_in(&before.personnel_ids, &after.personnel_ids),
                };
                let changed = diff.previous_title.is_some()
                    || !diff.roles_added.is_empty()
                    || !diff.roles_removed.is_empty()
                    || !diff.personnel_added.is_empty()
                    || !diff.personnel_removed.is_empty();
                if changed {
                    diffs.push(diff);
                }
            }
        }
    }

    for after in &future.nodes {
        if current.node(&after.id).is_none() {
            diffs.push(NodeDiff {
                node: after.id.clone(),
                status: DiffStatus::Added,
                title: after.title.clone(),
                previous_title: None,
                roles_added: after.role_ids.clone(),
                roles_removed: Vec::new(),
                personnel_added: after.personnel_ids.clone(),
                personnel_removed: Vec::new(),
            });
        }
    }

    diffs
}

fn diff_roles(current: &OrgChart, future: &OrgChart) -> Vec<RoleDiff> {
    let mut diffs = Vec::new();
    for before in &current.roles {
        match future.role(&before.id) {
            None => diffs.push(RoleDiff {
                role: before.id.clone(),
                status: DiffStatus::Removed,
                title: before.title.clone(),
            }),
            Some(after) if after != before => diffs.push(RoleDiff {
                role: before.id.clone(),
                status: DiffStatus::Changed,
                title: after.title.clone(),
            }),
            Some(_) => {}
        }
    }
    for after in &future.roles {
        if current.role(&after.id).is_none() {
            diffs.push(RoleDiff {
                role: after.id.clone(),
                status: DiffStatus::Added,
                title: after.title.clone(),
            });
        }
    }
    diffs
}

fn diff_moves(current: &OrgChart, future: &OrgChart) -> Vec<PersonnelMove> {
    let before = seats(current);
    let after = seats(future);

    let mut people: Vec<(&PersonId, &str)> = Vec::new();
    let mut listed = BTreeSet::new();
    for person in current.personnel.iter().chain(&future.personnel) {
        if listed.insert(&person.id) {
            people.push((&person.id, person.name.as_str()));
        }
    }
    // Seated ids with no personnel record still move
    for id in before.keys().chain(after.keys()) {
        if listed.insert(*id) {
            people.push((*id, id.as_str()));
        }
    }

    people
        .into_iter()
        .filter_map(|(id, name)| {
            let from = before.get(id).cloned().unwrap_or_default();
            let to = after.get(id).cloned().unwrap_or_default();
            let same: bool = from.iter().collect::<BTreeSet<_>>() == to.iter().collect::<BTreeSet<_>>();
            (!same).then(|| PersonnelMove {
                person: id.clone(),
                name: name.to_string(),
                from,
                to,
            })
        })
        .collect()
}

/// Compare two charts, normally a factory's current and future phase
#[must_use]
pub fn phase_diff(current: &OrgChart, future: &OrgChart) -> PhaseDiff {
    let diff = PhaseDiff {
        nodes: diff_nodes(current, future),
        roles: diff_roles(current, future),
        moves: diff_moves(current, future),
    };
    tracing::debug!(
        nodes = diff.nodes.len(),
        roles = diff.roles.len(),
        moves = diff.moves.len(),
        "computed phase diff"
    );
    diff
}
