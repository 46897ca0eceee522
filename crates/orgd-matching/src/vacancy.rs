//! Vacancy detection and required-skill extraction

use orgd_model::{Node, Person, Role};
use std::collections::BTreeSet;

/// Roles referenced by the node, in collection order
///
/// Ids that resolve to no role are skipped.
#[must_use]
pub fn assigned_roles<'a>(node: &Node, roles: &'a [Role]) -> Vec<&'a Role> {
    roles.iter().filter(|r| node.has_role(&r.id)).collect()
}

/// Personnel referenced by the node, in collection order
///
/// Ids that resolve to no person are skipped.
#[must_use]
pub fn assigned_personnel<'a>(node: &Node, personnel: &'a [Person]) -> Vec<&'a Person> {
    personnel.iter().filter(|p| node.has_person(&p.id)).collect()
}

/// Union of the skills required by the given roles
#[must_use]
pub fn required_skills<'a, I>(roles: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Role>,
{
    roles
        .into_iter()
        .flat_map(|r| r.skills.iter().cloned())
        .collect()
}

/// Whether the node has at least one resolvable role and no resolvable personnel
#[must_use]
pub fn has_vacancy(node: &Node, roles: &[Role], personnel: &[Person]) -> bool {
    NodeAssignment::resolve(node, roles, personnel).has_vacancy()
}

/// A node's references resolved against its chart's collections
#[derive(Debug, Clone)]
pub struct NodeAssignment<'a> {
    /// Resolved roles
    pub roles: Vec<&'a Role>,
    /// Resolved personnel
    pub personnel: Vec<&'a Person>,
}

impl<'a> NodeAssignment<'a> {
    /// Resolve node references
    #[must_use]
    pub fn resolve(node: &Node, roles: &'a [Role], personnel: &'a [Person]) -> Self {
        Self {
            roles: assigned_roles(node, roles),
            personnel: assigned_personnel(node, personnel),
        }
    }

    /// Roles assigned, nobody assigned
    #[inline]
    #[must_use]
    pub fn has_vacancy(&self) -> bool {
        !self.roles.is_empty() && self.personnel.is_empty()
    }

    /// Nobody and nothing assigned
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.personnel.is_empty()
    }

    /// Union of the assigned roles' skills
    #[must_use]
    pub fn required_skills(&self) -> BTreeSet<String> {
        required_skills(self.roles.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_model::{NodeId, PersonId, RoleId};

    fn roles() -> Vec<Role> {
        vec![
            Role::new(RoleId::from("r1"), "Operator").with_skills(["cnc", "safety"]),
            Role::new(RoleId::from("r2"), "Inspector").with_skills(["safety", "metrology"]),
        ]
    }

    fn personnel() -> Vec<Person> {
        vec![Person::new(PersonId::from("p1"), "Lin")]
    }

    #[test]
    fn vacancy_requires_roles_and_no_people() {
        let roles = roles();
        let personnel = personnel();

        let empty = Node::new(NodeId::from("n0"), "Empty");
        assert!(!has_vacancy(&empty, &roles, &personnel));

        let vacant = Node::new(NodeId::from("n1"), "Cell").with_roles([RoleId::from("r1")]);
        assert!(has_vacancy(&vacant, &roles, &personnel));

        let filled = vacant.clone().with_personnel([PersonId::from("p1")]);
        assert!(!has_vacancy(&filled, &roles, &personnel));
    }

    #[test]
    fn dangling_references_are_filtered() {
        let roles = roles();
        let personnel = personnel();

        // Role reference resolves to nothing: not a vacancy
        let node = Node::new(NodeId::from("n1"), "Cell").with_roles([RoleId::from("deleted")]);
        assert!(!has_vacancy(&node, &roles, &personnel));

        // Person reference resolves to nothing: still vacant
        let node = Node::new(NodeId::from("n2"), "Cell")
            .with_roles([RoleId::from("r2")])
            .with_personnel([PersonId::from("gone")]);
        assert!(has_vacancy(&node, &roles, &personnel));
    }

    #[test]
    fn required_skills_collapse_duplicates() {
        let roles = roles();
        let node = Node::new(NodeId::from("n1"), "Cell")
            .with_roles([RoleId::from("r1"), RoleId::from("r2")]);
        let assignment = NodeAssignment::resolve(&node, &roles, &[]);

        let skills: Vec<_> = assignment.required_skills().into_iter().collect();
        assert_eq!(skills, vec!["cnc", "metrology", "safety"]);
    }
}
