//! Testing utilities for orgd workspace
//!
//! Shared fixtures: a small plant org chart and generators for scaled inputs.

#![allow(missing_docs)]

use orgd_model::{
    AvailabilityStatus, Competency, CompetencyId, CompetencyLevels, CompetencyRequirement,
    Connection, ExperienceTier, Node, NodeId, Person, PersonId, Role, RoleId,
};

pub fn role(id: &str, title: &str, skills: &[&str]) -> Role {
    Role::new(RoleId::from(id), title)
        .with_department("Operations")
        .with_skills(skills.iter().copied())
}

pub fn person(
    id: &str,
    name: &str,
    skills: &[&str],
    experience: ExperienceTier,
    availability: AvailabilityStatus,
) -> Person {
    Person::new(PersonId::from(id), name)
        .with_skills(skills.iter().copied())
        .with_experience(experience)
        .with_availability(availability)
}

pub fn node(id: &str, title: &str, roles: &[&str], personnel: &[&str]) -> Node {
    Node::new(NodeId::from(id), title)
        .with_roles(roles.iter().map(|r| RoleId::from(*r)))
        .with_personnel(personnel.iter().map(|p| PersonId::from(*p)))
}

pub fn connection(source: &str, target: &str) -> Connection {
    Connection::new(NodeId::from(source), NodeId::from(target))
}

/// Roles of the sample plant
pub fn plant_roles() -> Vec<Role> {
    vec![
        role("r-pm", "Plant Manager", &["leadership", "budgeting", "lean"]),
        role("r-qm", "Quality Lead", &["iso9001", "metrology"]),
        role("r-mt", "Maintenance Technician", &["plc", "hydraulics"]),
        role("r-op", "Machine Operator", &["cnc", "safety"]),
        role("r-sc", "Scheduler", &[]),
    ]
}

/// Personnel of the sample plant
pub fn plant_personnel() -> Vec<Person> {
    use AvailabilityStatus::{Available, NotAvailable, PartiallyAvailable, Unknown};
    use ExperienceTier::{EntryLevel, Junior, Lead, Management, MidLevel, Senior};

    vec![
        person("p-ada", "Ada Park", &["leadership", "budgeting"], Management, Available),
        person("p-ben", "Ben Ortiz", &["iso9001"], Senior, PartiallyAvailable),
        person("p-cai", "Cai Novak", &["plc", "cnc"], MidLevel, Available),
        person("p-dev", "Dev Rao", &["cnc", "safety"], Junior, Unknown),
        person("p-eli", "Eli Sato", &["metrology", "lean"], Lead, NotAvailable),
        person("p-fay", "Fay Lund", &[], EntryLevel, Available),
    ]
}

/// Nodes of the sample plant
///
/// `n-plant` and `n-ops` are filled; `n-quality` and `n-maint` are vacant;
/// `n-floor` is filled; `n-spare` has no roles.
pub fn plant_nodes() -> Vec<Node> {
    vec![
        node("n-plant", "Plant", &["r-pm"], &["p-ada"]),
        node("n-quality", "Quality", &["r-qm"], &[]),
        node("n-maint", "Maintenance", &["r-mt"], &[]),
        node("n-ops", "Operations", &["r-op", "r-sc"], &["p-dev"]),
        node("n-floor", "Floor", &["r-op"], &["p-fay"]),
        node("n-spare", "Spare", &[], &[]),
    ]
}

/// Reporting lines of the sample plant
pub fn plant_connections() -> Vec<Connection> {
    vec![
        connection("n-plant", "n-quality"),
        connection("n-plant", "n-maint"),
        connection("n-plant", "n-ops"),
        connection("n-ops", "n-floor"),
    ]
}

pub fn competencies() -> Vec<Competency> {
    vec![
        Competency::new(CompetencyId::from("c-spc"), "Statistical process control")
            .with_category("Quality"),
        Competency::new(CompetencyId::from("c-audit"), "Auditing").with_category("Quality"),
    ]
}

pub fn quality_requirements() -> Vec<CompetencyRequirement> {
    vec![
        CompetencyRequirement::new(CompetencyId::from("c-spc"), 4, 5.0).expect("valid requirement"),
        CompetencyRequirement::new(CompetencyId::from("c-audit"), 2, 3.0)
            .expect("valid requirement")
            .essential(),
    ]
}

pub fn ben_levels() -> CompetencyLevels {
    CompetencyLevels::new()
        .with("c-spc", 4)
        .and_then(|l| l.with("c-audit", 1))
        .expect("valid levels")
}

/// `count` people with skills cycling through a pool of 32
pub fn scaled_personnel(count: usize) -> Vec<Person> {
    (0..count)
        .map(|i| {
            let skills = [format!("skill-{}", i % 32), format!("skill-{}", (i * 7) % 32)];
            Person::new(PersonId::from(format!("p-{i}")), format!("Person {i}"))
                .with_skills(skills)
                .with_experience(ExperienceTier::ALL[i % ExperienceTier::ALL.len()].clone())
                .with_availability(AvailabilityStatus::ALL[i % AvailabilityStatus::ALL.len()].clone())
        })
        .collect()
}

/// `count` roles requiring three skills each from the same pool
pub fn scaled_roles(count: usize) -> Vec<Role> {
    (0..count)
        .map(|i| {
            Role::new(RoleId::from(format!("r-{i}")), format!("Role {i}")).with_skills([
                format!("skill-{}", i % 32),
                format!("skill-{}", (i + 1) % 32),
                format!("skill-{}", (i + 2) % 32),
            ])
        })
        .collect()
}
