//! Text search and filtering over one chart

use crate::store::OrgStore;
use orgd_matching::NodeAssignment;
use orgd_model::{AvailabilityStatus, ExperienceTier, FactoryId, Node, Person, Phase, Role};
use serde::Serialize;

/// Search criteria; every set criterion must hold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Case-insensitive substring, lowercased by [`SearchQuery::with_text`]
    pub text: Option<String>,
    /// Personnel availability
    pub availability: Option<AvailabilityStatus>,
    /// Personnel experience tier
    pub experience: Option<ExperienceTier>,
    /// Role department (case-insensitive); nodes match through their roles
    pub department: Option<String>,
    /// Only vacant nodes
    pub vacant_only: bool,
}

impl SearchQuery {
    /// Match everything
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = (!text.trim().is_empty()).then(|| text.trim().to_lowercase());
        self
    }

    /// With availability filter
    #[inline]
    #[must_use]
    pub fn with_availability(mut self, availability: AvailabilityStatus) -> Self {
        self.availability = Some(availability);
        self
    }

    /// With experience filter
    #[inline]
    #[must_use]
    pub fn with_experience(mut self, experience: ExperienceTier) -> Self {
        self.experience = Some(experience);
        self
    }

    /// With department filter
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Only vacant nodes
    #[inline]
    #[must_use]
    pub fn vacant_only(mut self) -> Self {
        self.vacant_only = true;
        self
    }

    fn text_matches<'s>(&self, fields: impl IntoIterator<Item = &'s str>) -> bool {
        match &self.text {
            None => true,
            Some(needle) => fields
                .into_iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }

    fn department_matches(&self, department: &str) -> bool {
        self.department
            .as_deref()
            .map_or(true, |wanted| {
                wanted.trim().to_lowercase() == department.trim().to_lowercase()
            })
    }

    fn person_matches(&self, person: &Person) -> bool {
        self.availability
            .as_ref()
            .map_or(true, |a| *a == person.availability)
            && self
                .experience
                .as_ref()
                .map_or(true, |e| *e == person.experience)
            && self.text_matches(
                [person.name.as_str(), person.current_role.as_str()]
                    .into_iter()
                    .chain(person.skills.iter().map(String::as_str)),
            )
    }

    fn role_matches(&self, role: &Role) -> bool {
        self.department_matches(&role.department)
            && self.text_matches(
                [role.title.as_str(), role.department.as_str()]
                    .into_iter()
                    .chain(role.skills.iter().map(String::as_str)),
            )
    }

    fn filters_personnel(&self) -> bool {
        self.availability.is_some() || self.experience.is_some()
    }

    fn filters_roles(&self) -> bool {
        self.department.is_some()
    }
}

/// Matching entities, each in collection order
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults<'a> {
    /// Matching roles
    pub roles: Vec<&'a Role>,
    /// Matching people
    pub personnel: Vec<&'a Person>,
    /// Matching nodes
    pub nodes: Vec<&'a Node>,
}

impl SearchResults<'_> {
    /// Total hits
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len() + self.personnel.len() + self.nodes.len()
    }

    /// Whether nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Search roles, personnel and nodes of a chart
///
/// Personnel filters (availability, experience) exclude roles and nodes
/// from the results; role filters (department, vacancy) exclude personnel.
/// A node matches text on its title or on any assigned role or person.
pub fn search<'a>(
    store: &'a OrgStore,
    factory: &FactoryId,
    phase: Phase,
    query: &SearchQuery,
) -> SearchResults<'a> {
    let Some(chart) = store.chart(factory, phase) else {
        return SearchResults::default();
    };

    let personnel = if query.filters_roles() || query.vacant_only {
        Vec::new()
    } else {
        chart.personnel.iter().filter(|p| query.person_matches(p)).collect()
    };

    if query.filters_personnel() {
        return SearchResults {
            personnel,
            ..SearchResults::default()
        };
    }

    let roles = if query.vacant_only {
        Vec::new()
    } else {
        chart.roles.iter().filter(|r| query.role_matches(r)).collect()
    };

    let nodes: Vec<&Node> = chart
        .nodes
        .iter()
        .filter(|node| {
            let assignment = NodeAssignment::resolve(node, &chart.roles, &chart.personnel);
            if query.vacant_only && !assignment.has_vacancy() {
                return false;
            }
            if query.filters_roles()
                && !assignment.roles.iter().any(|r| query.department_matches(&r.department))
            {
                return false;
            }
            query.text_matches([node.title.as_str()])
                || assignment.roles.iter().any(|r| query.text_matches(role_fields(r)))
                || assignment.personnel.iter().any(|p| query.text_matches(person_fields(p)))
        })
        .collect();

    tracing::debug!(
        %factory,
        %phase,
        hits = roles.len() + personnel.len() + nodes.len(),
        "search"
    );

    SearchResults {
        roles,
        personnel,
        nodes,
    }
}

fn role_fields(role: &Role) -> impl Iterator<Item = &str> {
    [role.title.as_str()]
        .into_iter()
        .chain(role.skills.iter().map(String::as_str))
}

fn person_fields(person: &Person) -> impl Iterator<Item = &str> {
    [person.name.as_str()]
        .into_iter()
        .chain(person.skills.iter().map(String::as_str))
}
