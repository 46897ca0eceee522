//! Org-chart entities
//!
//! Plain data records. Lists that come from user-edited snapshots are decoded
//! leniently (see [`crate::serde_helpers::lenient_vec`]).

use crate::error::ModelError;
use crate::ids::{CompetencyId, NodeId, PersonId, RoleId, TransitionId};
use crate::serde_helpers::lenient_vec;
use crate::types::{AvailabilityStatus, ExperienceTier, TransitionStatus};
use crate::MAX_COMPETENCY_LEVEL;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A role that can be placed on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role id
    pub id: RoleId,
    /// Role title, e.g. "Maintenance Manager"
    #[serde(default)]
    pub title: String,
    /// Owning department
    #[serde(default)]
    pub department: String,
    /// Skills the role requires
    #[serde(default, deserialize_with = "lenient_vec")]
    pub skills: Vec<String>,
    /// Organizational level (0 = unspecified)
    #[serde(default)]
    pub level: u8,
}

impl Role {
    /// Create role with no skills
    #[must_use]
    pub fn new(id: RoleId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            department: String::new(),
            skills: Vec::new(),
            level: 0,
        }
    }

    /// With department
    #[inline]
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// With required skills
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// With organizational level
    #[inline]
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }
}

/// A member of personnel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Person id
    pub id: PersonId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Free-text label of the role currently held
    #[serde(default)]
    pub current_role: String,
    /// Availability for reassignment
    #[serde(default)]
    pub availability: AvailabilityStatus,
    /// Experience tier
    #[serde(default)]
    pub experience: ExperienceTier,
    /// Skills held
    #[serde(default, deserialize_with = "lenient_vec")]
    pub skills: Vec<String>,
}

impl Person {
    /// Create person with unknown availability and experience
    #[must_use]
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            current_role: String::new(),
            availability: AvailabilityStatus::Unknown,
            experience: ExperienceTier::Unrecognized,
            skills: Vec::new(),
        }
    }

    /// With current role label
    #[inline]
    #[must_use]
    pub fn with_current_role(mut self, role: impl Into<String>) -> Self {
        self.current_role = role.into();
        self
    }

    /// With availability
    #[inline]
    #[must_use]
    pub fn with_availability(mut self, availability: AvailabilityStatus) -> Self {
        self.availability = availability;
        self
    }

    /// With experience tier
    #[inline]
    #[must_use]
    pub fn with_experience(mut self, experience: ExperienceTier) -> Self {
        self.experience = experience;
        self
    }

    /// With skills
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the person lists this exact skill
    #[inline]
    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// Canvas coordinates of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset
    #[serde(default)]
    pub x: f64,
    /// Vertical offset
    #[serde(default)]
    pub y: f64,
}

impl Position {
    /// Create position
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A position box in the org chart
///
/// Holds ordered references to roles and personnel. References are not
/// checked against the collections; lookups filter out ids that resolve to
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node id
    pub id: NodeId,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Canvas position, flattened to `x`/`y`
    #[serde(flatten)]
    pub position: Position,
    /// Assigned roles, in display order
    #[serde(default, deserialize_with = "lenient_vec")]
    pub role_ids: Vec<RoleId>,
    /// Assigned personnel, in display order
    #[serde(default, deserialize_with = "lenient_vec")]
    pub personnel_ids: Vec<PersonId>,
}

impl Node {
    /// Create empty node at the origin
    #[must_use]
    pub fn new(id: NodeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            position: Position::default(),
            role_ids: Vec::new(),
            personnel_ids: Vec::new(),
        }
    }

    /// At position
    #[inline]
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// With roles
    #[must_use]
    pub fn with_roles<I: IntoIterator<Item = RoleId>>(mut self, roles: I) -> Self {
        for role in roles {
            self.assign_role(role);
        }
        self
    }

    /// With personnel
    #[must_use]
    pub fn with_personnel<I: IntoIterator<Item = PersonId>>(mut self, personnel: I) -> Self {
        for person in personnel {
            self.assign_person(person);
        }
        self
    }

    /// Whether the role is referenced
    #[inline]
    #[must_use]
    pub fn has_role(&self, role: &RoleId) -> bool {
        self.role_ids.contains(role)
    }

    /// Whether the person is referenced
    #[inline]
    #[must_use]
    pub fn has_person(&self, person: &PersonId) -> bool {
        self.personnel_ids.contains(person)
    }

    /// Append role; returns `false` if already present
    pub fn assign_role(&mut self, role: RoleId) -> bool {
        if self.has_role(&role) {
            return false;
        }
        self.role_ids.push(role);
        true
    }

    /// Remove role; returns `false` if absent
    pub fn unassign_role(&mut self, role: &RoleId) -> bool {
        let before = self.role_ids.len();
        self.role_ids.retain(|r| r != role);
        self.role_ids.len() != before
    }

    /// Append person; returns `false` if already present
    pub fn assign_person(&mut self, person: PersonId) -> bool {
        if self.has_person(&person) {
            return false;
        }
        self.personnel_ids.push(person);
        true
    }

    /// Remove person; returns `false` if absent
    pub fn unassign_person(&mut self, person: &PersonId) -> bool {
        let before = self.personnel_ids.len();
        self.personnel_ids.retain(|p| p != person);
        self.personnel_ids.len() != before
    }
}

/// Reporting line from a manager node to a report node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Manager node
    #[serde(rename = "sourceNodeId", alias = "source")]
    pub source: NodeId,
    /// Reporting node
    #[serde(rename = "targetNodeId", alias = "target")]
    pub target: NodeId,
}

impl Connection {
    /// Create connection
    #[inline]
    #[must_use]
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Whether the line touches the node at either end
    #[inline]
    #[must_use]
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}

/// Catalogue entry for a competency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competency {
    /// Competency id
    pub id: CompetencyId,
    /// Display name
    pub name: String,
    /// Grouping, e.g. "Technical"
    #[serde(default)]
    pub category: String,
    /// Description
    #[serde(default)]
    pub description: String,
}

impl Competency {
    /// Create competency
    #[must_use]
    pub fn new(id: CompetencyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: String::new(),
            description: String::new(),
        }
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

fn default_weight() -> f64 {
    1.0
}

/// A competency a role requires, with minimum proficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyRequirement {
    /// Required competency
    pub competency_id: CompetencyId,
    /// Minimum proficiency, 1..=5
    pub minimum_level: u8,
    /// Essential competencies sort first in gap lists
    #[serde(default, rename = "isEssential", alias = "essential")]
    pub essential: bool,
    /// Relative weight in the match score
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl CompetencyRequirement {
    /// Create a non-essential requirement
    ///
    /// # Errors
    /// - `ModelError::LevelOutOfRange` if `minimum_level` is not 1..=5
    /// - `ModelError::InvalidWeight` if `weight` is negative or not finite
    pub fn new(
        competency_id: CompetencyId,
        minimum_level: u8,
        weight: f64,
    ) -> Result<Self, ModelError> {
        if !(1..=MAX_COMPETENCY_LEVEL).contains(&minimum_level) {
            return Err(ModelError::LevelOutOfRange {
                level: minimum_level,
                min: 1,
                max: MAX_COMPETENCY_LEVEL,
            });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(ModelError::InvalidWeight(weight));
        }
        Ok(Self {
            competency_id,
            minimum_level,
            essential: false,
            weight,
        })
    }

    /// Mark essential
    #[inline]
    #[must_use]
    pub fn essential(mut self) -> Self {
        self.essential = true;
        self
    }
}

/// Acquired competency levels of one person
///
/// Absent competencies read as level 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetencyLevels(pub BTreeMap<CompetencyId, u8>);

impl CompetencyLevels {
    /// Empty set of levels
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Level for competency, 0 if never acquired
    #[inline]
    #[must_use]
    pub fn level(&self, competency: &CompetencyId) -> u8 {
        self.0.get(competency).copied().unwrap_or(0)
    }

    /// Record a level; 0 clears the entry
    ///
    /// # Errors
    /// - `ModelError::LevelOutOfRange` if `level` exceeds 5
    pub fn set(&mut self, competency: CompetencyId, level: u8) -> Result<(), ModelError> {
        if level > MAX_COMPETENCY_LEVEL {
            return Err(ModelError::LevelOutOfRange {
                level,
                min: 0,
                max: MAX_COMPETENCY_LEVEL,
            });
        }
        if level == 0 {
            self.0.remove(&competency);
        } else {
            self.0.insert(competency, level);
        }
        Ok(())
    }

    /// Builder form of [`CompetencyLevels::set`] for fixtures
    ///
    /// # Errors
    /// Same as [`CompetencyLevels::set`].
    pub fn with(mut self, competency: impl Into<CompetencyId>, level: u8) -> Result<Self, ModelError> {
        self.set(competency.into(), level)?;
        Ok(self)
    }
}

/// Planned move of a person between positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Transition id
    pub id: TransitionId,
    /// Person moving
    pub person_id: PersonId,
    /// Position left, if any
    #[serde(default)]
    pub from_node: Option<NodeId>,
    /// Position taken, if any
    #[serde(default)]
    pub to_node: Option<NodeId>,
    /// Progress
    #[serde(default)]
    pub status: TransitionStatus,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Transition {
    /// Plan a new transition, stamped now
    #[must_use]
    pub fn plan(person_id: PersonId, from_node: Option<NodeId>, to_node: Option<NodeId>) -> Self {
        Self {
            id: TransitionId::generate(),
            person_id,
            from_node,
            to_node,
            status: TransitionStatus::Planned,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// With notes
    #[inline]
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether the transition references the node at either end
    #[must_use]
    pub fn touches(&self, node: &NodeId) -> bool {
        self.from_node.as_ref() == Some(node) || self.to_node.as_ref() == Some(node)
    }
}
