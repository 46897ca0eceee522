//! orgd Model
//!
//! Typed entities for organizational redesign.
//!
//! # Overview
//!
//! The model provides:
//! - **Ids**: string newtypes for roles, personnel, nodes, competencies and transitions
//! - **Entities**: [`Role`], [`Person`], [`Node`], [`Connection`], [`Competency`]
//! - **Closed enums**: [`ExperienceTier`] and [`AvailabilityStatus`], so every
//!   scoring lookup is an exhaustive `match`
//!
//! Vacancy is never stored on a [`Node`]; it is derived by `orgd-matching`.
//!
//! # Example
//!
//! ```rust
//! use orgd_model::{ExperienceTier, Node, NodeId, Person, PersonId};
//!
//! let mut node = Node::new(NodeId::from("n1"), "Plant Manager");
//! let person = Person::new(PersonId::from("p1"), "Ada")
//!     .with_experience(ExperienceTier::Management);
//!
//! assert!(node.assign_person(person.id.clone()));
//! assert!(!node.assign_person(person.id));
//! ```

#![warn(missing_docs)]

pub mod entities;
pub mod error;
pub mod ids;
pub mod serde_helpers;
pub mod types;

// Re-exports
pub use entities::{
    Competency, CompetencyLevels, CompetencyRequirement, Connection, Node, Person, Position, Role,
    Transition,
};
pub use error::ModelError;
pub use ids::{CompetencyId, FactoryId, NodeId, PersonId, RoleId, TransitionId};
pub use types::{AvailabilityStatus, ExperienceTier, Phase, TransitionStatus};

/// Highest competency level on the 1-5 proficiency scale
pub const MAX_COMPETENCY_LEVEL: u8 = 5;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the org model
    pub use crate::{
        AvailabilityStatus, Competency, CompetencyId, CompetencyRequirement, Connection,
        ExperienceTier, FactoryId, Node, NodeId, Person, PersonId, Phase, Role, RoleId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
