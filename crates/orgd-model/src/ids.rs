//! Entity identifiers
//!
//! Ids are opaque strings on the wire. Fresh ids are ULIDs so that entities
//! created in one session sort by creation time.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use ulid::Ulid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a fresh, time-sortable id
            #[inline]
            #[must_use]
            pub fn generate() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Borrow the raw id
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Role identifier
    RoleId
);
string_id!(
    /// Person identifier
    PersonId
);
string_id!(
    /// Org-chart node (position) identifier
    NodeId
);
string_id!(
    /// Competency identifier
    CompetencyId
);
string_id!(
    /// Transition plan identifier
    TransitionId
);
string_id!(
    /// Factory (site) identifier; one of a small configured set
    FactoryId
);
