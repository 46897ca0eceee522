//! Org-chart store for orgd
//!
//! # Overview
//!
//! The store holds one [`OrgChart`] per factory and phase. It provides:
//! - **Actions**: every mutation is an [`Action`] applied by [`OrgStore::dispatch`]
//! - **Selectors**: read-only views such as [`selectors::vacant_nodes`]
//! - **Search**: text and filter queries via [`search::search`]
//! - **Snapshots**: JSON import/export of every chart
//! - **Integrity**: dangling-reference checks via [`check_integrity`]
//! - **Configuration**: [`OrgdConfig`] loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use orgd_store::{selectors, Action, OrgStore};
//! use orgd_model::{FactoryId, Node, NodeId, Phase, Role, RoleId};
//!
//! let mut store = OrgStore::default();
//! let factory = FactoryId::from("default");
//!
//! store.dispatch(&factory, Phase::Current, Action::AddRole(
//!     Role::new(RoleId::from("r1"), "Operator").with_skills(["cnc"]),
//! )).unwrap();
//! store.dispatch(&factory, Phase::Current, Action::AddNode(
//!     Node::new(NodeId::from("n1"), "Cell 1").with_roles([RoleId::from("r1")]),
//! )).unwrap();
//!
//! let vacant = selectors::vacant_nodes(&store, &factory, Phase::Current);
//! assert_eq!(vacant.len(), 1);
//! ```

pub mod action;
pub mod chart;
pub mod config;
pub mod error;
pub mod integrity;
pub mod notification;
pub mod search;
pub mod selectors;
pub mod snapshot;
pub mod store;

pub use action::Action;
pub use chart::{ChartKey, OrgChart};
pub use config::{AnalyticsSettings, OrgdConfig, StoreConfig, DEFAULT_CONFIG_FILE};
pub use error::{ConfigError, EntityKind, SnapshotError, StoreError};
pub use integrity::{check_integrity, DanglingReference, IntegrityReport};
pub use notification::{Notification, NotificationLevel, NotificationQueue};
pub use search::{SearchQuery, SearchResults};
pub use selectors::NodeView;
pub use snapshot::{Snapshot, REQUIRED_KEYS, SNAPSHOT_VERSION};
pub use store::OrgStore;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the store
    pub use crate::{
        selectors, Action, ChartKey, OrgChart, OrgStore, OrgdConfig, SearchQuery, StoreConfig,
        StoreError,
    };
}

/// Version of the store crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
