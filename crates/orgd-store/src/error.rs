//! Error types for the store
//!
//! Provides error handling for:
//! - Dispatched actions (unknown ids, duplicates, bad indices)
//! - Snapshot import/export
//! - Configuration loading

use orgd_model::{FactoryId, ModelError, NodeId, TransitionId};
use serde::Serialize;
use std::path::PathBuf;

/// Kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A role
    Role,
    /// A person
    Person,
    /// An org-chart node
    Node,
    /// A competency
    Competency,
    /// A transition plan
    Transition,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EntityKind::Role => "role",
            EntityKind::Person => "person",
            EntityKind::Node => "node",
            EntityKind::Competency => "competency",
            EntityKind::Transition => "transition",
        })
    }
}

/// Errors from dispatching an action
///
/// An action that fails leaves the store exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Factory is not configured
    #[error("unknown factory: {0}")]
    UnknownFactory(FactoryId),

    /// Entity id already taken
    #[error("{kind} already exists: {id}")]
    DuplicateId {
        /// Entity kind
        kind: EntityKind,
        /// Offending id
        id: String,
    },

    /// Entity id not found
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind
        kind: EntityKind,
        /// Missing id
        id: String,
    },

    /// Reporting line from a node to itself
    #[error("node cannot report to itself: {0}")]
    SelfConnection(NodeId),

    /// Entity is not placed on the node an action moves it from
    #[error("{kind} {id} is not assigned to node {node}")]
    NotOnNode {
        /// Entity kind
        kind: EntityKind,
        /// Entity id
        id: String,
        /// Node searched
        node: NodeId,
    },

    /// Reorder index outside the list
    #[error("index {index} out of range for list of {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// List length
        len: usize,
    },

    /// Completed or cancelled transitions cannot change status
    #[error("transition already closed: {0}")]
    TransitionClosed(TransitionId),

    /// Invalid model value
    #[error("invalid value: {0}")]
    Model(#[from] ModelError),
}

impl StoreError {
    /// Create not-found error
    #[inline]
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Create duplicate-id error
    #[inline]
    pub fn duplicate(kind: EntityKind, id: impl ToString) -> Self {
        Self::DuplicateId {
            kind,
            id: id.to_string(),
        }
    }

    /// Check if error reports a missing entity or factory
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::UnknownFactory(_))
    }
}

/// Errors during snapshot import/export
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Input is not valid JSON
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Top level is not a JSON object
    #[error("snapshot must be a JSON object")]
    NotAnObject,

    /// Required top-level key absent
    #[error("snapshot is missing required key '{0}'")]
    MissingKey(&'static str),

    /// Keys present but content does not decode
    #[error("snapshot content is malformed: {0}")]
    Decode(#[source] serde_json::Error),

    /// Serialization failed
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// IO error reading or writing a snapshot file
    #[error("io error on {path}: {source}")]
    Io {
        /// File concerned
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure came from the snapshot's content rather than the system
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Encode(_))
    }
}

/// Errors loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File concerned
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the config schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parse but are unusable
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::not_found(EntityKind::Node, "n1");
        assert_eq!(err.to_string(), "node not found: n1");
        assert!(err.is_not_found());

        let err = StoreError::duplicate(EntityKind::Role, "r1");
        assert_eq!(err.to_string(), "role already exists: r1");
        assert!(!err.is_not_found());
    }

    #[test]
    fn snapshot_error_classification() {
        assert!(SnapshotError::MissingKey("roles").is_user_facing());
        assert!(!SnapshotError::io_error(
            "x.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone")
        )
        .is_user_facing());
    }

    #[test]
    fn model_errors_convert() {
        let err: StoreError = ModelError::UnknownPhase("past".into()).into();
        assert!(err.to_string().contains("unknown phase"));
    }
}
