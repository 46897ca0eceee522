//! Workspace configuration, loaded from TOML
//!
//! ```toml
//! [store]
//! factories = ["plant-a", "plant-b"]
//! cascade_deletes = false
//! notification_capacity = 64
//! match_cache_capacity = 1024
//!
//! [matching]
//! per_skill = 20
//! leadership_bonus = 30
//!
//! [analytics]
//! wide_span_threshold = 8
//! ```

use crate::error::ConfigError;
use orgd_matching::MatchWeights;
use orgd_model::FactoryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Default configuration file looked up by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "orgd.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgdConfig {
    /// Store behaviour
    pub store: StoreConfig,
    /// Match scoring weights
    pub matching: MatchWeights,
    /// Analytics thresholds
    pub analytics: AnalyticsSettings,
}

impl OrgdConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With store section
    #[inline]
    #[must_use]
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// With matching weights
    #[inline]
    #[must_use]
    pub fn with_matching(mut self, weights: MatchWeights) -> Self {
        self.matching = weights;
        self
    }

    /// With analytics section
    #[inline]
    #[must_use]
    pub fn with_analytics(mut self, analytics: AnalyticsSettings) -> Self {
        self.analytics = analytics;
        self
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check values that parse but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;
        if self.analytics.wide_span_threshold == 0 {
            return Err(ConfigError::Invalid(
                "analytics.wide_span_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Store section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Factories the store keeps charts for
    pub factories: Vec<FactoryId>,
    /// Retract removed roles, people and nodes from everything referencing them
    pub cascade_deletes: bool,
    /// Queued notifications kept before the oldest is dropped
    pub notification_capacity: usize,
    /// Entries kept by the badge-count cache
    pub match_cache_capacity: u64,
}

impl StoreConfig {
    /// Create default store configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With factory list
    #[must_use]
    pub fn with_factories<I, F>(mut self, factories: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FactoryId>,
    {
        self.factories = factories.into_iter().map(Into::into).collect();
        self
    }

    /// With cascading deletes
    #[inline]
    #[must_use]
    pub fn with_cascade_deletes(mut self, cascade: bool) -> Self {
        self.cascade_deletes = cascade;
        self
    }

    /// With notification capacity
    #[inline]
    #[must_use]
    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity;
        self
    }

    /// With badge-count cache capacity
    #[inline]
    #[must_use]
    pub fn with_match_cache_capacity(mut self, capacity: u64) -> Self {
        self.match_cache_capacity = capacity;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.factories.is_empty() {
            return Err(ConfigError::Invalid("store.factories must not be empty".into()));
        }
        let mut seen = BTreeSet::new();
        for factory in &self.factories {
            if factory.as_str().trim().is_empty() {
                return Err(ConfigError::Invalid("factory ids must not be blank".into()));
            }
            if !seen.insert(factory) {
                return Err(ConfigError::Invalid(format!("duplicate factory: {factory}")));
            }
        }
        if self.notification_capacity == 0 {
            return Err(ConfigError::Invalid(
                "store.notification_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            factories: vec![FactoryId::from("default")],
            cascade_deletes: false,
            notification_capacity: 64,
            match_cache_capacity: orgd_matching::MatchCountCache::DEFAULT_CAPACITY,
        }
    }
}

/// Analytics section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Span of control above which a manager is flagged
    pub wide_span_threshold: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            wide_span_threshold: 8,
        }
    }
}
