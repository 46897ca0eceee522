//! The store: every chart, keyed by factory and phase

use crate::action::Action;
use crate::chart::{ChartKey, OrgChart};
use crate::config::{OrgdConfig, StoreConfig};
use crate::error::{SnapshotError, StoreError};
use crate::notification::{Notification, NotificationQueue};
use crate::snapshot::{Snapshot, SNAPSHOT_VERSION};
use orgd_matching::{MatchEngine, MatchWeights};
use orgd_model::{FactoryId, Phase};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Typed application state
///
/// Mutated only through [`OrgStore::dispatch`] and snapshot import. Each
/// chart carries a personnel revision, bumped whenever its personnel
/// collection may have changed, that keys the engine's badge-count cache.
#[derive(Debug)]
pub struct OrgStore {
    config: StoreConfig,
    factories: Vec<FactoryId>,
    charts: BTreeMap<ChartKey, OrgChart>,
    revision: u64,
    personnel_revisions: BTreeMap<ChartKey, u64>,
    engine: MatchEngine,
    notifications: NotificationQueue,
}

impl OrgStore {
    /// Create store with an empty chart per configured factory and phase
    #[must_use]
    pub fn new(config: StoreConfig, weights: MatchWeights) -> Self {
        let engine = MatchEngine::new(weights, config.match_cache_capacity);
        let notifications = NotificationQueue::new(config.notification_capacity);
        let factories = config.factories.clone();

        let mut store = Self {
            config,
            factories: Vec::new(),
            charts: BTreeMap::new(),
            revision: 0,
            personnel_revisions: BTreeMap::new(),
            engine,
            notifications,
        };
        for factory in factories {
            store.register_factory(factory);
        }
        store
    }

    /// Create store from the full configuration
    #[must_use]
    pub fn from_config(config: &OrgdConfig) -> Self {
        Self::new(config.store.clone(), config.matching)
    }

    /// Store configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Known factories, configured ones first
    #[inline]
    #[must_use]
    pub fn factories(&self) -> &[FactoryId] {
        &self.factories
    }

    /// Whether the factory is known
    #[must_use]
    pub fn has_factory(&self, factory: &FactoryId) -> bool {
        self.factories.contains(factory)
    }

    /// Matching engine
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Chart for a factory and phase
    pub fn chart(&self, factory: &FactoryId, phase: Phase) -> Option<&OrgChart> {
        self.charts.get(&ChartKey::new(factory.clone(), phase))
    }

    /// Every chart, ordered by key
    pub fn charts(&self) -> impl Iterator<Item = (&ChartKey, &OrgChart)> {
        self.charts.iter()
    }

    /// Personnel revision of a chart
    ///
    /// Differs from every earlier value whenever the chart's personnel
    /// collection may have changed.
    #[must_use]
    pub fn personnel_revision(&self, factory: &FactoryId, phase: Phase) -> u64 {
        self.personnel_revisions
            .get(&ChartKey::new(factory.clone(), phase))
            .copied()
            .unwrap_or(0)
    }

    fn register_factory(&mut self, factory: FactoryId) {
        if self.factories.contains(&factory) {
            return;
        }
        for phase in Phase::ALL {
            let key = ChartKey::new(factory.clone(), phase);
            self.charts.entry(key.clone()).or_default();
            self.bump(&key);
        }
        self.factories.push(factory);
    }

    fn bump(&mut self, key: &ChartKey) {
        self.revision += 1;
        self.personnel_revisions.insert(key.clone(), self.revision);
    }

    fn ensure_factory(&self, factory: &FactoryId) -> Result<(), StoreError> {
        if self.has_factory(factory) {
            Ok(())
        } else {
            Err(StoreError::UnknownFactory(factory.clone()))
        }
    }

    /// Replace a chart wholesale
    pub fn replace_chart(
        &mut self,
        factory: &FactoryId,
        phase: Phase,
        chart: OrgChart,
    ) -> Result<(), StoreError> {
        self.ensure_factory(factory)?;
        let key = ChartKey::new(factory.clone(), phase);
        self.charts.insert(key.clone(), chart);
        self.bump(&key);
        Ok(())
    }

    /// Apply an action to the chart of `factory` in `phase`
    ///
    /// `ClonePhase` names its own phases; `phase` is ignored for it.
    pub fn dispatch(
        &mut self,
        factory: &FactoryId,
        phase: Phase,
        action: Action,
    ) -> Result<(), StoreError> {
        self.ensure_factory(factory)?;
        let name = action.name();

        if let Action::ClonePhase { from, to } = action {
            if from != to {
                let copy = self
                    .chart(factory, from)
                    .cloned()
                    .unwrap_or_default();
                let key = ChartKey::new(factory.clone(), to);
                self.charts.insert(key.clone(), copy);
                self.bump(&key);
            }
            debug!(%factory, %from, %to, "cloned phase");
            return Ok(());
        }

        let key = ChartKey::new(factory.clone(), phase);
        let touches_personnel = action.touches_personnel();
        let cascade = self.config.cascade_deletes;

        let result = self.charts.entry(key.clone()).or_default().apply(action, cascade);
        match &result {
            Ok(()) => {
                if touches_personnel {
                    self.bump(&key);
                }
                debug!(chart = %key, action = name, "applied action");
            }
            Err(err) => debug!(chart = %key, action = name, error = %err, "rejected action"),
        }
        result
    }

    /// Queue a notification
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Queued notifications, oldest first
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Drain queued notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Capture every chart
    #[must_use]
    pub fn export_snapshot(&self) -> Snapshot {
        let snapshot = Snapshot::capture(&self.charts);
        info!(charts = self.charts.len(), "exported snapshot");
        snapshot
    }

    /// Replace every chart with the content of snapshot text
    ///
    /// On failure an error notification is queued and the store is left as it
    /// was. A version tag other than the current one is accepted with a warning.
    pub fn import_snapshot(&mut self, text: &str) -> Result<(), SnapshotError> {
        let snapshot = match Snapshot::parse(text) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "snapshot import failed");
                self.notify(Notification::error(format!("Import failed: {err}")));
                return Err(err);
            }
        };
        self.install(snapshot);
        Ok(())
    }

    fn install(&mut self, snapshot: Snapshot) {
        if !snapshot.is_current_version() {
            warn!(found = %snapshot.version, expected = SNAPSHOT_VERSION, "snapshot version mismatch");
            self.notify(Notification::warning(format!(
                "Snapshot version {} differs from {SNAPSHOT_VERSION}; imported anyway",
                snapshot.version
            )));
        }

        let imported = snapshot.into_charts();
        let chart_count = imported.len();

        let mut factories = self.config.factories.clone();
        for key in imported.keys() {
            if !factories.contains(&key.factory) {
                info!(factory = %key.factory, "registering factory from snapshot");
                factories.push(key.factory.clone());
            }
        }

        let mut charts = imported;
        for factory in &factories {
            for phase in Phase::ALL {
                charts.entry(ChartKey::new(factory.clone(), phase)).or_default();
            }
        }

        self.charts = charts;
        self.factories = factories;
        let keys: Vec<ChartKey> = self.charts.keys().cloned().collect();
        for key in &keys {
            self.bump(key);
        }
        self.engine.cache().invalidate_all();

        info!(charts = chart_count, factories = self.factories.len(), "imported snapshot");
        self.notify(Notification::info(format!("Imported {chart_count} charts")));
    }

    /// Write a snapshot file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = self.export_snapshot().to_json()?;
        std::fs::write(path, json).map_err(|e| SnapshotError::io_error(path, e))?;
        info!(path = %path.display(), "saved snapshot");
        Ok(())
    }

    /// Read and import a snapshot file
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                let err = SnapshotError::io_error(path, e);
                warn!(error = %err, "snapshot load failed");
                self.notify(Notification::error(format!("Import failed: {err}")));
                return Err(err);
            }
        };
        self.import_snapshot(&text)
    }
}

impl Default for OrgStore {
    fn default() -> Self {
        Self::new(StoreConfig::default(), MatchWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgd_model::{NodeId, Person, PersonId};
    use orgd_test_utils::{plant_connections, plant_nodes, plant_personnel, plant_roles};
    use pretty_assertions::assert_eq;

    fn factory() -> FactoryId {
        FactoryId::from("default")
    }

    fn seeded() -> OrgStore {
        let mut store = OrgStore::default();
        store
            .replace_chart(
                &factory(),
                Phase::Current,
                OrgChart::new()
                    .with_roles(plant_roles())
                    .with_personnel(plant_personnel())
                    .with_nodes(plant_nodes())
                    .with_connections(plant_connections()),
            )
            .unwrap();
        store
    }

    #[test]
    fn new_store_has_both_phases() {
        let store = OrgStore::default();
        assert!(store.chart(&factory(), Phase::Current).unwrap().is_empty());
        assert!(store.chart(&factory(), Phase::Future).unwrap().is_empty());
        assert!(store.chart(&FactoryId::from("elsewhere"), Phase::Current).is_none());
    }

    #[test]
    fn unknown_factory_is_rejected() {
        let mut store = OrgStore::default();
        let err = store
            .dispatch(
                &FactoryId::from("elsewhere"),
                Phase::Current,
                Action::RemoveNode(NodeId::from("n")),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownFactory(_)));
    }

    #[test]
    fn personnel_changes_bump_revision() {
        let mut store = seeded();
        let before = store.personnel_revision(&factory(), Phase::Current);

        store
            .dispatch(
                &factory(),
                Phase::Current,
                Action::RenameNode {
                    node: NodeId::from("n-ops"),
                    title: "Production".into(),
                },
            )
            .unwrap();
        assert_eq!(store.personnel_revision(&factory(), Phase::Current), before);

        store
            .dispatch(
                &factory(),
                Phase::Current,
                Action::AddPerson(Person::new(PersonId::from("p-gus"), "Gus")),
            )
            .unwrap();
        assert!(store.personnel_revision(&factory(), Phase::Current) > before);
    }

    #[test]
    fn clone_phase_copies_current_into_future() {
        let mut store = seeded();
        store
            .dispatch(
                &factory(),
                Phase::Future,
                Action::ClonePhase {
                    from: Phase::Current,
                    to: Phase::Future,
                },
            )
            .unwrap();

        assert_eq!(
            store.chart(&factory(), Phase::Future),
            store.chart(&factory(), Phase::Current)
        );

        store
            .dispatch(&factory(), Phase::Future, Action::RemoveNode(NodeId::from("n-spare")))
            .unwrap();
        assert_ne!(
            store.chart(&factory(), Phase::Future),
            store.chart(&factory(), Phase::Current)
        );
    }

    #[test]
    fn failed_import_queues_error_and_keeps_state() {
        let mut store = seeded();
        let before = store.chart(&factory(), Phase::Current).cloned();

        let err = store.import_snapshot("not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
        assert_eq!(store.chart(&factory(), Phase::Current).cloned(), before);

        let notes = store.take_notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].is_error());
        assert!(store.take_notifications().is_empty());
    }

    #[test]
    fn version_mismatch_imports_with_warning() {
        let mut store = OrgStore::default();
        let text = r#"{
            "version": "0.9",
            "roles": {}, "personnel": {}, "nodes": { "default": { "current": [{ "id": "n1" }] } },
            "connections": {}
        }"#;
        store.import_snapshot(text).unwrap();

        assert_eq!(store.chart(&factory(), Phase::Current).unwrap().nodes.len(), 1);
        let notes = store.take_notifications();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].level, crate::NotificationLevel::Warning);
    }

    #[test]
    fn import_registers_new_factories() {
        let mut store = OrgStore::default();
        let text = r#"{ "version": "1.0", "roles": { "plant-b": { "future": [] } },
                        "personnel": {}, "nodes": {}, "connections": {} }"#;
        store.import_snapshot(text).unwrap();

        assert!(store.has_factory(&FactoryId::from("plant-b")));
        assert!(store.chart(&FactoryId::from("plant-b"), Phase::Current).is_some());
        assert!(store.chart(&factory(), Phase::Current).unwrap().is_empty());
    }
}
