//! JSON snapshot of every chart in the store
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "exportedAt": "2024-05-01T09:30:00Z",
//!   "roles":       { "plant-a": { "current": [..], "future": [..] } },
//!   "personnel":   { .. },
//!   "nodes":       { .. },
//!   "connections": { .. }
//! }
//! ```
//!
//! `competencies`, `roleCompetencies`, `personCompetencies` and `transitions`
//! follow the same factory → phase nesting and may be absent.

use crate::chart::{ChartKey, OrgChart};
use crate::error::SnapshotError;
use chrono::{DateTime, Utc};
use orgd_model::{
    Competency, CompetencyLevels, CompetencyRequirement, Connection, FactoryId, Node, Person,
    PersonId, Phase, Role, RoleId, Transition,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version tag written on export
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Top-level keys an import refuses to do without
pub const REQUIRED_KEYS: [&str; 5] = ["version", "roles", "personnel", "nodes", "connections"];

/// `factory → phase → value`
pub type PerChart<T> = BTreeMap<FactoryId, BTreeMap<Phase, T>>;

/// Serialized form of the store's charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Format version
    pub version: String,
    /// Export time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    /// Role catalogues
    pub roles: PerChart<Vec<Role>>,
    /// Personnel
    pub personnel: PerChart<Vec<Person>>,
    /// Nodes
    pub nodes: PerChart<Vec<Node>>,
    /// Reporting lines
    pub connections: PerChart<Vec<Connection>>,
    /// Competency catalogues
    #[serde(default)]
    pub competencies: PerChart<Vec<Competency>>,
    /// Requirements per role
    #[serde(default)]
    pub role_competencies: PerChart<BTreeMap<RoleId, Vec<CompetencyRequirement>>>,
    /// Levels per person
    #[serde(default)]
    pub person_competencies: PerChart<BTreeMap<PersonId, CompetencyLevels>>,
    /// Planned moves
    #[serde(default)]
    pub transitions: PerChart<Vec<Transition>>,
}

fn put<T>(map: &mut PerChart<T>, key: &ChartKey, value: T) {
    map.entry(key.factory.clone())
        .or_default()
        .insert(key.phase, value);
}

fn take<T>(map: PerChart<T>, charts: &mut BTreeMap<ChartKey, OrgChart>, set: impl Fn(&mut OrgChart, T)) {
    for (factory, phases) in map {
        for (phase, value) in phases {
            let chart = charts
                .entry(ChartKey {
                    factory: factory.clone(),
                    phase,
                })
                .or_default();
            set(chart, value);
        }
    }
}

impl Snapshot {
    /// Capture charts, stamped with the current time
    pub fn capture<'a, I>(charts: I) -> Self
    where
        I: IntoIterator<Item = (&'a ChartKey, &'a OrgChart)>,
    {
        let mut snapshot = Self {
            version: SNAPSHOT_VERSION.to_string(),
            exported_at: Some(Utc::now()),
            roles: BTreeMap::new(),
            personnel: BTreeMap::new(),
            nodes: BTreeMap::new(),
            connections: BTreeMap::new(),
            competencies: BTreeMap::new(),
            role_competencies: BTreeMap::new(),
            person_competencies: BTreeMap::new(),
            transitions: BTreeMap::new(),
        };

        for (key, chart) in charts {
            put(&mut snapshot.roles, key, chart.roles.clone());
            put(&mut snapshot.personnel, key, chart.personnel.clone());
            put(&mut snapshot.nodes, key, chart.nodes.clone());
            put(&mut snapshot.connections, key, chart.connections.clone());
            put(&mut snapshot.competencies, key, chart.competencies.clone());
            put(&mut snapshot.role_competencies, key, chart.role_requirements.clone());
            put(&mut snapshot.person_competencies, key, chart.person_levels.clone());
            put(&mut snapshot.transitions, key, chart.transitions.clone());
        }
        snapshot
    }

    /// Parse snapshot text
    ///
    /// Checks the required top-level keys first, so a missing key is reported
    /// by name rather than as a decode failure.
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(SnapshotError::Parse)?;
        let object = value.as_object().ok_or(SnapshotError::NotAnObject)?;

        if let Some(missing) = REQUIRED_KEYS.iter().copied().find(|k| !object.contains_key(*k)) {
            return Err(SnapshotError::MissingKey(missing));
        }

        serde_json::from_value(value).map_err(SnapshotError::Decode)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Encode)
    }

    /// Whether the version tag is the one this build writes
    #[inline]
    #[must_use]
    pub fn is_current_version(&self) -> bool {
        self.version == SNAPSHOT_VERSION
    }

    /// Factories mentioned anywhere in the snapshot
    #[must_use]
    pub fn factories(&self) -> Vec<FactoryId> {
        let mut factories: Vec<FactoryId> = self
            .roles
            .keys()
            .chain(self.personnel.keys())
            .chain(self.nodes.keys())
            .chain(self.connections.keys())
            .chain(self.competencies.keys())
            .chain(self.role_competencies.keys())
            .chain(self.person_competencies.keys())
            .chain(self.transitions.keys())
            .cloned()
            .collect();
        factories.sort();
        factories.dedup();
        factories
    }

    /// Split into one chart per (factory, phase)
    #[must_use]
    pub fn into_charts(self) -> BTreeMap<ChartKey, OrgChart> {
        let mut charts = BTreeMap::new();
        take(self.roles, &mut charts, |c, v| c.roles = v);
        take(self.personnel, &mut charts, |c, v| c.personnel = v);
        take(self.nodes, &mut charts, |c, v| c.nodes = v);
        take(self.connections, &mut charts, |c, v| c.connections = v);
        take(self.competencies, &mut charts, |c, v| c.competencies = v);
        take(self.role_competencies, &mut charts, |c, v| c.role_requirements = v);
        take(self.person_competencies, &mut charts, |c, v| c.person_levels = v);
        take(self.transitions, &mut charts, |c, v| c.transitions = v);
        charts
    }
}
