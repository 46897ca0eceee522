//! End-to-end runs of the command tree against snapshot files

use orgd_cli::{build_cli, run};
use orgd_model::{FactoryId, NodeId, PersonId, Phase};
use orgd_store::{Action, OrgChart, OrgStore, StoreConfig};
use orgd_test_utils::{
    ben_levels, competencies, node, plant_connections, plant_nodes, plant_personnel, plant_roles,
    quality_requirements,
};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn plant_chart() -> OrgChart {
    let mut chart = OrgChart::new()
        .with_roles(plant_roles())
        .with_personnel(plant_personnel())
        .with_nodes(plant_nodes())
        .with_connections(plant_connections());
    chart.competencies = competencies();
    chart
        .role_requirements
        .insert("r-qm".into(), quality_requirements());
    chart.person_levels.insert("p-ben".into(), ben_levels());
    chart
}

/// Writes a two-factory snapshot where the future phase seats Ben on Quality
fn write_snapshot(dir: &TempDir) -> PathBuf {
    let factory = FactoryId::from("plant-a");
    let config = StoreConfig::new().with_factories(["plant-a", "plant-b"]);
    let mut store = OrgStore::new(config, Default::default());
    store
        .replace_chart(&factory, Phase::Current, plant_chart())
        .unwrap();
    store
        .dispatch(
            &factory,
            Phase::Future,
            Action::ClonePhase {
                from: Phase::Current,
                to: Phase::Future,
            },
        )
        .unwrap();
    store
        .dispatch(
            &factory,
            Phase::Future,
            Action::AssignPerson {
                node: NodeId::from("n-quality"),
                person: PersonId::from("p-ben"),
            },
        )
        .unwrap();

    let path = dir.path().join("plant.json");
    store.save_to(&path).unwrap();
    path
}

fn orgd(args: &[&str], snapshot: &Path) -> (bool, String) {
    let mut argv = vec!["orgd"];
    argv.extend_from_slice(args);
    argv.push(snapshot.to_str().unwrap());

    let matches = build_cli().try_get_matches_from(argv).unwrap();
    let mut out = Vec::new();
    let ok = run(&matches, &mut out).unwrap();
    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn summary_reports_plant_a() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let (ok, text) = orgd(&["summary"], &snapshot);
    assert!(ok);
    assert!(text.starts_with("Factory plant-a (current)"), "{text}");
    assert!(text.contains("Nodes: 6 (3 filled, 2 vacant, 1 empty), fill rate 60%"));
    assert!(text.contains("Personnel: 6 (3 assigned, 3 unassigned)"));
    assert!(text.contains("Skill coverage: 44%"));
}

#[test]
fn summary_json_for_future_phase() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let (_, text) = orgd(&["--json", "--phase", "future", "summary"], &snapshot);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["headcount"]["filled"], 4);
    assert_eq!(json["headcount"]["vacant"], 1);
}

#[test]
fn matches_lists_every_vacant_node() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let (ok, text) = orgd(&["matches"], &snapshot);
    assert!(ok);
    assert!(text.contains("Quality (n-quality): 2 potential matches"), "{text}");
    assert!(text.contains("Maintenance (n-maint):"));
}

#[test]
fn matches_json_for_one_node() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let (_, text) = orgd(&["--json", "matches", "--node", "n-quality"], &snapshot);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["node"], "n-quality");
    assert_eq!(entries[0]["potentialMatchCount"], 2);
    assert_eq!(entries[0]["matchedPersonnel"][0]["id"], "p-ben");
}

#[test]
fn matches_rejects_unknown_node() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let matches = build_cli()
        .try_get_matches_from(["orgd", "matches", "--node", "n-ghost", snapshot.to_str().unwrap()])
        .unwrap();
    let err = run(&matches, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("n-ghost"));
}

#[test]
fn gaps_scores_ben_for_quality_lead() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let (ok, text) = orgd(&["gaps", "--person", "p-ben", "--role", "r-qm"], &snapshot);
    assert!(ok);
    assert!(text.starts_with("p-ben for r-qm: 81% (1/2 requirements met)"), "{text}");
    assert!(text.contains("Auditing"));
    assert!(text.contains("essential"));
}

#[test]
fn diff_shows_ben_moving_to_quality() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let (_, text) = orgd(&["--json", "diff"], &snapshot);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["nodes"][0]["node"], "n-quality");
    assert_eq!(json["nodes"][0]["status"], "changed");
    assert_eq!(json["nodes"][0]["personnelAdded"][0], "p-ben");
    assert_eq!(json["moves"][0]["person"], "p-ben");
}

#[test]
fn validate_accepts_clean_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let (ok, text) = orgd(&["validate"], &snapshot);
    assert!(ok);
    assert_eq!(text, "ok: snapshot version 1.0\n");
}

#[test]
fn validate_reports_dangling_references() {
    let dir = tempfile::tempdir().unwrap();
    let factory = FactoryId::from("default");
    let mut store = OrgStore::default();
    let mut chart = plant_chart();
    chart.nodes.push(node("n-ghost", "Ghost", &["r-ghost"], &[]));
    store.replace_chart(&factory, Phase::Current, chart).unwrap();
    let path = dir.path().join("dirty.json");
    store.save_to(&path).unwrap();

    let (ok, text) = orgd(&["validate"], &path);
    assert!(!ok);
    assert!(text.contains("default/current:"), "{text}");
    assert!(text.contains("node n-ghost references missing role r-ghost"));
}

#[test]
fn validate_rejects_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"version": "1.0", "personnel": {}}"#).unwrap();

    let (ok, text) = orgd(&["--json", "validate"], &path);
    assert!(!ok);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["error"].as_str().unwrap().contains("roles"));
}

#[test]
fn search_filters_personnel() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let (_, text) = orgd(&["--json", "search", "--availability", "available"], &snapshot);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let names: Vec<&str> = json["personnel"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada Park", "Cai Novak", "Fay Lund"]);
    assert_eq!(json["roles"].as_array().unwrap().len(), 0);
}

#[test]
fn search_text_spans_entities() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let matches = build_cli()
        .try_get_matches_from(["orgd", "search", snapshot.to_str().unwrap(), "quality"])
        .unwrap();
    let mut out = Vec::new();
    assert!(run(&matches, &mut out).unwrap());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("role   r-qm"));
    assert!(text.contains("node   n-quality"));
}

#[test]
fn unknown_factory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(&dir);

    let matches = build_cli()
        .try_get_matches_from(["orgd", "--factory", "plant-z", "summary", snapshot.to_str().unwrap()])
        .unwrap();
    let err = run(&matches, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("plant-z"));
}
