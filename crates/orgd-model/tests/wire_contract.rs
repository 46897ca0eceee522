//! Wire-format contract of model entities

use orgd_model::{
    AvailabilityStatus, CompetencyId, CompetencyLevels, ExperienceTier, ModelError, Node, Person,
    MAX_COMPETENCY_LEVEL,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn hand_edited_person_falls_back_to_defaults() {
    let person: Person = serde_json::from_value(json!({
        "id": "p-1",
        "name": "Ada",
        "experience": "Principal",
        "availability": null,
        "skills": "welding",
    }))
    .unwrap();

    assert_eq!(person.experience, ExperienceTier::Other("Principal".to_string()));
    assert_eq!(person.experience.base_score(), 0);
    assert_eq!(person.availability, AvailabilityStatus::Unknown);
    assert!(person.skills.is_empty());
}

#[test]
fn unknown_labels_survive_a_round_trip() {
    let raw = json!({
        "id": "p-2",
        "name": "Bo",
        "experience": "Executive",
        "availability": "On Leave",
    });
    let person: Person = serde_json::from_value(raw).unwrap();
    assert!(person.availability.is_assignable());

    let back = serde_json::to_value(&person).unwrap();
    assert_eq!(back["experience"], "Executive");
    assert_eq!(back["availability"], "On Leave");
}

#[test]
fn malformed_person_fields_decode_to_defaults() {
    let person: Person = serde_json::from_value(json!({
        "id": "p-3",
        "experience": 3,
        "availability": ["Available"],
    }))
    .unwrap();

    assert!(person.name.is_empty());
    assert_eq!(person.experience, ExperienceTier::Unrecognized);
    assert_eq!(person.availability, AvailabilityStatus::Unknown);
}

#[test]
fn node_position_is_flat_and_lists_default() {
    let node: Node = serde_json::from_value(json!({
        "id": "n-1",
        "title": "Cell",
        "x": 40.0,
        "y": -12.5,
    }))
    .unwrap();

    assert_eq!((node.position.x, node.position.y), (40.0, -12.5));
    assert!(node.role_ids.is_empty() && node.personnel_ids.is_empty());

    let back = serde_json::to_value(&node).unwrap();
    assert_eq!(back["x"], 40.0);
    assert_eq!(back["roleIds"], json!([]));
}

proptest! {
    #[test]
    fn any_availability_label_deserializes(label in ".{0,24}") {
        let parsed: AvailabilityStatus = serde_json::from_value(json!(label)).unwrap();
        prop_assert_eq!(parsed, AvailabilityStatus::from_label(&label));
    }

    #[test]
    fn levels_stay_on_the_proficiency_scale(level in any::<u8>()) {
        let mut levels = CompetencyLevels::new();
        let id = CompetencyId::from("c-1");
        match levels.set(id.clone(), level) {
            Ok(()) => {
                prop_assert!(level <= MAX_COMPETENCY_LEVEL);
                prop_assert_eq!(levels.level(&id), level);
                prop_assert_eq!(levels.0.contains_key(&id), level > 0);
            }
            Err(err) => {
                prop_assert!(level > MAX_COMPETENCY_LEVEL);
                let is_range_error = matches!(err, ModelError::LevelOutOfRange { .. });
                prop_assert!(is_range_error);
                prop_assert_eq!(levels.level(&id), 0);
            }
        }
    }
}
