use indexmap::IndexMap;

use cascade_rs::CascadeError;
use cascade_rs::core::{CommittedSelection, SelectedTerm, StageKey};
use cascade_rs::storage::{MemorySessionStore, SelectionStateStore, SessionStore};

const KEY: &str = "selected_vehicle_filters";

fn stage_keys() -> Vec<StageKey> {
    vec!["make".into(), "model".into(), "year".into()]
}

fn build_store() -> SelectionStateStore<MemorySessionStore> {
    SelectionStateStore::new(MemorySessionStore::new(), KEY, stage_keys())
}

fn complete_selection() -> CommittedSelection {
    let mut entries = IndexMap::new();
    entries.insert(
        StageKey::from("make"),
        SelectedTerm {
            id: "1".into(),
            name: "Ford".to_owned(),
        },
    );
    entries.insert(
        StageKey::from("model"),
        SelectedTerm {
            id: "10".into(),
            name: "Focus".to_owned(),
        },
    );
    entries.insert(
        StageKey::from("year"),
        SelectedTerm {
            id: "2020".into(),
            name: "2020".to_owned(),
        },
    );
    CommittedSelection::from_entries(entries)
}

#[test]
fn committed_selections_round_trip_through_the_session() {
    let mut store = build_store();
    let selection = complete_selection();
    store.commit(&selection).expect("commit succeeds");

    let restored = store.load().expect("record loads");
    assert_eq!(restored, selection);
}

#[test]
fn the_session_record_uses_the_flat_key_name_layout() {
    let mut store = build_store();
    store.commit(&complete_selection()).expect("commit succeeds");

    let payload = store
        .session_store()
        .get(KEY)
        .expect("record was persisted");
    let record: serde_json::Value = serde_json::from_str(&payload).expect("payload is JSON");
    assert_eq!(record["make"], "1");
    assert_eq!(record["makeName"], "Ford");
    assert_eq!(record["yearName"], "2020");
}

#[test]
fn incomplete_selections_are_rejected_and_clear_the_key() {
    let mut store = build_store();
    store.commit(&complete_selection()).expect("commit succeeds");

    let mut entries = IndexMap::new();
    entries.insert(
        StageKey::from("make"),
        SelectedTerm {
            id: "1".into(),
            name: "Ford".to_owned(),
        },
    );
    let partial = CommittedSelection::from_entries(entries);

    let outcome = store.commit(&partial);
    assert!(matches!(
        outcome,
        Err(CascadeError::SelectionIncomplete { .. })
    ));
    assert!(store.session_store().get(KEY).is_none());
    assert!(store.load().is_none());
}

#[test]
fn an_unparsable_record_is_purged_permanently() {
    let mut store = build_store();
    store.session_store_mut().set(KEY, "{not json");

    assert!(store.load().is_none());
    assert!(store.session_store().get(KEY).is_none());
    assert!(store.load().is_none());
}

#[test]
fn a_structurally_incomplete_record_is_purged() {
    let mut store = build_store();
    store
        .session_store_mut()
        .set(KEY, r#"{"make":"1","makeName":"Ford","model":"10"}"#);

    assert!(store.load().is_none());
    assert!(store.session_store().get(KEY).is_none());
}

#[test]
fn records_written_by_other_frontends_with_numeric_ids_load() {
    let mut store = build_store();
    store.session_store_mut().set(
        KEY,
        r#"{"make":1,"makeName":"Ford","model":10,"modelName":"Focus","year":2020,"yearName":"2020"}"#,
    );

    let restored = store.load().expect("record loads");
    assert_eq!(
        restored.get(&StageKey::from("model")).map(|t| t.id.as_str()),
        Some("10")
    );
}

#[test]
fn clear_removes_the_record() {
    let mut store = build_store();
    store.commit(&complete_selection()).expect("commit succeeds");
    store.clear();
    assert!(store.load().is_none());
}
