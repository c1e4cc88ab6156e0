use cascade_rs::api::{EngineSnapshot, ViewMode};
use cascade_rs::core::{StageKey, Term};
use cascade_rs::lookup::InMemoryTaxonomy;
use cascade_rs::storage::MemorySessionStore;
use cascade_rs::{SelectionEngine, SelectionEngineConfig};

fn taxonomy() -> InMemoryTaxonomy {
    let mut lookup = InMemoryTaxonomy::new();
    lookup.insert_children(
        "make",
        &[],
        vec![Term::new("2", "Holden"), Term::new("1", "Ford")],
    );
    lookup.insert_children(
        "model",
        &[("make", "1")],
        vec![Term::new("11", "Ranger"), Term::new("10", "Focus")],
    );
    lookup.insert_children(
        "year",
        &[("model", "10")],
        vec![
            Term::new("2018", "2018"),
            Term::new("2020", "2020"),
            Term::new("2019", "2019"),
        ],
    );
    lookup
}

fn build_engine() -> SelectionEngine<InMemoryTaxonomy, MemorySessionStore> {
    SelectionEngine::new(
        taxonomy(),
        MemorySessionStore::new(),
        SelectionEngineConfig::make_model_year(),
    )
    .expect("engine builds")
}

#[test]
fn new_engine_loads_sorted_root_candidates() {
    let engine = build_engine();
    let make = engine
        .stage_snapshot(&StageKey::from("make"))
        .expect("make stage exists");

    assert!(make.enabled);
    assert_eq!(make.placeholder, "Select Make");
    let names: Vec<&str> = make.candidates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Ford", "Holden"]);
}

#[test]
fn downstream_stages_start_disabled_with_guidance_placeholders() {
    let engine = build_engine();
    let model = engine
        .stage_snapshot(&StageKey::from("model"))
        .expect("model stage exists");
    let year = engine
        .stage_snapshot(&StageKey::from("year"))
        .expect("year stage exists");

    assert!(!model.enabled);
    assert_eq!(model.placeholder, "Select Make First");
    assert!(!year.enabled);
    assert_eq!(year.placeholder, "Select Model First");
}

#[test]
fn fresh_engine_starts_in_editing_mode() {
    let engine = build_engine();
    assert_eq!(engine.view_mode(), ViewMode::Editing);
    assert!(engine.committed().is_none());
    assert!(!engine.commit_eligible());
}

#[test]
fn walking_the_full_chain_enables_commit() {
    let mut engine = build_engine();
    engine
        .select(&StageKey::from("make"), Some("1".into()))
        .expect("make selects");
    engine
        .select(&StageKey::from("model"), Some("10".into()))
        .expect("model selects");
    engine
        .select(&StageKey::from("year"), Some("2020".into()))
        .expect("year selects");

    assert!(engine.commit_eligible());
    assert!(engine.view_state().commit_enabled);
}

#[test]
fn snapshot_round_trips_through_the_versioned_json_contract() {
    let mut engine = build_engine();
    engine
        .select(&StageKey::from("make"), Some("1".into()))
        .expect("make selects");

    let snapshot = engine.snapshot();
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("snapshot serializes");
    let restored = EngineSnapshot::from_json_compat_str(&json).expect("snapshot parses");
    assert_eq!(restored, snapshot);
}

#[test]
fn bare_snapshot_json_is_still_accepted() {
    let engine = build_engine();
    let snapshot = engine.snapshot();
    let bare = serde_json::to_string(&snapshot).expect("snapshot serializes");
    let restored = EngineSnapshot::from_json_compat_str(&bare).expect("bare snapshot parses");
    assert_eq!(restored, snapshot);
}
