use cascade_rs::api::ViewMode;
use cascade_rs::core::{StageKey, Term};
use cascade_rs::lookup::InMemoryTaxonomy;
use cascade_rs::storage::{MemorySessionStore, SessionStore};
use cascade_rs::{SelectionEngine, SelectionEngineConfig};

fn taxonomy() -> InMemoryTaxonomy {
    let mut lookup = InMemoryTaxonomy::new();
    lookup.insert_children("make", &[], vec![Term::new("1", "Ford")]);
    lookup.insert_children("model", &[("make", "1")], vec![Term::new("10", "Focus")]);
    lookup.insert_children("year", &[("model", "10")], vec![Term::new("2020", "2020")]);
    // Body and driveline fetches are keyed by model and year together, not
    // just the immediate parent.
    lookup.insert_children(
        "body",
        &[("model", "10"), ("year", "2020")],
        vec![Term::new("30", "Hatch"), Term::new("31", "Sedan")],
    );
    lookup.insert_children(
        "driveline",
        &[("model", "10"), ("year", "2020"), ("body", "30")],
        vec![Term::new("40", "FWD")],
    );
    lookup
}

fn build_engine() -> SelectionEngine<InMemoryTaxonomy, MemorySessionStore> {
    SelectionEngine::new(
        taxonomy(),
        MemorySessionStore::new(),
        SelectionEngineConfig::make_model_year_body_driveline(),
    )
    .expect("engine builds")
}

fn select_chain(engine: &mut SelectionEngine<InMemoryTaxonomy, MemorySessionStore>) {
    engine
        .select(&StageKey::from("make"), Some("1".into()))
        .expect("make selects");
    engine
        .select(&StageKey::from("model"), Some("10".into()))
        .expect("model selects");
    engine
        .select(&StageKey::from("year"), Some("2020".into()))
        .expect("year selects");
    engine
        .select(&StageKey::from("body"), Some("30".into()))
        .expect("body selects");
    engine
        .select(&StageKey::from("driveline"), Some("40".into()))
        .expect("driveline selects");
}

#[test]
fn body_candidates_are_keyed_by_model_and_year() {
    let mut engine = build_engine();
    engine
        .select(&StageKey::from("make"), Some("1".into()))
        .expect("make selects");
    engine
        .select(&StageKey::from("model"), Some("10".into()))
        .expect("model selects");

    let body = engine
        .stage_snapshot(&StageKey::from("body"))
        .expect("body stage exists");
    assert!(!body.enabled);
    assert_eq!(body.placeholder, "Select Year First");

    engine
        .select(&StageKey::from("year"), Some("2020".into()))
        .expect("year selects");
    let body = engine
        .stage_snapshot(&StageKey::from("body"))
        .expect("body stage exists");
    assert!(body.enabled);
    let names: Vec<&str> = body.candidates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Hatch", "Sedan"]);
}

#[test]
fn the_body_stage_uses_its_irregular_plural_in_placeholders() {
    let mut engine = build_engine();
    engine.lookup_mut().fail_children_for("body");
    engine
        .select(&StageKey::from("make"), Some("1".into()))
        .expect("make selects");
    engine
        .select(&StageKey::from("model"), Some("10".into()))
        .expect("model selects");
    engine
        .select(&StageKey::from("year"), Some("2020".into()))
        .expect("year selects");

    let body = engine
        .stage_snapshot(&StageKey::from("body"))
        .expect("body stage exists");
    assert_eq!(body.placeholder, "Error Loading Bodies");
}

#[test]
fn changing_the_year_clears_body_and_driveline() {
    let mut engine = build_engine();
    select_chain(&mut engine);
    engine
        .lookup_mut()
        .insert_children("year", &[("model", "10")], vec![
            Term::new("2020", "2020"),
            Term::new("2019", "2019"),
        ]);

    engine
        .select(&StageKey::from("year"), Some("2020".into()))
        .expect("year reselects");

    let driveline = engine
        .stage_snapshot(&StageKey::from("driveline"))
        .expect("driveline stage exists");
    assert_eq!(driveline.selected_id, None);
    assert!(!driveline.enabled);
    assert_eq!(driveline.placeholder, "Select Body First");
}

#[test]
fn a_full_five_stage_commit_builds_summary_and_deep_link() {
    let mut engine = build_engine();
    select_chain(&mut engine);
    engine.commit().expect("commit succeeds");

    assert_eq!(engine.view_mode(), ViewMode::Summary);
    assert_eq!(
        engine.summary_text().as_deref(),
        Some("My Vehicle: Ford Focus 2020 Hatch FWD")
    );
    assert_eq!(
        engine.deep_link().as_deref(),
        Some("/shop/?filterMake=1&filterModel=10&filterYear=2020&filterBody=30&filterDriveline=40")
    );
}

#[test]
fn five_stage_bootstrap_replays_from_the_session() {
    let mut engine = build_engine();
    select_chain(&mut engine);
    engine.commit().expect("commit succeeds");
    let record = engine
        .snapshot()
        .committed
        .expect("selection was committed");

    let mut store = MemorySessionStore::new();
    store.set(
        "selected_vehicle_filters",
        &serde_json::to_string(&record.to_record()).expect("record serializes"),
    );
    let mut restored = SelectionEngine::new(
        taxonomy(),
        store,
        SelectionEngineConfig::make_model_year_body_driveline(),
    )
    .expect("engine builds");
    restored.bootstrap("").expect("bootstrap succeeds");

    assert_eq!(restored.view_mode(), ViewMode::Summary);
    assert_eq!(
        restored.summary_text().as_deref(),
        Some("My Vehicle: Ford Focus 2020 Hatch FWD")
    );
}
