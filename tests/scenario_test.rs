use pretty_assertions::assert_eq;
use script_sandbox::{
    BufferSink, Document, Sandbox, SandboxEngine, SandboxError, ScenarioConfig,
};
use std::io::Write;

const TUTORIAL_SCENARIO: &str = r#"
[scenario]
name = "tutorial-run"
description = "swap headline, point the image somewhere real, tint the nav"
demos = ["functions", "objects", "collections"]

[[mutation]]
select = "id"
target = "header-section-one"
action = "set-text"
value = "Hello World!"

[[mutation]]
select = "id"
target = "section-image"
action = "set-attribute"
key = "src"
value = "https://www.w3schools.com/js/landscape.jpg"

[[mutation]]
select = "id"
target = "navigation"
action = "set-style"
key = "background-color"
value = "lightyellow"
"#;

#[test]
fn test_scenario_file_drives_a_full_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tutorial.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(TUTORIAL_SCENARIO.as_bytes()).unwrap();

    let scenario = ScenarioConfig::from_file(&path).unwrap();
    assert_eq!(scenario.scenario.name, "tutorial-run");

    let mutations = scenario.to_mutations().unwrap();
    let state = Sandbox::new(Document::sample_page(), BufferSink::new());
    let mut engine = SandboxEngine::new(state);
    let report = engine.run(&scenario.scenario.demos, &mutations).unwrap();

    assert_eq!(report.demos_run, 3);
    assert_eq!(report.mutations_applied, 3);

    let state = engine.into_state();
    assert!(state.sink.contains("Result: 40"));
    assert!(state.sink.contains("round-trip intact: true"));

    let doc = &state.document;
    let header = doc.find_by_id("header-section-one").unwrap();
    assert_eq!(doc.text_of(header), "Hello World!");

    let img = doc.find_by_id("section-image").unwrap();
    assert_eq!(
        doc.attribute(img, "src"),
        Some("https://www.w3schools.com/js/landscape.jpg")
    );

    let nav = doc.find_by_id("navigation").unwrap();
    assert_eq!(doc.style(nav, "background-color"), Some("lightyellow"));
}

#[test]
fn test_scenario_against_missing_element_fails_typed() {
    let scenario = ScenarioConfig::from_toml_str(
        r#"
[scenario]
name = "bad-target"

[[mutation]]
select = "id"
target = "missing-id"
action = "set-text"
value = "nope"
"#,
    )
    .unwrap();

    let mutations = scenario.to_mutations().unwrap();
    let state = Sandbox::new(Document::sample_page(), BufferSink::new());
    let mut engine = SandboxEngine::new(state);

    let err = engine.run(&[], &mutations).unwrap_err();
    assert!(matches!(err, SandboxError::ElementNotFound { .. }));

    // The seeded header is untouched.
    let state = engine.into_state();
    let header = state.document.find_by_id("header-section-one").unwrap();
    assert_eq!(state.document.text_of(header), "Welcome");
}

#[test]
fn test_missing_scenario_file_surfaces_io_error() {
    let err = ScenarioConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, SandboxError::IoError(_)));
}

#[test]
fn test_class_mutation_applies_to_every_match() {
    let scenario = ScenarioConfig::from_toml_str(
        r#"
[scenario]
name = "tint-all-items"

[[mutation]]
select = "class"
target = "border-e"
action = "set-style"
key = "color"
value = "gray"
"#,
    )
    .unwrap();

    let state = Sandbox::new(Document::sample_page(), BufferSink::new());
    let mut engine = SandboxEngine::new(state);
    engine.run(&[], &scenario.to_mutations().unwrap()).unwrap();

    let state = engine.into_state();
    for handle in state.document.find_by_class("border-e") {
        assert_eq!(state.document.style(handle, "color"), Some("gray"));
    }
}
