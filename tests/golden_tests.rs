//! Golden Tests for Generated Modules
//!
//! Renders schemas/commands.toml and compares both modules against the
//! checked-in fixtures.

use std::path::{Path, PathBuf};

use wire_idl::{
    generate, load_schema, render, CodegenConfig, GeneratorConfig, IdlError, OutputSink, Schema,
    Target,
};

fn manifest_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn commands() -> Schema {
    load_schema(manifest_path("schemas/commands.toml")).unwrap()
}

fn scoreboard() -> Schema {
    load_schema(manifest_path("tests/fixtures/scoreboard.toml")).unwrap()
}

// =============================================================================
// Golden Comparison
// =============================================================================

#[test]
fn test_elm_module_matches_fixture() {
    let modules = generate(&commands(), &CodegenConfig::default()).unwrap();
    assert_eq!(modules.client.code, include_str!("fixtures/Commands.elm"));
}

#[test]
fn test_rust_module_matches_fixture() {
    let modules = generate(&commands(), &CodegenConfig::default()).unwrap();
    assert_eq!(modules.server.code, include_str!("fixtures/commands.rs"));
}

#[test]
fn test_numeric_modules_match_fixtures() {
    let mut config = CodegenConfig::default();
    config.elm.module_name = "Scoreboard".to_string();
    let modules = generate(&scoreboard(), &config).unwrap();
    assert_eq!(modules.client.code, include_str!("fixtures/Scoreboard.elm"));
    assert_eq!(modules.server.code, include_str!("fixtures/scoreboard.rs"));
}

#[test]
fn test_default_generator_config_matches_fixtures() {
    let config = GeneratorConfig::default().codegen_config();
    let schema = commands();
    assert_eq!(
        render(&schema, config.profile(Target::Elm)).unwrap().code,
        include_str!("fixtures/Commands.elm")
    );
    assert_eq!(
        render(&schema, config.profile(Target::Rust)).unwrap().code,
        include_str!("fixtures/commands.rs")
    );
}

#[test]
fn test_generation_is_deterministic() {
    let config = CodegenConfig::default();
    let first = generate(&commands(), &config).unwrap();
    let second = generate(&commands(), &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.client.declaration_count, 3);
}

// =============================================================================
// Failure Before Output
// =============================================================================

#[test]
fn test_unknown_type_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let schema_file = dir.path().join("broken.toml");
    std::fs::write(
        &schema_file,
        r#"
[[declaration]]
union = "ServerCommand"

[[declaration.variant]]
name = "BecomeSuspect"
fields = [{ name = "suspectId", type = "SuspectID" }]
"#,
    )
    .unwrap();

    let sink = OutputSink::new(dir.path().join("Commands.elm"), dir.path().join("commands.rs"));
    let result = load_schema(&schema_file).and_then(|schema| generate(&schema, &CodegenConfig::default()));

    match result {
        Err(IdlError::UnknownType { name, .. }) => assert_eq!(name, "SuspectID"),
        other => panic!("Expected UnknownType, got {:?}", other.map(|_| ())),
    }
    assert!(!sink.client_path.exists());
    assert!(!sink.server_path.exists());
}

#[test]
fn test_shared_constructor_rejected() {
    let mut schema = Schema::new();
    schema
        .declare_tagged_union("ServerCommand")
        .unwrap()
        .variant_with("Echo")
        .unwrap()
        .field("message", "String")
        .unwrap();
    schema
        .declare_tagged_union("ClientCommand")
        .unwrap()
        .variant_with("Echo")
        .unwrap()
        .field("text", "String")
        .unwrap();

    match generate(&schema, &CodegenConfig::default()) {
        Err(IdlError::DuplicateName { scope, name }) => {
            assert_eq!(scope, "schema");
            assert_eq!(name, "Echo");
        }
        other => panic!("Expected DuplicateName, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_rust_path_keyword_field_rejected() {
    let document = r#"
[[declaration]]
union = "ClientCommand"

[[declaration.variant]]
name = "Echo"
fields = [{ name = "self", type = "String" }]
"#;
    let result = wire_idl::SchemaDocument::from_toml(document).and_then(|doc| doc.into_schema());
    assert!(matches!(result, Err(IdlError::ReservedName { .. })));
}

#[test]
fn test_cyclic_alias_rejected() {
    let mut schema = Schema::new();
    schema
        .declare_type_alias("A", [(Target::Elm, "B"), (Target::Rust, "B")])
        .unwrap();
    schema
        .declare_type_alias("B", [(Target::Elm, "A"), (Target::Rust, "A")])
        .unwrap();

    assert!(matches!(
        generate(&schema, &CodegenConfig::default()),
        Err(IdlError::CyclicAlias { .. })
    ));
}

// =============================================================================
// Output Sink
// =============================================================================

#[test]
fn test_write_then_check_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(
        dir.path().join("client/src/Commands.elm"),
        dir.path().join("server/src/commands.rs"),
    );
    let modules = generate(&commands(), &CodegenConfig::default()).unwrap();

    assert_eq!(sink.check(&modules).unwrap().len(), 2);
    sink.write(&modules).unwrap();
    assert!(sink.check(&modules).unwrap().is_empty());

    assert_eq!(
        std::fs::read_to_string(&sink.client_path).unwrap(),
        include_str!("fixtures/Commands.elm")
    );
}
