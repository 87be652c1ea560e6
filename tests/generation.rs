//! End-to-end generation tests against the bundled licenses

use std::fs;

use pretty_assertions::assert_eq;

use license_forge::config::{self, file, Prompter, CONFIG_FILE_NAME};
use license_forge::engine::{self, ResolveError};
use license_forge::{
    generate_all, Catalog, Configuration, Error, InputKind, OutputSink, ProjectConfig,
};

const BUNDLED_LICENSES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/licenses");

fn catalog() -> Catalog {
    Catalog::load(BUNDLED_LICENSES).expect("Bundled licenses should load")
}

#[test]
fn test_mit_from_config_file() {
    let project_dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        project_dir.path().join(CONFIG_FILE_NAME),
        [
            "[[licenses]]",
            "license = \"mit\"",
            "file = \"LICENSE\"",
            "copyright_holders = \"Test Person\"",
            "copyright_year_start = \"2003\"",
            "copyright_year_end = \"2003\"",
        ]
        .join("\n"),
    )
    .expect("write config");

    let catalog = catalog();
    let project = file::load(project_dir.path(), &catalog)
        .expect("Should parse")
        .expect("Config file should exist");
    let mut sink = OutputSink::new(Vec::new());
    let generated = generate_all(&catalog, &project, &mut sink).expect("Should generate");

    let license = project_dir.path().join("LICENSE");
    assert_eq!(generated[0].target.as_deref(), Some(license.as_path()));
    let text = fs::read_to_string(&license).expect("license written");
    assert!(text.starts_with("MIT License\n\nCopyright (c) 2003 Test Person\n"));
    assert!(!text.contains("<year>"));
    assert!(sink.into_inner().is_empty());
}

#[test]
fn test_year_range_in_output() {
    let config = Configuration::new("ISC")
        .with_copyright_year_start("2000")
        .with_copyright_year_end("3000")
        .with_copyright_holders("Holders");
    let resolved = engine::generate(&catalog(), &config).expect("Should resolve");
    assert!(resolved.text.contains("Copyright (c) 2000-3000 Holders\n"));
}

#[test]
fn test_apache_markers_and_note() {
    let config = Configuration::new("APACHE-2.0")
        .with_copyright_year_start("2019")
        .with_copyright_year_end("")
        .with_copyright_holders("The Forge Authors");
    let resolved = engine::generate(&catalog(), &config).expect("Should resolve");

    assert!(resolved.text.contains("   Copyright 2019 The Forge Authors\n"));
    assert!(!resolved.text.contains("[yyyy]"));
    assert!(resolved.note.is_some());
}

#[test]
fn test_every_occurrence_replaced() {
    let config = Configuration::new("bsd-4-clause")
        .with_copyright_year_start("2001")
        .with_copyright_holders("ACME")
        .with_organization("ACME Labs");
    let resolved = engine::generate(&catalog(), &config).expect("Should resolve");

    assert_eq!(resolved.text.matches("ACME Labs").count(), 2);
    assert_eq!(resolved.text.matches("BY ACME ''AS IS''").count(), 1);
    assert!(!resolved.text.contains('<'));
}

#[test]
fn test_template_without_markers_is_unchanged() {
    let catalog = catalog();
    let template = catalog.find("unlicense").expect("bundled");
    let config = Configuration::new("unlicense").with_copyright_holders("ignored");
    let resolved = engine::resolve(template, &config).expect("Should resolve");
    assert_eq!(resolved.text, template.body());
}

#[test]
fn test_missing_holders_writes_nothing() {
    let project_dir = tempfile::tempdir().expect("tempdir");
    let license = project_dir.path().join("LICENSE");
    let project = ProjectConfig::new(vec![Configuration::new("mit")
        .with_license_file(&license)
        .with_default_years("2024")]);

    let err = generate_all(&catalog(), &project, &mut OutputSink::new(Vec::new())).unwrap_err();
    assert!(matches!(
        err,
        Error::Resolve(ResolveError::MissingInputElement {
            kind: InputKind::CopyrightHolders
        })
    ));
    assert!(!license.exists());
}

#[test]
fn test_unknown_license() {
    let project = ProjectConfig::new(vec![Configuration::new("gpl-3.0").with_default_years("2024")]);
    let err = generate_all(&catalog(), &project, &mut OutputSink::new(Vec::new())).unwrap_err();
    assert_eq!(err.exit_code(), 5);
    assert!(err.to_string().contains("license-forge list"));
}

#[test]
fn test_interactive_session_then_config_file() {
    let project_dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog();
    let year = config::current_year();

    let answers = "zlib\n\n1995\n\nJean-loup Gailly and Mark Adler\n\n";
    let mut prompter = Prompter::new(answers.as_bytes(), Vec::new());
    let session = prompter
        .session(&catalog, project_dir.path(), &year)
        .expect("Should succeed");
    assert!(session.saved.is_some());

    let reloaded = file::load(project_dir.path(), &catalog)
        .expect("Should parse")
        .expect("Config file should exist");
    assert_eq!(reloaded, session.project);

    let mut sink = OutputSink::new(Vec::new());
    generate_all(&catalog, &reloaded.to_stdout(), &mut sink).expect("Should generate");
    let text = String::from_utf8(sink.into_inner()).expect("utf-8");
    let expected_header = format!("Copyright (c) 1995-{year} Jean-loup Gailly and Mark Adler\n");
    assert!(text.starts_with(&expected_header));
    assert!(!project_dir.path().join("LICENSE").exists());
}
