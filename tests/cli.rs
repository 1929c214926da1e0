//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use mapforge::adapters::live::LiveFileSystem;
use mapforge::syntax::{ClassDecl, CompilationUnit, Member, NamespaceDecl, Visibility};
use mapforge::workspace::{snapshot, Document, DocumentId, Project, Workspace};
use uuid::Uuid;

fn run_mapforge(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_mapforge");
    Command::new(bin)
        .args(args)
        .env_remove("MAPFORGE_RECORD")
        .env_remove("MAPFORGE_NAMESPACE")
        .env_remove("MAPFORGE_EXTENSION")
        .env_remove("MAPFORGE_CAPABILITY")
        .output()
        .expect("failed to run mapforge binary")
}

/// Writes a project with one `Customer` class and returns its directory.
fn write_project(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let customer = ClassDecl::new("Customer", Visibility::Public);
    let ws = Workspace::new(Project { name: "App".into(), directory: dir.clone() })
        .add_document(Document {
            id: DocumentId::from_uuid(Uuid::new_v4()),
            path: dir.join("Models").join("Customer.cs"),
            folders: vec!["Models".into()],
            root: Arc::new(CompilationUnit {
                usings: Vec::new(),
                members: vec![Member::Namespace(Arc::new(NamespaceDecl {
                    name: "App.Models".into(),
                    members: vec![Member::Class(Arc::new(customer))],
                }))],
            }),
        })
        .unwrap();
    snapshot::save(&LiveFileSystem, &ws).unwrap();
    dir
}

fn generate(dir: &Path, extra: &[&str]) -> std::process::Output {
    let mut args = vec![
        "generate",
        dir.to_str().unwrap(),
        "--file",
        "Models/Customer.cs",
        "--target",
        "Customer",
        "--source",
        "Legacy.Data.CustomerDto",
    ];
    args.extend_from_slice(extra);
    run_mapforge(&args)
}

#[test]
fn generate_writes_mapper_and_is_idempotent() {
    let dir = write_project("mapforge_cli_generate");

    let output = generate(&dir, &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Mapper: CustomerDto2CustomerMapper"));
    assert!(stdout.contains("file: created, namespace: created, class: created, method: created"));
    assert!(stdout.contains("added   Mapping/CustomerDto2CustomerMapper.cs"));

    let source =
        std::fs::read_to_string(dir.join("Mapping/CustomerDto2CustomerMapper.cs")).unwrap();
    assert!(source.contains("namespace Mapping"));
    assert!(source.contains("throw new NotImplementedException();"));

    let again = generate(&dir, &[]);
    let stdout = String::from_utf8_lossy(&again.stdout);
    assert!(again.status.success());
    assert!(stdout.contains("file: reused, namespace: reused, class: reused, method: reused"));
    assert!(stdout.contains("No changes."));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = write_project("mapforge_cli_dry_run");

    let output = generate(&dir, &["--dry-run"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Dry run: nothing written."));
    assert!(!dir.join("Mapping").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn generate_without_source_reports_missing_mapping_source() {
    let dir = write_project("mapforge_cli_no_source");

    let output = run_mapforge(&[
        "generate",
        dir.to_str().unwrap(),
        "--file",
        "Models/Customer.cs",
        "--target",
        "Customer",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("no mapping source given for class `Customer`"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn list_shows_generated_mapper() {
    let dir = write_project("mapforge_cli_list");
    assert!(generate(&dir, &[]).status.success());

    let output = run_mapforge(&["list", dir.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Mapping/CustomerDto2CustomerMapper.cs"));
    assert!(
        stdout.contains("[Legacy.Data.CustomerDto -> App.Models.Customer] (1 not implemented)")
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn names_prints_both_directions() {
    let output = run_mapforge(&[
        "names",
        "--source",
        "Legacy.Data.CustomerDto",
        "--target",
        "Customer",
        "--namespace",
        "App.Models",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("direct:   CustomerDto2CustomerMapper"));
    assert!(stdout.contains("opposite: Customer2CustomerDtoMapper"));
}

#[test]
fn unknown_subcommand_fails() {
    let output = run_mapforge(&["plan"]);
    assert!(!output.status.success());
}
