//! End-to-end tests for the `addonkeeper` binary.
//!
//! Tests run with fixed decision policies unless they check the prompt
//! fallback, and stdio is always piped so no prompt is shown.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn addonkeeper(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_addonkeeper"))
        .arg("--root")
        .arg(root)
        .args(["--on-unknown", "skip", "--on-conflict", "skip"])
        .args(args)
        .output()
        .expect("binary runs")
}

fn write_addon(path: &Path, packs: &[(&str, &str)]) {
    let mut zip = ZipWriter::new(fs::File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (folder, uuid) in packs {
        zip.start_file(format!("{}/manifest.json", folder), options)
            .unwrap();
        write!(
            zip,
            r#"{{"header": {{"uuid": "{}", "version": [1, 0, 0]}}}}"#,
            uuid
        )
        .unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_default_command_installs_and_indexes() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("downloaded_addons")).unwrap();
    write_addon(
        &root.join("downloaded_addons").join("Dragons.mcaddon"),
        &[("Dragons BP", "bp-uuid"), ("Dragons RP", "rp-uuid"), ("Extras", "x")],
    );

    let output = addonkeeper(root, &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stdout: {}", stdout);
    assert!(stdout.contains("Extraction summary"));
    assert!(root.join("behavior_packs").join("Dragons BP").is_dir());
    assert!(root.join("resource_packs").join("Dragons RP").is_dir());
    assert!(!root.join("temp").exists());
    assert!(root.join("logs").join("addonkeeper.log").exists());

    let index = fs::read_to_string(root.join("world_behavior_packs.json")).unwrap();
    assert!(index.contains("bp-uuid"));
}

#[test]
fn test_prompt_without_terminal_reports_skip() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("downloaded_addons")).unwrap();
    write_addon(
        &root.join("downloaded_addons").join("Mixed.mcaddon"),
        &[("Mixed BP", "bp-uuid"), ("Extras", "x")],
    );

    // default prompt policy; stderr is piped so no question can be asked
    let output = Command::new(env!("CARGO_BIN_EXE_addonkeeper"))
        .arg("--root")
        .arg(root)
        .arg("extract")
        .output()
        .expect("binary runs");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stdout: {}", stdout);
    assert!(
        stdout
            .lines()
            .any(|line| line.contains("Extras") && line.contains("no terminal attached")),
        "stdout: {}",
        stdout
    );
    assert!(root.join("behavior_packs").join("Mixed BP").is_dir());
    assert!(!root.join("resource_packs").join("Extras").exists());
}

#[test]
fn test_scan_single_role() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let pack = root.join("resource_packs").join("Hand Made");
    fs::create_dir_all(&pack).unwrap();
    fs::write(
        pack.join("manifest.json"),
        r#"{"header": {"uuid": "hand", "version": [0, 2]}}"#,
    )
    .unwrap();

    let output = addonkeeper(root, &["scan", "--role", "resource"]);

    assert!(output.status.success());
    assert!(root.join("world_resource_packs.json").exists());
    assert!(!root.join("world_behavior_packs.json").exists());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    assert!(addonkeeper(root, &["init"]).status.success());
    assert!(root.join("addonkeeper.ini").exists());

    let second = addonkeeper(root, &["init"]);
    assert_eq!(second.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));

    assert!(addonkeeper(root, &["init", "--force"]).status.success());
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(
        root.join("addonkeeper.ini"),
        "[classifier]\npriority = sideways\n",
    )
    .unwrap();

    let output = addonkeeper(root, &["audit"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("classifier.priority"));
}
