//! modgen CLI tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn modgen() -> Command {
    Command::cargo_bin("modgen").expect("modgen binary")
}

#[test]
fn help_flag_shows_usage() {
    modgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate source code for fake kernel modules"));
}

#[test]
fn no_args_writes_into_current_dir() {
    let temp_dir = TempDir::new().unwrap();
    modgen().current_dir(temp_dir.path()).assert().success();

    let recipe = fs::read_to_string(temp_dir.path().join("gen_mod.mak")).unwrap();
    assert_eq!(recipe.lines().count(), 23);
    assert!(temp_dir.path().join("ex-nvme-core.c").exists());
    assert!(temp_dir.path().join("ex-tcm_qla2xxx.c").exists());
}

#[test]
fn other_mode_uses_int_export() {
    let temp_dir = TempDir::new().unwrap();
    modgen()
        .arg("other")
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let qla = fs::read_to_string(temp_dir.path().join("ex-qla2xxx.c")).unwrap();
    assert!(qla.contains("void qlt_stop_phase2_mangled(int);"));
}

#[test]
fn unknown_mode_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    modgen()
        .arg("whatever")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let qla = fs::read_to_string(temp_dir.path().join("ex-qla2xxx.c")).unwrap();
    assert!(qla.contains("void qlt_stop_phase2_mangled(void);"));
}

#[test]
fn json_report_lists_sources() {
    let temp_dir = TempDir::new().unwrap();
    modgen()
        .arg("--json")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ex-scsi_mod.c").and(predicate::str::contains("gen_mod.mak")));
}

#[test]
fn strict_rejects_dangling_custom_graph() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("modgen.toml");
    fs::write(
        &config,
        "[[modules]]\nname = \"sr_mod\"\ncalls = [\"register_cdrom\"]\n",
    )
    .unwrap();

    modgen()
        .arg("--config")
        .arg(&config)
        .arg("--strict")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("inconsistent"));
    assert!(!temp_dir.path().join("ex-sr_mod.c").exists());

    modgen()
        .arg("--config")
        .arg(&config)
        .current_dir(temp_dir.path())
        .assert()
        .success();
    assert!(temp_dir.path().join("ex-sr_mod.c").exists());
}

#[test]
fn bad_config_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    modgen()
        .arg("--config")
        .arg("settings.json")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(".toml"));
}
