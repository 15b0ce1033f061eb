//! CLI command integration tests.
//! Each test uses a temp directory via BHPT_DATA_DIR for full isolation.

use assert_cmd::Command;
use bhpt_core::{ModelKind, testkit};
use bhpt_store::{REGISTRY_FILE, sha256_bytes};
use predicates::prelude::*;
use tempfile::TempDir;

fn bhpt_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("bhpt").unwrap();
    cmd.env("BHPT_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Data directory holding verified synthetic datasets for both models.
fn seeded_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let mut registry = String::new();
    for model in ModelKind::ALL {
        let json = testkit::dataset_json(model).unwrap();
        std::fs::write(dir.path().join(format!("{}.json", model.name())), &json).unwrap();
        registry.push_str(&format!(
            "[{}]\nsha256 = \"{}\"\n\n",
            model.name(),
            sha256_bytes(json.as_bytes())
        ));
    }
    std::fs::write(dir.path().join(REGISTRY_FILE), registry).unwrap();
    dir
}

#[test]
fn modes_lists_available_modes() {
    let dir = TempDir::new().unwrap();
    bhpt_cmd(&dir)
        .args(["modes", "--model", "1dq1e4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BHPTNRSur1dq1e4"))
        .stdout(predicate::str::contains("(10,9)"))
        .stdout(predicate::str::contains("max_l:    5"));
}

#[test]
fn unknown_model_is_rejected() {
    let dir = TempDir::new().unwrap();
    bhpt_cmd(&dir)
        .args(["modes", "--model", "BHPTNRSur3d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown model"));
}

#[test]
fn verify_seeded_dataset() {
    let dir = seeded_dir();
    bhpt_cmd(&dir)
        .args(["verify", "--model", "BHPTNRSur2dq1e3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(": ok"));
}

#[test]
fn verify_detects_corruption() {
    let dir = seeded_dir();
    let path = dir.path().join("BHPTNRSur1dq1e4.json");
    std::fs::write(&path, "{}").unwrap();
    bhpt_cmd(&dir)
        .args(["verify", "--model", "1dq1e4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of date or corrupted"));
}

#[test]
fn generate_without_dataset_fails() {
    let dir = TempDir::new().unwrap();
    bhpt_cmd(&dir)
        .args(["generate", "--model", "1dq1e4", "--q", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no download URL"));
}

#[test]
fn generate_default_summary() {
    let dir = seeded_dir();
    bhpt_cmd(&dir)
        .args(["generate", "--model", "1dq1e4", "--q", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("samples:  61"))
        .stdout(predicate::str::contains("(2,-2)"))
        .stdout(predicate::str::contains("peak |h22|"));
}

#[test]
fn generate_reports_advisories() {
    let dir = seeded_dir();
    bhpt_cmd(&dir)
        .args([
            "generate",
            "--model",
            "2dq1e3",
            "--q",
            "10",
            "--spin1",
            "-0.5",
            "--ecc",
            "0.1",
            "--uncalibrated",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("[uncalibrated]"))
        .stderr(predicate::str::contains("[ignored_parameter]"));
}

#[test]
fn generate_rejects_unsupported_mode() {
    let dir = seeded_dir();
    bhpt_cmd(&dir)
        .args(["generate", "--model", "2dq1e3", "--q", "10", "--modes", "(2,2),(5,5)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOT a subset"))
        .stderr(predicate::str::contains("(5,5)"));
}

#[test]
fn generate_rejects_partial_extrinsics() {
    let dir = seeded_dir();
    bhpt_cmd(&dir)
        .args(["generate", "--model", "1dq1e4", "--q", "10", "--total-mass", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("total mass and distance"));
}

#[test]
fn generate_rejects_bad_mass_scale() {
    let dir = seeded_dir();
    bhpt_cmd(&dir)
        .args(["generate", "--model", "1dq1e4", "--q", "10", "--mass-scale", "kg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mass scale must be 'M' or 'm1'"));
}

#[test]
fn generate_summed_to_json() {
    let dir = seeded_dir();
    let out = dir.path().join("strain.json");
    bhpt_cmd(&dir)
        .args([
            "generate",
            "--model",
            "2dq1e3",
            "--q",
            "20",
            "--spin1",
            "0.3",
            "--total-mass",
            "60",
            "--distance",
            "400",
            "--orb-phase",
            "0.3",
            "--inclination",
            "0.7",
            "--sum-modes",
            "--output",
        ])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["model"], "BHPTNRSur2dq1e3");
    let time = doc["time"].as_array().unwrap();
    assert_eq!(doc["strain"]["real"].as_array().unwrap().len(), time.len());
    assert!(doc.get("modes").is_none());
}

#[test]
fn generate_modes_to_json() {
    let dir = seeded_dir();
    let out = dir.path().join("modes.json");
    bhpt_cmd(&dir)
        .args([
            "generate",
            "--model",
            "1dq1e4",
            "--q",
            "30",
            "--modes",
            "(2,2),(3,3)",
            "--no-neg-modes",
            "--output",
        ])
        .arg(&out)
        .assert()
        .success();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let modes = doc["modes"].as_array().unwrap();
    assert_eq!(modes.len(), 2);
    assert_eq!(modes[0]["l"], 2);
    assert_eq!(modes[1]["m"], 3);
}
