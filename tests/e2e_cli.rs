//! CLI end-to-end tests
//!
//! Tests for the cardprep command-line interface. Background removal uses
//! the built-in `color-key` backend so no external tool is needed.

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the cardprep binary
#[allow(deprecated)]
fn cardprep_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cardprep").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Config pointing the external tools at programs that do not exist.
fn write_offline_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("offline.toml");
    fs::write(
        &path,
        r#"
[heic]
program = "cardprep-test-no-such-magick"

[removal]
backend = "color-key"
program = "cardprep-test-no-such-rembg"
"#,
    )
    .unwrap();
    path
}

fn report_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not a JSON report")
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = cardprep_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = cardprep_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cardprep"))
        .stdout(predicate::str::contains("convert-heic"))
        .stdout(predicate::str::contains("remove-bg"))
        .stdout(predicate::str::contains("resize"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = cardprep_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cardprep"));
}

#[test]
fn test_cli_check_tools_command() {
    let mut cmd = cardprep_cmd();
    cmd.arg("check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("magick"))
        .stdout(predicate::str::contains("rembg"));
}

#[test]
fn test_cli_resize_requires_set() {
    let mut cmd = cardprep_cmd();
    cmd.args(["resize", "--source", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--set"));
}

#[test]
fn test_cli_template_conflicts_with_no_composite() {
    let mut cmd = cardprep_cmd();
    cmd.args(["remove-bg", "--template", "t.png", "--no-composite"])
        .assert()
        .failure();
}

#[test]
fn test_cli_validate_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("cardprep.toml");
    fs::write(
        &config_path,
        r#"
[template]
card_width = 200
card_height = 280

[resize]
width = 640
"#,
    )
    .unwrap();

    let mut cmd = cardprep_cmd();
    cmd.arg("validate")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("200x280"))
        .stdout(predicate::str::contains("640"));
}

#[test]
fn test_cli_validate_rejects_zero_width() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("cardprep.toml");
    fs::write(&config_path, "[resize]\nwidth = 0\n").unwrap();

    let mut cmd = cardprep_cmd();
    cmd.arg("validate")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("width"));
}

#[test]
fn test_cli_validate_missing_config() {
    let mut cmd = cardprep_cmd();
    cmd.args(["validate", "/nonexistent/cardprep.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_convert_heic_without_heic_files() {
    let dir = tempdir().unwrap();
    let config = write_offline_config(dir.path());
    let photos = dir.path().join("photos");
    fs::create_dir(&photos).unwrap();

    let mut cmd = cardprep_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("convert-heic")
        .arg("--input")
        .arg(&photos)
        .assert()
        .success();

    let converted = photos.join("converted_pngs");
    assert!(converted.is_dir());
    assert_eq!(fs::read_dir(&converted).unwrap().count(), 0);
}

#[test]
fn test_convert_heic_failure_keeps_source() {
    let dir = tempdir().unwrap();
    let config = write_offline_config(dir.path());
    let photos = dir.path().join("photos");
    fs::create_dir(&photos).unwrap();
    let heic = photos.join("IMG_0042.HEIC");
    fs::write(&heic, b"not really a heic file").unwrap();

    let output = cardprep_cmd()
        .arg("--config")
        .arg(&config)
        .args(["convert-heic", "--json", "--input"])
        .arg(&photos)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(heic.exists());
    assert!(!photos.join("converted_pngs/IMG_0042.png").exists());

    let reports = report_json(&output);
    assert_eq!(reports[0]["pipeline"], "convert-heic");
    assert_eq!(reports[0]["found"], 1);
    assert_eq!(reports[0]["failed"][0]["file"], "IMG_0042.HEIC");
    assert_eq!(reports[1]["pipeline"], "cards");
}

#[test]
fn test_convert_heic_runs_cards_on_input_folder() {
    let dir = tempdir().unwrap();
    let config = write_offline_config(dir.path());
    let photos = dir.path().join("photos");
    fs::create_dir(&photos).unwrap();
    common::write_card_png(&photos.join("queen.png"), (40, 50), (5, 8, 20, 30));

    let mut cmd = cardprep_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["convert-heic", "--crop", "--input"])
        .arg(&photos)
        .assert()
        .success();

    let out = photos.join("output_cards");
    assert!(out.join("removed_queen.png").exists());
    assert_eq!(common::dimensions(&out.join("cropped_queen.png")), (20, 30));
    assert!(!out.join("composited_queen.png").exists());
}

#[test]
fn test_remove_bg_crop_and_composite() {
    let dir = tempdir().unwrap();
    let cards = dir.path().join("cards");
    fs::create_dir(&cards).unwrap();
    common::write_card_png(&cards.join("ace.png"), (60, 70), (10, 12, 30, 40));
    let template = dir.path().join("bg/background.png");
    common::write_template(&template, 400, 500);

    let output = cardprep_cmd()
        .args(["remove-bg", "--backend", "color-key", "--crop", "--json"])
        .arg("--input")
        .arg(&cards)
        .arg("--template")
        .arg(&template)
        .output()
        .unwrap();

    assert!(output.status.success());
    let report = report_json(&output);
    assert_eq!(report["pipeline"], "cards");
    assert_eq!(report["processed"], 1);
    assert_eq!(report["outputs"].as_array().unwrap().len(), 3);

    let out = cards.join("output_cards");
    assert_eq!(common::dimensions(&out.join("removed_ace.png")), (60, 70));
    assert_eq!(common::dimensions(&out.join("cropped_ace.png")), (30, 40));
    assert_eq!(
        common::dimensions(&out.join("composited_ace.png")),
        (400, 500)
    );
}

#[test]
fn test_remove_bg_uses_default_template_from_working_dir() {
    let dir = tempdir().unwrap();
    common::write_card_png(&dir.path().join("king.png"), (30, 30), (4, 4, 10, 10));
    common::write_template(&dir.path().join("assets/bg/background.png"), 320, 440);

    let mut cmd = cardprep_cmd();
    cmd.current_dir(dir.path())
        .args(["remove-bg", "--backend", "color-key"])
        .assert()
        .success();

    let composited = dir.path().join("output_cards/composited_king.png");
    assert_eq!(common::dimensions(&composited), (320, 440));
}

#[test]
fn test_remove_bg_missing_template_is_fatal() {
    let dir = tempdir().unwrap();
    common::write_card_png(&dir.path().join("ace.png"), (20, 20), (2, 2, 5, 5));

    let mut cmd = cardprep_cmd();
    cmd.args(["remove-bg", "--backend", "color-key", "--input"])
        .arg(dir.path())
        .arg("--template")
        .arg(dir.path().join("missing.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load template"));

    assert!(!dir.path().join("output_cards").exists());
}

#[test]
fn test_remove_bg_skips_corrupt_file() {
    let dir = tempdir().unwrap();
    common::write_card_png(&dir.path().join("good.png"), (20, 20), (2, 2, 8, 8));
    fs::write(dir.path().join("broken.png"), b"\x89PNG garbage").unwrap();

    let output = cardprep_cmd()
        .args(["remove-bg", "--backend", "color-key", "--no-composite", "--json"])
        .arg("--input")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report = report_json(&output);
    assert_eq!(report["found"], 2);
    assert_eq!(report["processed"], 1);
    assert_eq!(report["failed"][0]["file"], "broken.png");
    assert!(dir.path().join("output_cards/removed_good.png").exists());
    assert!(!dir.path().join("output_cards/removed_broken.png").exists());
}

#[test]
fn test_remove_bg_empty_crop_policies() {
    let dir = tempdir().unwrap();
    // Nothing but backdrop: fully transparent after colour keying.
    common::write_card_png(&dir.path().join("blank.png"), (16, 16), (0, 0, 0, 0));

    let run = |policy: &str| {
        cardprep_cmd()
            .args(["remove-bg", "--backend", "color-key", "--no-composite", "--crop"])
            .args(["--empty-crop", policy, "--input"])
            .arg(dir.path())
            .output()
            .unwrap()
    };

    let fail = run("fail");
    assert!(fail.status.success());
    assert!(String::from_utf8_lossy(&fail.stdout).contains("1 failed"));

    let skip = run("skip");
    assert!(skip.status.success());
    assert!(String::from_utf8_lossy(&skip.stdout).contains("0 failed"));
    assert!(!dir.path().join("output_cards/cropped_blank.png").exists());

    let abort = run("abort");
    assert!(!abort.status.success());
    assert!(String::from_utf8_lossy(&abort.stderr).contains("aborting run"));
}

#[test]
fn test_resize_writes_both_folders() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("sets");
    let work = dir.path().join("work");
    fs::create_dir_all(source.join("spring")).unwrap();
    fs::create_dir(&work).unwrap();
    common::write_photo(&source.join("spring/a.png"), 1000, 333);
    common::write_photo(&source.join("spring/b.jpg"), 250, 400);

    let mut cmd = cardprep_cmd();
    cmd.current_dir(&work)
        .arg("resize")
        .arg("--source")
        .arg(&source)
        .args(["--set", "spring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 processed"));

    for folder in ["500", "backup"] {
        let base = work.join("spring").join(folder);
        assert_eq!(common::dimensions(&base.join("a.png")), (500, 167));
        assert_eq!(common::dimensions(&base.join("b.jpg")), (500, 800));
    }
}

#[test]
fn test_resize_custom_width() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("sets/s")).unwrap();
    common::write_photo(&dir.path().join("sets/s/c.png"), 400, 200);

    let mut cmd = cardprep_cmd();
    cmd.current_dir(dir.path())
        .args(["resize", "--source", "sets", "--set", "s", "--width", "100"])
        .assert()
        .success();

    // The primary folder keeps its name whatever the width.
    assert_eq!(common::dimensions(&dir.path().join("s/500/c.png")), (100, 50));
}

#[test]
fn test_resize_missing_source_fails() {
    let dir = tempdir().unwrap();

    let mut cmd = cardprep_cmd();
    cmd.current_dir(dir.path())
        .args(["resize", "--source", "nowhere", "--set", "summer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source folder does not exist"));

    assert!(!dir.path().join("summer").exists());
}
