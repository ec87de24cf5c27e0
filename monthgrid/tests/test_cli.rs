// Allow deprecated APIs (assert_cmd::cargo_bin is deprecated but still works)
#![allow(deprecated)]

use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use rstest::rstest;
use std::fs;
use std::path::Path;
use std::process::Command; // Run programs
use tempfile::TempDir;

/// A command isolated from the user's config, store and locale.
fn monthgrid(dir: &Path) -> Command {
    let config = dir.join("config.json");
    if !config.exists() {
        fs::write(&config, r#"{"load_system_fonts": false, "font_timeout_ms": 500}"#).unwrap();
    }
    let mut cmd = Command::cargo_bin("monthgrid").unwrap();
    cmd.arg("--config")
        .arg(config)
        .arg("--store")
        .arg(dir.join("store.json"))
        .env_remove("LC_ALL")
        .env_remove("LC_MESSAGES")
        .env("LANG", "C")
        .env_remove("RUST_LOG");
    cmd
}

fn write_settings(dir: &Path, text: &str) -> std::path::PathBuf {
    let path = dir.join("settings.json");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_settings_defaults() {
    let dir = TempDir::new().unwrap();
    monthgrid(dir.path())
        .args(["settings", "defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""titlePosition": "center""#))
        .stdout(predicate::str::contains(r#""useLongDayNames": false"#));
}

#[test]
fn test_settings_check_accepts_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaults.json");
    monthgrid(dir.path())
        .args(["settings", "defaults", "-o"])
        .arg(&path)
        .assert()
        .success();

    monthgrid(dir.path())
        .args(["settings", "check"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings imported successfully!"));
}

#[rstest]
#[case(r#"{"colors": 5}"#)]
#[case("not json")]
#[case(r#"{"fontFamily": "Arial"}"#)]
fn test_settings_check_rejects(#[case] text: &str) {
    let dir = TempDir::new().unwrap();
    let path = write_settings(dir.path(), text);
    monthgrid(dir.path())
        .args(["settings", "check"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings format"));
}

#[rstest]
#[case("2024-09", 600, 400, None)]
#[case("202402", 1200, 800, Some("2"))]
fn test_render(
    #[case] month: &str,
    #[case] width: u32,
    #[case] height: u32,
    #[case] scale: Option<&str>,
) {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("month.png");
    let mut cmd = monthgrid(dir.path());
    cmd.args(["render", "--month", month, "--output"]).arg(&output);
    if let Some(scale) = scale {
        cmd.args(["--scale", scale]);
    }
    cmd.assert().success();

    let image = image::open(&output).unwrap();
    assert_eq!((image.width(), image.height()), (width, height));
}

#[rstest]
#[case("2024-13")]
#[case("2024")]
#[case("0999-01")]
fn test_render_rejects_month(#[case] month: &str) {
    let dir = TempDir::new().unwrap();
    monthgrid(dir.path())
        .args(["render", "--month", month, "--output"])
        .arg(dir.path().join("month.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter numbers only"));
    assert!(!dir.path().join("month.png").exists());
}

#[test]
fn test_export_archive() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    monthgrid(dir.path())
        .args(["export", "--year", "2024", "--width", "300", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("calendar-2024-300x200.zip"))
        .stderr(predicate::str::contains("Generating 12 of 12"));

    let file = fs::File::open(out.join("calendar-2024-300x200.zip")).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 12);
    assert!(archive.file_names().any(|n| n == "2024-12-December.png"));
}

#[test]
fn test_export_rejects_dimensions() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    monthgrid(dir.path())
        .args(["export", "--year", "2024", "--width", "0", "--height", "200"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter valid width and height values",
        ));
    assert!(!out.exists() || fs::read_dir(&out).unwrap().next().is_none());
}

#[test]
fn test_overview() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("overview");
    monthgrid(dir.path())
        .args(["overview", "--year", "2023", "--output-dir"])
        .arg(&out)
        .assert()
        .success();

    let image = image::open(out.join("2023-06-June.png")).unwrap();
    assert_eq!((image.width(), image.height()), (510, 340));
    assert_eq!(fs::read_dir(&out).unwrap().count(), 12);
}

#[test]
fn test_language_persists() {
    let dir = TempDir::new().unwrap();
    monthgrid(dir.path())
        .args(["language", "show"])
        .assert()
        .success()
        .stdout("en\n");

    monthgrid(dir.path())
        .args(["language", "set", "ru"])
        .assert()
        .success();

    monthgrid(dir.path())
        .args(["language", "show"])
        .assert()
        .success()
        .stdout("ru\n");

    let store = fs::read_to_string(dir.path().join("store.json")).unwrap();
    assert!(store.contains(r#""calendar-language""#));
}

#[test]
fn test_language_rejects_unknown() {
    let dir = TempDir::new().unwrap();
    monthgrid(dir.path())
        .args(["language", "set", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Available: en, ru"));
}

#[test]
fn test_locale_detection() {
    let dir = TempDir::new().unwrap();
    monthgrid(dir.path())
        .env("LANG", "ru_RU.UTF-8")
        .args(["language", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* ru  Русский (Russian)"));
}

#[test]
fn test_fonts() {
    let dir = TempDir::new().unwrap();
    monthgrid(dir.path())
        .arg("fonts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Roboto"))
        .stdout(predicate::str::contains("Courier New"));
}
