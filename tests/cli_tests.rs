//! End-to-end tests of the segcat binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn segcat(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("segcat").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SEGCAT_SETTINGS")
        .env_remove("SEGCAT_ENGINE");
    cmd
}

fn seed(dir: &TempDir, ranges: &str) {
    std::fs::write(dir.path().join("movie.mkv"), b"video").unwrap();
    std::fs::write(dir.path().join("config.json"), ranges).unwrap();
}

#[test]
fn test_missing_input_is_fatal() {
    let temp = TempDir::new().unwrap();
    segcat(&temp)
        .args(["-o", "clip.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input file"));
}

#[test]
fn test_missing_output_is_fatal() {
    let temp = TempDir::new().unwrap();
    segcat(&temp)
        .args(["-i", "movie.mkv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no output file"));
}

#[test]
fn test_help_shows_config_example() {
    let temp = TempDir::new().unwrap();
    segcat(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00:12 00:08:00"));
}

#[test]
fn test_dry_run_produces_manifest_and_report() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "00:00:10 00:00:20\n00:01:00 00:01:30\n");

    segcat(&temp)
        .args(["-i", "movie.mkv", "-o", "clip.mp4", "--dry-run", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"master_reused\": false"));

    let manifest = temp.path().join("movie_tmp").join("clips-clip.mp4.txt");
    let content = std::fs::read_to_string(manifest).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("0.mp4'"));
    assert!(lines[1].ends_with("1.mp4'"));
}

#[test]
fn test_malformed_config_fails_without_work_dir() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "00:00:10\n");

    segcat(&temp)
        .args(["-i", "movie.mkv", "-o", "clip.mp4", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading range config"));

    assert!(!temp.path().join("movie_tmp").exists());
}

#[cfg(unix)]
#[test]
fn test_engine_failure_aborts_at_master() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "10 20\n");

    segcat(&temp)
        .args(["-i", "movie.mkv", "-o", "clip.mp4", "--engine", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("encoding master file"));

    assert!(!temp.path().join("clip.mp4").exists());
}
