//! Integration tests for the `wr` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory holding the demo collection from `wr init`.
fn demo_collection() -> (TempDir, PathBuf) {
    let parent = TempDir::new().unwrap();
    wr().args(["init", "demo"])
        .current_dir(parent.path())
        .assert()
        .success();
    let dir = parent.path().join("demo");
    (parent, dir)
}

fn wr() -> Command {
    Command::cargo_bin("wr").unwrap()
}

fn wr_in(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = wr();
    cmd.args(args).args(["-d", dir.to_str().unwrap()]);
    cmd
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_collection() {
    let parent = TempDir::new().unwrap();
    wr().args(["init", "quiznight"])
        .current_dir(parent.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created game collection 'quiznight'"));

    let dir = parent.path().join("quiznight");
    assert!(dir.join("games.json").exists());
    assert!(dir.join("countries.json").exists());
    assert!(dir.join("questions.json").exists());
}

#[test]
fn init_fails_if_dir_exists() {
    let parent = TempDir::new().unwrap();
    fs::create_dir(parent.path().join("quiznight")).unwrap();

    wr().args(["init", "quiznight"])
        .current_dir(parent.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn commands_fail_without_manifest() {
    let dir = TempDir::new().unwrap();
    wr().args(["games", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wr init"));
}

// ---------------------------------------------------------------------------
// games / show
// ---------------------------------------------------------------------------

#[test]
fn games_lists_every_game() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["games"]).assert().success().stdout(
        predicate::str::contains("capitals")
            .and(predicate::str::contains("population-duel"))
            .and(predicate::str::contains("population-ranking"))
            .and(predicate::str::contains("gdp-trend"))
            .and(predicate::str::contains("population-estimate"))
            .and(predicate::str::contains("regions"))
            .and(predicate::str::contains("odd-one-out"))
            .and(predicate::str::contains("7 games")),
    );
}

#[test]
fn show_is_stable_across_runs() {
    let (_tmp, dir) = demo_collection();
    let first = wr_in(&dir, &["show", "regions"]).assert().success();
    let first = String::from_utf8(first.get_output().stdout.clone()).unwrap();
    let second = wr_in(&dir, &["show", "regions"]).assert().success();
    let second = String::from_utf8(second.get_output().stdout.clone()).unwrap();

    assert!(first.contains("Where in the World"));
    assert_eq!(first, second);
    assert!(dir.join(".wr-state.json").exists());
}

#[test]
fn show_unknown_game_fails() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown game: nope"));
}

// ---------------------------------------------------------------------------
// answer
// ---------------------------------------------------------------------------

#[test]
fn answer_rejects_unknown_option() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["answer", "capitals", "zzzzqqq"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no option matches"));

    wr_in(&dir, &["games"])
        .assert()
        .success()
        .stdout(predicate::str::contains("round 2/5").not());
}

#[test]
fn answer_rejects_bad_trend() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["answer", "gdp-trend", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a trend"));
}

#[test]
fn answering_every_round_finishes_the_game() {
    let (_tmp, dir) = demo_collection();
    for _ in 0..2 {
        wr_in(&dir, &["answer", "population-estimate", "100"])
            .assert()
            .success()
            .stdout(predicate::str::contains("million"));
    }
    wr_in(&dir, &["answer", "population-estimate", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished with"));

    wr_in(&dir, &["answer", "population-estimate", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is finished"));

    wr_in(&dir, &["summary"]).assert().success().stdout(
        predicate::str::contains("Population Guess").and(predicate::str::contains("Total score")),
    );
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_quits_on_request() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["play", "odd-one-out"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Odd One Out"));
}

#[test]
fn play_runs_to_completion() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["play", "gdp-trend"])
        .write_stdin("sideways\nup\nup\nup\nup\nup\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("is not a trend")
                .and(predicate::str::contains("Finished with"))
                .and(predicate::str::contains("wr summary")),
        );

    wr_in(&dir, &["games"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finished"));
}

// ---------------------------------------------------------------------------
// reset / mode
// ---------------------------------------------------------------------------

#[test]
fn reset_restarts_a_game() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["answer", "population-estimate", "50"])
        .assert()
        .success();
    wr_in(&dir, &["games"])
        .assert()
        .success()
        .stdout(predicate::str::contains("round 2/3"));

    wr_in(&dir, &["reset", "population-estimate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset 'Population Guess'"));
    wr_in(&dir, &["games"])
        .assert()
        .success()
        .stdout(predicate::str::contains("round 2/3").not());
}

fn stored_seed(dir: &Path, game: &str) -> u64 {
    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join(".wr-state.json")).unwrap()).unwrap();
    state[format!("game/{game}")]["seed"].as_u64().unwrap()
}

#[test]
fn repeated_resets_start_new_games() {
    let (_tmp, dir) = demo_collection();
    let mut seeds = Vec::new();
    for _ in 0..3 {
        wr_in(&dir, &["reset", "gdp-trend"]).assert().success();
        seeds.push(stored_seed(&dir, "gdp-trend"));
    }
    assert_ne!(seeds[0], seeds[1]);
    assert_ne!(seeds[1], seeds[2]);

    wr_in(&dir, &["reset"]).assert().success();
    let after_all = stored_seed(&dir, "gdp-trend");
    assert!(!seeds.contains(&after_all));
}

#[test]
fn mode_off_needs_confirmation() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["mode", "off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wr mode confirm"));

    // Still playable while pending.
    wr_in(&dir, &["answer", "population-estimate", "50"])
        .assert()
        .success();

    wr_in(&dir, &["mode", "confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Game mode is off."));
    wr_in(&dir, &["show", "regions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Game mode is off"));
    wr_in(&dir, &["answer", "population-estimate", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("game mode is off"));

    wr_in(&dir, &["mode", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset"));
    wr_in(&dir, &["games"])
        .assert()
        .success()
        .stdout(predicate::str::contains("round 2/3").not());
}

#[test]
fn mode_cancel_keeps_games_on() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["mode", "off"]).assert().success();
    wr_in(&dir, &["mode", "cancel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stays on"));
    wr_in(&dir, &["mode", "cancel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));
}

// ---------------------------------------------------------------------------
// summary / export
// ---------------------------------------------------------------------------

#[test]
fn summary_without_finished_games() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No finished games yet."));
}

#[test]
fn export_markdown_and_json() {
    let (_tmp, dir) = demo_collection();
    for _ in 0..3 {
        wr_in(&dir, &["answer", "population-estimate", "40"])
            .assert()
            .success();
    }

    wr_in(&dir, &["export", "markdown"]).assert().success().stdout(
        predicate::str::contains("# Game Results").and(predicate::str::contains("Population Guess")),
    );

    let out = dir.join("results.json");
    wr_in(&dir, &["export", "json", "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["games"][0]["id"], "population-estimate");
}

#[test]
fn export_unknown_format_fails() {
    let (_tmp, dir) = demo_collection();
    wr_in(&dir, &["export", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format"));
}
