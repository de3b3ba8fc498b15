//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn toeic(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("toeic").unwrap();
    cmd.env("TOEIC_DATA_DIR", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = toeic(dir).arg("--json").args(args).output().unwrap();
    assert!(output.status.success(), "toeic {:?} failed", args);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn dashboard_on_fresh_data() {
    let dir = TempDir::new().unwrap();
    toeic(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal:          800"))
        .stdout(predicate::str::contains("550"))
        .stdout(predicate::str::contains("250 points to go"))
        .stdout(predicate::str::contains("Contracts"));

    // Reading never creates the state file
    assert!(!dir.path().join("toeic-master-storage.json").exists());
}

#[test]
fn goal_persists_between_runs() {
    let dir = TempDir::new().unwrap();
    toeic(&dir)
        .args(["goal", "900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal set to 900"));

    assert!(dir.path().join("toeic-master-storage.json").exists());
    assert_eq!(json(&dir, &["goal"])["goal"], 900);
}

#[test]
fn score_total_is_sum() {
    let dir = TempDir::new().unwrap();
    let result = json(
        &dir,
        &["score", "add", "--name", "ETS 1", "--listening", "300", "--reading", "250"],
    );
    assert_eq!(result["totalScore"], 550);

    let scores = json(&dir, &["score", "list"]);
    assert_eq!(scores.as_array().unwrap().len(), 2);
}

#[test]
fn import_then_study_to_completion() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("words.txt");
    std::fs::write(&file, "Contract, Hợp đồng, n, We signed it.\nbroken row\n").unwrap();

    let deck = json(
        &dir,
        &["deck", "import", "Business", "--file", file.to_str().unwrap()],
    );
    let cards = deck["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["term"], "Contract");
    assert_eq!(cards[0]["definition"], "Hợp đồng");
    assert_eq!(cards[0]["type"], "n");
    assert_eq!(cards[0]["example"], "We signed it.");
    assert_eq!(cards[0]["status"], "new");

    let deck_id = deck["id"].as_str().unwrap().to_string();
    toeic(&dir)
        .args(["study", &deck_id])
        .write_stdin("f\nm\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Card 1 of 1"))
        .stdout(predicate::str::contains("Hợp đồng"))
        .stdout(predicate::str::contains("All mastered!"));

    let shown = json(&dir, &["deck", "show", &deck_id]);
    assert_eq!(shown["cards"][0]["status"], "mastered");
    assert!(shown["cards"][0]["lastReviewed"].is_string());
}

#[test]
fn import_from_stdin() {
    let dir = TempDir::new().unwrap();
    toeic(&dir)
        .args(["deck", "import", "Piped"])
        .write_stdin("alpha, a\nbeta, b\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 cards"));
}

#[test]
fn study_unknown_deck_fails() {
    let dir = TempDir::new().unwrap();
    toeic(&dir)
        .args(["study", "deck-nope"])
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deck not found: deck-nope"));
}

#[test]
fn bug_toggle_twice_restores() {
    let dir = TempDir::new().unwrap();
    let bug = json(
        &dir,
        &[
            "bug", "add", "--test", "ETS-2", "--part", "5", "--question", "112",
            "--error-type", "trap/trick", "--cause", "Missed negation", "--fix",
            "Read the whole sentence",
        ],
    );
    assert_eq!(bug["errorType"], "Trap/Trick");
    assert_eq!(bug["reviewed"], false);

    let id = bug["id"].as_str().unwrap();
    assert_eq!(json(&dir, &["bug", "toggle", id])["reviewed"], true);
    assert_eq!(json(&dir, &["bug", "toggle", id])["reviewed"], false);
}

#[test]
fn bug_part_out_of_range() {
    let dir = TempDir::new().unwrap();
    toeic(&dir)
        .args([
            "bug", "add", "--test", "ETS-2", "--part", "9", "--question", "1", "--cause",
            "x", "--fix", "y",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid TOEIC part 9"));
}

#[test]
fn task_add_toggle_and_list() {
    let dir = TempDir::new().unwrap();
    let task = json(&dir, &["task", "add", "Shadow Part 2", "--phase", "skills"]);
    assert_eq!(task["phase"], "Skills");

    let id = task["id"].as_str().unwrap();
    toeic(&dir)
        .args(["task", "toggle", id])
        .assert()
        .success()
        .stdout(predicate::str::contains("as done"));

    let pending = json(&dir, &["task", "list", "--pending"]);
    assert!(pending.as_array().unwrap().iter().all(|t| t["id"] != id));

    toeic(&dir)
        .args(["task", "add", "Nope", "--phase", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid task phase"));
}

#[test]
fn reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    toeic(&dir).args(["goal", "950"]).assert().success();
    toeic(&dir).args(["deck", "add", "Scratch"]).assert().success();

    toeic(&dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data reset to defaults"));

    assert_eq!(json(&dir, &["goal"])["goal"], 800);
    let decks = json(&dir, &["deck", "list"]);
    assert!(decks.as_array().unwrap().iter().all(|d| d["name"] != "Scratch"));
}

#[test]
fn reset_without_confirmation_aborts() {
    let dir = TempDir::new().unwrap();
    toeic(&dir).args(["goal", "950"]).assert().success();
    toeic(&dir)
        .arg("reset")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted"));
    assert_eq!(json(&dir, &["goal"])["goal"], 950);
}

#[test]
fn config_lives_in_data_dir() {
    let dir = TempDir::new().unwrap();
    toeic(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    std::fs::write(dir.path().join("config.toml"), "default_goal = 650\n").unwrap();
    assert_eq!(json(&dir, &["goal"])["goal"], 650);
}

#[test]
fn json_reset_requires_yes() {
    let dir = TempDir::new().unwrap();
    toeic(&dir).args(["goal", "950"]).assert().success();
    toeic(&dir)
        .args(["--json", "reset"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(json(&dir, &["goal"])["goal"], 950);

    let state = json(&dir, &["reset", "--yes"]);
    assert_eq!(state["goal"], 800);
}

#[test]
fn config_set_writes_file() {
    let dir = TempDir::new().unwrap();
    toeic(&dir)
        .args(["config", "set", "default_goal", "700"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set default_goal = 700"));

    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("default_goal = 700"));
    assert_eq!(json(&dir, &["goal"])["goal"], 700);

    toeic(&dir)
        .args(["config", "set", "display.theme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
