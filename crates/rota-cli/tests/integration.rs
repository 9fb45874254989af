#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self::with_inout_prefix("http://127.0.0.1:9/status/")
    }

    fn with_inout_prefix(prefix: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("groups")).unwrap();
        let config = serde_json::json!({
            "storage": {
                "data_dir": dir.path().join("data"),
                "conf_dir": dir.path().join("groups"),
            },
            "availability": {
                "inout_api_url_prefix": prefix,
                "inout_unavailable_statuses": ["OOO", "AWAY"],
            }
        });
        std::fs::write(
            dir.path().join("config.json"),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();
        Self { dir }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    fn data(&self, group: &str) -> PathBuf {
        self.dir.path().join("data").join(group)
    }

    fn group(&self, name: &str, strategy: &str, checker: &str, users: &[&str]) {
        let list: String = users.iter().map(|u| format!("  - {u}\n")).collect();
        std::fs::write(
            self.dir.path().join("groups").join(format!("{name}.yaml")),
            format!("strategy: {strategy}\navailability_checker: {checker}\nusers:\n{list}"),
        )
        .unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("autoassigner").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("AUTOASSIGNER_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config());
        cmd
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// assignment
// ---------------------------------------------------------------------------

#[test]
fn assigns_in_round_robin_order() {
    let env = Env::new();
    env.group("team-alpha", "round_robin", "always_available", &["alice", "bob", "charlie"]);

    for expected in ["alice", "bob", "charlie", "alice"] {
        env.cmd()
            .arg("team-alpha")
            .assert()
            .success()
            .stdout(predicate::str::diff(format!("{expected}\n")));
    }

    let index_log = read(&env.data("team-alpha").join("index.log"));
    assert_eq!(index_log.lines().count(), 4);
    assert!(index_log.lines().last().unwrap().ends_with("-- 0"));
    assert_eq!(read(&env.data("team-alpha").join("assignments.log")).lines().count(), 4);
}

#[test]
fn dry_run_does_not_persist() {
    let env = Env::new();
    env.group("team-alpha", "round_robin", "always_available", &["alice", "bob"]);

    for _ in 0..2 {
        env.cmd()
            .args(["team-alpha", "--dry-run"])
            .assert()
            .success()
            .stdout("[DRY RUN] Would assign to: alice\n");
    }
    assert!(!env.data("team-alpha").exists());
}

#[test]
fn json_assignment_output() {
    let env = Env::new();
    env.group("team-alpha", "least_assigned", "always_available", &["alice", "bob"]);

    let out = env
        .cmd()
        .args(["team-alpha", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["user"], "alice");
    assert_eq!(value["index"], 0);
    assert_eq!(value["strategy"], "least_assigned");
    assert_eq!(value["user_count"], 1);
    assert_eq!(value["dry_run"], false);
}

#[test]
fn remote_checker_skips_out_of_office_member() {
    let mut server = mockito::Server::new();
    let _alice = server
        .mock("GET", "/status/alice")
        .with_status(200)
        .with_body(r#"{"inOutLocation":"OOO"}"#)
        .create();
    let _bob = server
        .mock("GET", "/status/bob")
        .with_status(200)
        .with_body(r#"{"inOutLocation":"OFFICE"}"#)
        .create();

    let env = Env::with_inout_prefix(&format!("{}/status/", server.url()));
    env.group("oncall", "round_robin", "inout", &["alice", "bob"]);

    env.cmd().arg("oncall").assert().success().stdout("bob\n");
}

#[test]
fn remote_checker_failure_is_reported() {
    let mut server = mockito::Server::new();
    let _m = server.mock("GET", "/status/alice").with_status(404).create();

    let env = Env::with_inout_prefix(&format!("{}/status/", server.url()));
    env.group("oncall", "round_robin", "inout", &["alice", "bob"]);

    env.cmd()
        .arg("oncall")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("availability check error for user alice"));
}

#[test]
fn nobody_available_fails() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", mockito::Matcher::Regex(r"^/status/.+$".to_string()))
        .with_status(200)
        .with_body(r#"{"inOutLocation":"AWAY"}"#)
        .create();

    let env = Env::with_inout_prefix(&format!("{}/status/", server.url()));
    env.group("oncall", "random", "inout", &["alice", "bob"]);

    env.cmd()
        .arg("oncall")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no available assignee found for group oncall"));
}

#[test]
fn failed_commit_prints_no_assignee() {
    let env = Env::new();
    env.group("team-alpha", "round_robin", "always_available", &["alice"]);
    std::fs::write(env.dir.path().join("data"), "not a directory").unwrap();

    env.cmd()
        .arg("team-alpha")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("failed to record assignment for group team-alpha"));
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_group_suggests_list_groups() {
    let env = Env::new();
    env.cmd()
        .arg("ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "configuration error for group ghost: group config file not found",
        ))
        .stderr(predicate::str::contains("Use --list-groups"));
}

#[test]
fn reset_unknown_group_suggests_list_groups() {
    let env = Env::new();
    env.cmd()
        .args(["ghost", "--reset-counts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error for group ghost"))
        .stderr(predicate::str::contains("Use --list-groups"));
}

#[test]
fn unknown_strategy_is_configuration_error() {
    let env = Env::new();
    env.group("team-alpha", "weighted", "always_available", &["alice"]);
    env.cmd()
        .arg("team-alpha")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown strategy: weighted"));
}

#[test]
fn missing_config_file() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("autoassigner")
        .unwrap()
        .current_dir(dir.path())
        .args(["--config", "nope.json", "team-alpha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn incomplete_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"storage": {"data_dir": "/tmp/x"}}"#).unwrap();
    Command::cargo_bin("autoassigner")
        .unwrap()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("team-alpha")
        .assert()
        .failure()
        .stderr(predicate::str::contains("conf_dir is required"));
}

#[test]
fn group_name_is_required() {
    let env = Env::new();
    env.cmd().assert().failure();
}

// ---------------------------------------------------------------------------
// counts
// ---------------------------------------------------------------------------

#[test]
fn show_counts_in_configured_order() {
    let env = Env::new();
    env.group("team-alpha", "round_robin", "always_available", &["charlie", "alice", "bob"]);
    env.cmd().arg("team-alpha").assert().success();

    env.cmd()
        .args(["team-alpha", "--show-counts"])
        .assert()
        .success()
        .stdout("Assignment counts for group team-alpha:\n  charlie: 1\n  alice: 0\n  bob: 0\n");
}

#[test]
fn reset_counts_zeroes_every_member() {
    let env = Env::new();
    env.group("team-alpha", "round_robin", "always_available", &["alice", "bob"]);
    env.cmd().arg("team-alpha").assert().success();
    env.cmd().arg("team-alpha").assert().success();

    env.cmd()
        .args(["team-alpha", "--reset-counts"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully reset assignment counts for group team-alpha",
        ));

    env.cmd()
        .args(["team-alpha", "--show-counts"])
        .assert()
        .success()
        .stdout("Assignment counts for group team-alpha:\n  alice: 0\n  bob: 0\n");

    // position history is untouched, so rotation resumes after bob
    env.cmd().arg("team-alpha").assert().success().stdout("alice\n");
}

#[test]
fn show_and_reset_take_precedence_over_dry_run() {
    let env = Env::new();
    env.group("team-alpha", "round_robin", "always_available", &["alice", "bob"]);
    env.cmd().arg("team-alpha").assert().success();

    env.cmd()
        .args(["team-alpha", "--show-counts", "--dry-run"])
        .assert()
        .success()
        .stdout("Assignment counts for group team-alpha:\n  alice: 1\n  bob: 0\n");

    env.cmd()
        .args(["team-alpha", "--reset-counts", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully reset"));

    env.cmd()
        .args(["team-alpha", "--show-counts", "--reset-counts"])
        .assert()
        .success()
        .stdout("Assignment counts for group team-alpha:\n  alice: 0\n  bob: 0\n");
}

#[test]
fn show_counts_unknown_group() {
    let env = Env::new();
    env.cmd()
        .args(["ghost", "--show-counts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use --list-groups"));
}

// ---------------------------------------------------------------------------
// list-groups / version
// ---------------------------------------------------------------------------

#[test]
fn list_groups_sorted() {
    let env = Env::new();
    env.group("zeta", "random", "always_available", &["a"]);
    env.group("alpha", "random", "always_available", &["a"]);

    env.cmd()
        .arg("--list-groups")
        .assert()
        .success()
        .stdout("Available groups:\n  alpha\n  zeta\n");
}

#[test]
fn list_groups_empty() {
    let env = Env::new();
    env.cmd()
        .arg("-l")
        .assert()
        .success()
        .stdout("No groups found in config directory\n");
}

#[test]
fn version_needs_no_config() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("autoassigner")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("AUTOASSIGNER_CONFIG")
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Version: "))
        .stdout(predicate::str::contains("Git Commit: "));
}
