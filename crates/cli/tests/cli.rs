//! Smoke tests for the `netgenius` binary, run offline with `--model mock`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn netgenius(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("netgenius").unwrap();
    cmd.arg("--root").arg(root.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("netgenius")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_init_writes_config_and_prompts() {
    let temp = TempDir::new().unwrap();

    netgenius(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    let ng_dir = temp.path().join(".netgenius");
    assert!(ng_dir.join("config.toml").exists());
    assert!(ng_dir.join("prompts/intent.md").exists());
}

#[test]
fn test_init_refuses_existing_directory_without_force() {
    let temp = TempDir::new().unwrap();
    netgenius(&temp).args(["init", "--minimal"]).assert().success();

    netgenius(&temp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    netgenius(&temp).args(["init", "--force"]).assert().success();
}

#[test]
fn test_ask_manual_prints_script() {
    let temp = TempDir::new().unwrap();

    netgenius(&temp)
        .args(["--model", "mock", "ask", "show", "interfaces", "on", "192.168.1.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show interfaces on 192.168.1.1"))
        .stdout(predicate::str::contains("ConnectHandler"));
}

#[test]
fn test_ask_execute_appends_output() {
    let temp = TempDir::new().unwrap();

    netgenius(&temp)
        .args(["--model", "mock", "ask", "--execute", "show ip interface brief"])
        .assert()
        .success()
        .stdout(predicate::str::contains("administratively down"));
}

#[test]
fn test_ask_agent_json_transcript() {
    let temp = TempDir::new().unwrap();

    let output = netgenius(&temp)
        .args(["--model", "mock", "ask", "--agent", "--json", "check uplinks"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let messages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages[0]["content"], "check uplinks");
    assert_eq!(messages.last().unwrap()["kind"]["type"], "agentResponse");
}

#[test]
fn test_audit_reads_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("router.cfg");
    std::fs::write(&config_path, "line vty 0 4\n transport input telnet\n").unwrap();

    netgenius(&temp)
        .args(["--model", "mock", "audit"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 72/100"));
}

#[test]
fn test_missing_file_fails() {
    let temp = TempDir::new().unwrap();

    netgenius(&temp)
        .args(["--model", "mock", "logs", "does-not-exist.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_unknown_model_is_rejected() {
    let temp = TempDir::new().unwrap();

    netgenius(&temp)
        .args(["--model", "gpt-4o", "ask", "show version"])
        .assert()
        .failure();
}
