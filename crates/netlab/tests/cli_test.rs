//! Integration tests for the `netlab` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! transcripts, and error handling against the built-in catalog.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `netlab` binary with env isolation.
///
/// Clears all `NETLAB_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn netlab_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("netlab");
    cmd.env("HOME", "/tmp/netlab-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/netlab-cli-test-nonexistent")
        .env_remove("NETLAB_SCENARIO")
        .env_remove("NETLAB_CATALOG")
        .env_remove("NETLAB_OUTPUT")
        .env_remove("NETLAB_DEFAULT_SCENARIO")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

const CATALOG: &str = r#"
[[scenario]]
id = 21
title = "Custom | Lab bench"
summary = "A bench network with no faults."
domain_map = { "example.com" = "93.184.216.34" }

[scenario.initial_network]
ip_address = "10.1.1.20"
subnet_mask = "255.255.255.0"
gateway = "10.1.1.1"
dns = "8.8.8.8"

[scenario.initial_router]
dhcp_enabled = false
lan_gateway = "10.1.1.1"
lan_subnet_mask = "255.255.255.0"
dhcp_range_start = "10.1.1.100"
dhcp_range_end = "10.1.1.150"
dhcp_dns = "8.8.8.8"
wan_connected = true
"#;

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = netlab_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    netlab_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("scenarios")
            .and(predicate::str::contains("exec"))
            .and(predicate::str::contains("shell")),
    );
}

#[test]
fn test_version_flag() {
    netlab_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("netlab"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_zsh() {
    netlab_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    netlab_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn test_scenarios_list_plain() {
    netlab_cmd()
        .args(["scenarios", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n");
}

#[test]
fn test_scenarios_list_table() {
    netlab_cmd()
        .args(["scenarios", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Title")
                .and(predicate::str::contains("Exercise 6"))
                .and(predicate::str::contains("pool-exhausted")),
        );
}

#[test]
fn test_scenarios_show_json() {
    let output = netlab_cmd()
        .args(["scenarios", "show", "6", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], 6);
    assert_eq!(value["conflicting_ip"], "192.168.1.50");
}

#[test]
fn test_scenarios_show_missing_exits_not_found() {
    let output = netlab_cmd()
        .args(["scenarios", "show", "99"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("Scenario 99 not found"), "{text}");
    assert!(text.contains("1, 2, 3"), "{text}");
}

// ── Exec ────────────────────────────────────────────────────────────

#[test]
fn test_exec_ipconfig_shows_apipa() {
    netlab_cmd()
        .args(["-s", "1", "exec", "ipconfig"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "IPv4 Address. . . . . . . . . . . : 169.254.45.12",
        ));
}

#[test]
fn test_exec_ping_times_out_without_gateway() {
    netlab_cmd()
        .args(["--scenario", "1", "exec", "ping", "8.8.8.8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lost = 4 (100% loss)"));
}

#[test]
fn test_exec_router_edit_restores_connectivity() {
    netlab_cmd()
        .args(["-s", "1", "exec", "--router", "dhcp=on", "ping", "baidu.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reply from 39.156.66.14"));
}

#[test]
fn test_exec_adapter_edit_clears_conflict() {
    netlab_cmd()
        .args(["-s", "6", "exec", "-a", "ip=192.168.1.60", "ping", "192.168.1.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Received = 4").and(predicate::str::contains("Hint").not()));
}

#[test]
fn test_exec_unknown_command_keeps_case() {
    netlab_cmd()
        .args(["exec", "Foo", "bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "'Foo' is not recognized as an internal or external command",
        ));
}

#[test]
fn test_exec_history_lists_system_lines() {
    netlab_cmd()
        .args(["-s", "1", "exec", "--history", "-r", "dhcp=on", "ipconfig"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("System: router configuration updated.")
                .and(predicate::str::contains("System: DHCP assigned IP address 192.168.1.100."))
                .and(predicate::str::contains(r"C:\> ipconfig")),
        );
}

#[test]
fn test_exec_bad_edit_is_usage_error() {
    let output = netlab_cmd()
        .args(["exec", "-r", "dhcp=maybe", "ipconfig"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("expected on/off"));
}

#[test]
fn test_exec_router_edit_rejected_without_router_tool() {
    let output = netlab_cmd()
        .args(["-s", "3", "exec", "-r", "dhcp=on", "ipconfig"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("does not allow router changes"));
}

#[test]
fn test_effective_adapter_edit_rejected_without_network_tool() {
    let output = netlab_cmd()
        .args(["-s", "8", "effective", "-a", "ip-mode=manual"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("does not allow network changes"));
}

#[test]
fn test_exec_json_report() {
    let output = netlab_cmd()
        .args(["-s", "7", "-o", "json", "exec", "nslookup", "baidu.com"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["scenario"], 7);
    assert_eq!(value["command"], "nslookup baidu.com");
    assert!(value["output"].as_str().unwrap().contains("Non-existent domain"));
}

// ── Effective ───────────────────────────────────────────────────────

#[test]
fn test_effective_plain_prints_address() {
    netlab_cmd()
        .args(["-s", "5", "-o", "plain", "effective"])
        .assert()
        .success()
        .stdout("169.254.105.95\n");
}

#[test]
fn test_effective_after_range_edit_leases() {
    netlab_cmd()
        .args(["-s", "5", "effective", "-r", "start=192.168.1.100", "-r", "end=192.168.1.200"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Source:    leased")
                .and(predicate::str::contains("IP:        192.168.1.100")),
        );
}

// ── Shell ───────────────────────────────────────────────────────────

#[test]
fn test_shell_reads_stdin_script() {
    netlab_cmd()
        .args(["-s", "8", "shell"])
        .write_stdin("ping baidu.com\n:router wan=on\nping baidu.com\n:quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[8] Exercise 8")
                .and(predicate::str::contains("Request timed out."))
                .and(predicate::str::contains("Reply from 39.156.66.14")),
        );
}

// ── Catalog file ────────────────────────────────────────────────────

#[test]
fn test_custom_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labs.toml");
    std::fs::write(&path, CATALOG).unwrap();

    netlab_cmd()
        .arg("--catalog")
        .arg(&path)
        .args(["exec", "ping", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pinging example.com [93.184.216.34]"));
}

#[test]
fn test_unsupported_catalog_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labs.ini");
    std::fs::write(&path, CATALOG).unwrap();

    let output = netlab_cmd()
        .arg("--catalog")
        .arg(&path)
        .args(["scenarios", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Unsupported catalog file"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_prints_location() {
    netlab_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults() {
    netlab_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output = \"table\""));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = netlab_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_exec_requires_command() {
    netlab_cmd().arg("exec").assert().failure().code(2);
}
