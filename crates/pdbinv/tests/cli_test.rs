//! Integration tests for the `pdbinv` binary.
//!
//! Argument parsing, config failures, and full runs against wiremock
//! PuppetDB servers. Redis is never enabled here.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const SINGLE_NODE: &str = r#"{"all":{"hosts":["host1.example.com"]},"_meta":{"hostvars":{"host1.example.com":{"ipaddress":"10.0.0.1"}}}}"#;

/// Build a [`Command`] for the `pdbinv` binary with env isolation.
///
/// Clears `PDBINV_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn pdbinv_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pdbinv");
    cmd.env("HOME", "/tmp/pdbinv-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/pdbinv-cli-test-nonexistent")
        .env("XDG_CACHE_HOME", "/tmp/pdbinv-cli-test-nonexistent")
        .env_remove("PDBINV_CONFIG")
        .env_remove("PDBINV_MODE")
        .env_remove("PDBINV_USE_REDIS")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a config pointing at `server` and return its path.
fn write_config(dir: &Path, server: &MockServer, extra: &str) -> PathBuf {
    let addr = server.address();
    let yaml = format!(
        "{extra}\npuppetdb_servers:\n  mock:\n    hostname: {}\n    port: {}\n    ssl: false\n",
        addr.ip(),
        addr.port()
    );
    let path = dir.join("config.yml");
    std::fs::write(&path, yaml).unwrap();
    path
}

/// A local port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn mount_single_node(server: &MockServer, hits: u64) {
    Mock::given(method("GET"))
        .and(path("/pdb/query/v4/facts/fqdn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "certname": "a", "name": "fqdn", "value": "host1.example.com" }
        ])))
        .expect(hits)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pdb/query/v4/facts/ipaddress"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "certname": "a", "name": "ipaddress", "value": "10.0.0.1" }
        ])))
        .expect(hits)
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    pdbinv_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("PuppetDB")
            .and(predicate::str::contains("--list"))
            .and(predicate::str::contains("--host"))
            .and(predicate::str::contains("--clear"))
            .and(predicate::str::contains("--build")),
    );
}

#[test]
fn test_version_flag() {
    pdbinv_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pdbinv"));
}

#[test]
fn test_completions_bash() {
    pdbinv_cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_is_exclusive() {
    pdbinv_cmd()
        .args(["--completions", "bash", "--list"])
        .assert()
        .failure()
        .code(2);
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_config_fails_fast() {
    pdbinv_cmd()
        .arg("--list")
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_missing_config_from_env() {
    pdbinv_cmd()
        .env("PDBINV_CONFIG", "/tmp/pdbinv-cli-test-nonexistent/config.yml")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("pdbinv-cli-test-nonexistent"));
}

#[test]
fn test_ssl_without_certificates_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(
        &path,
        "puppetdb_servers:\n  secure:\n    hostname: pdb.example.com\n    port: 8081\n    ssl: true\n",
    )
    .unwrap();

    pdbinv_cmd()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("puppetdb_servers.secure.cacert"));
}

// ── Full runs ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_prints_inventory() {
    let server = MockServer::start().await;
    mount_single_node(&server, 1).await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server, "");

    pdbinv_cmd()
        .arg("--list")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(format!("{SINGLE_NODE}\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_flags_defaults_to_list() {
    let server = MockServer::start().await;
    mount_single_node(&server, 1).await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server, "");

    pdbinv_cmd()
        .env("PDBINV_CONFIG", &config)
        .assert()
        .success()
        .stdout(format!("{SINGLE_NODE}\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_host_prints_empty_object() {
    let server = MockServer::start().await;
    mount_single_node(&server, 0).await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server, "");

    pdbinv_cmd()
        .args(["--host", "host1.example.com", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("{}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_host_does_not_need_redis() {
    let server = MockServer::start().await;
    mount_single_node(&server, 0).await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &server,
        &format!(
            "use_redis: true\nredis_host: 127.0.0.1\nredis_port: {}",
            closed_port()
        ),
    );

    pdbinv_cmd()
        .args(["--host", "host1.example.com", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("{}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_with_unreachable_redis_fails() {
    let server = MockServer::start().await;
    mount_single_node(&server, 0).await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &server,
        &format!(
            "use_redis: true\nredis_host: 127.0.0.1\nredis_port: {}",
            closed_port()
        ),
    );

    pdbinv_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clear_and_build_without_cache_are_silent() {
    let server = MockServer::start().await;
    mount_single_node(&server, 0).await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server, "use_redis: false");

    pdbinv_cmd()
        .args(["--clear", "--build", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upstream_error_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server, "");

    pdbinv_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("HTTP 500"));
}

#[test]
fn test_unreachable_server_is_connection_error() {
    let port = closed_port();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(
        &path,
        format!("puppetdb_servers:\n  down:\n    hostname: 127.0.0.1\n    port: {port}\n"),
    )
    .unwrap();

    pdbinv_cmd()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("Could not connect to PuppetDB"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_development_mode_reuses_responses_across_runs() {
    let server = MockServer::start().await;
    mount_single_node(&server, 1).await;
    let dir = tempfile::tempdir().unwrap();
    let responses = dir.path().join("responses");
    let config = write_config(
        dir.path(),
        &server,
        &format!(
            "mode: development\nresponse_cache_dir: {}",
            responses.display()
        ),
    );

    for _ in 0..2 {
        pdbinv_cmd()
            .arg("--config")
            .arg(&config)
            .assert()
            .success()
            .stdout(format!("{SINGLE_NODE}\n"));
    }
    assert_eq!(std::fs::read_dir(&responses).unwrap().count(), 2);
}
