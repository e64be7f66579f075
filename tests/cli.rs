//
//  sonar-cli
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end runs of the `sq` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `sq` with an isolated config file and no credentials from the environment.
fn sq(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sq").unwrap();
    cmd.env("SQ_CONFIG", dir.path().join("config.toml"))
        .env_remove("SQ_HOST")
        .env_remove("SONAR_HOST_URL")
        .env_remove("SONAR_TOKEN")
        .env_remove("SONAR_USER")
        .env_remove("SONAR_PASSWORD");
    cmd
}

#[test]
fn version_prints_crate_version() {
    let dir = TempDir::new().unwrap();
    sq(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    sq(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("auth"));
}

#[test]
fn config_path_honours_override() {
    let dir = TempDir::new().unwrap();
    sq(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_set_then_get_normalizes_url() {
    let dir = TempDir::new().unwrap();
    sq(&dir)
        .args(["config", "set", "url", "sonar.example.com/", "--for-host", "work"])
        .assert()
        .success();

    sq(&dir)
        .args(["config", "get", "hosts.work.url"])
        .assert()
        .success()
        .stdout("https://sonar.example.com\n");

    assert!(dir.path().join("config.toml").is_file());
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    sq(&dir)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid key"));
}

#[test]
fn project_delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    sq(&dir)
        .args(["project", "delete", "my-app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn invalid_token_type_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    sq(&dir)
        .args(["auth", "token", "create", "ci", "--type", "ROOT_TOKEN"])
        .assert()
        .code(2);
}

#[test]
fn api_command_prints_response() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/server/version")
        .match_header("authorization", "Bearer squ_env")
        .with_header("content-type", "text/plain")
        .with_body("10.7.0.96327")
        .create();

    let dir = TempDir::new().unwrap();
    sq(&dir)
        .args(["api", "api/server/version"])
        .env("SONAR_HOST_URL", server.url())
        .env("SONAR_TOKEN", "squ_env")
        .assert()
        .success()
        .stdout("10.7.0.96327\n");
    mock.assert();
}

#[test]
fn not_found_exits_with_resource_code() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/projects/delete")
        .with_status(404)
        .with_body(r#"{"errors": [{"msg": "Project 'ghost' not found"}]}"#)
        .create();

    let dir = TempDir::new().unwrap();
    sq(&dir)
        .args(["project", "delete", "ghost", "--yes"])
        .env("SONAR_HOST_URL", server.url())
        .env("SONAR_TOKEN", "squ_env")
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Project 'ghost' not found"));
    mock.assert();
}

#[test]
fn events_print_one_json_line_each() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/push/sonarlint_events")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("projectKeys".into(), "my-app".into()),
            mockito::Matcher::UrlEncoded("languages".into(), "java,py".into()),
        ]))
        .with_header("content-type", "text/event-stream")
        .with_body("event: IssueChanged\ndata: {\"key\":\"AX1\"}\n\ndata: ping\n\n")
        .create();

    let dir = TempDir::new().unwrap();
    sq(&dir)
        .args(["events", "-p", "my-app", "-l", "java", "-l", "py", "--json"])
        .env("SONAR_HOST_URL", server.url())
        .env("SONAR_TOKEN", "squ_env")
        .assert()
        .success()
        .stdout(
            "{\"event\":\"IssueChanged\",\"data\":\"{\\\"key\\\":\\\"AX1\\\"}\"}\n\
             {\"event\":\"message\",\"data\":\"ping\"}\n",
        );
    mock.assert();
}
