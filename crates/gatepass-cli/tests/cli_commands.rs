use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gatepass"));
    cmd.env("HOME", home);
    cmd
}

#[test]
fn whoami_command_uses_access_token() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();

    let profile_body = json!({
        "success": true,
        "data": {
            "id": "u-1",
            "fullName": "Asha Shrestha",
            "email": "asha@example.com",
            "role": "attendee"
        }
    });
    server
        .mock("GET", "/auth/profile")
        .match_header("authorization", "Bearer token")
        .with_status(200)
        .with_body(profile_body.to_string())
        .create();

    base_cmd(home_dir.path())
        .args([
            "--addr",
            &server.url(),
            "--token",
            "token",
            "--insecure",
            "whoami",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("asha@example.com"));
}

#[test]
fn event_list_renders_a_table() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();

    let list_body = json!({
        "success": true,
        "data": [{
            "id": "ev-1",
            "title": "Indie Night",
            "description": "desc",
            "venue": "Hall A",
            "startsAt": "2026-09-01T18:00:00Z",
            "price": 500.0,
            "capacity": 100,
            "ticketsSold": 12,
            "status": "published",
            "organizerId": "org-1"
        }]
    });
    server
        .mock("GET", "/events")
        .with_status(200)
        .with_body(list_body.to_string())
        .create();

    base_cmd(home_dir.path())
        .args([
            "--addr",
            &server.url(),
            "--token",
            "token",
            "--insecure",
            "event",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Indie Night"))
        .stdout(predicate::str::contains("12/100"));
}

#[test]
fn commands_without_a_session_point_at_login() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["ticket", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `gatepass login`"));
}
