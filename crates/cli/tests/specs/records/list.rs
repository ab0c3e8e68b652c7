//! List specs

use crate::prelude::*;

#[test]
fn list_shows_rows_in_roster_order() {
    let temp = Project::with_clients();
    temp.sbm().args(&["add", "bob"]).passes();

    let out = temp.sbm().args(&["list"]).passes().stdout();
    let alice = out.find("alice").unwrap();
    let bob = out.find("bob").unwrap();
    assert!(alice < bob);
    assert!(out.contains("  1  11111111"));
    assert!(out.contains("Sat Oct 17 09:30:00 2026"));
}

#[test]
fn list_json_is_machine_readable() {
    let temp = Project::with_clients();

    let json = temp
        .sbm()
        .args(&["list", "--format", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json[0]["row"], 1);
    assert_eq!(json[0]["id"], ALICE);
    assert_eq!(json[0]["name"], "alice");
}

#[test]
fn list_seeds_from_server_users_without_writing() {
    let temp = Project::with_clients();
    std::fs::remove_file(temp.path().join("clientsTable.json")).unwrap();

    temp.sbm().args(&["list"]).passes().stdout_has("alice");

    assert!(!temp.exists("clientsTable.json"));
}

#[test]
fn list_of_empty_roster() {
    let temp = Project::with_clients();
    temp.file(
        "config.json",
        r#"{"inbounds": [{"type": "vless", "tag": "vless-in", "users": []}]}"#,
    );
    temp.file("clientsTable.json", "[]");

    temp.sbm().args(&["list"]).passes().stdout_has("No clients");
}
