//! Rename specs

use crate::prelude::*;

#[test]
fn rename_by_prefix_updates_both_files() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["rename", "1111", "alice laptop"])
        .passes()
        .stdout_has("renamed alice laptop");

    assert_eq!(temp.roster_names(), vec!["alice laptop"]);
    assert_eq!(temp.server_names(), vec!["alice laptop"]);
    // same identity, same flow
    let user = &temp.json("config.json")["inbounds"][0]["users"][0];
    assert_eq!(user["uuid"], ALICE);
    assert_eq!(user["flow"], "xtls-rprx-vision");
}

#[test]
fn ambiguous_prefix_fails() {
    let temp = Project::with_clients();
    temp.file(
        "clientsTable.json",
        r#"[
  {"clientId": "aaaa1111", "clientName": "x", "creationDate": "2026-10-17T09:30:00Z"},
  {"clientId": "aaaa2222", "clientName": "y", "creationDate": "2026-10-17T09:30:00Z"}
]"#,
    );

    temp.sbm()
        .args(&["rename", "aaaa", "z"])
        .fails()
        .stderr_has("ambiguous (2 matches)")
        .stderr_has("more characters");
}
