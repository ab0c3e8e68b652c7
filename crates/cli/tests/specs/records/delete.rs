//! Delete specs

use crate::prelude::*;

#[test]
fn delete_with_yes_removes_from_both_files() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["delete", ALICE, "--yes"])
        .passes()
        .stdout_has("deleted alice");

    assert!(temp.roster_names().is_empty());
    assert!(temp.server_names().is_empty());
    // the unmanaged inbound is untouched
    assert_eq!(temp.json("config.json")["inbounds"][1]["tag"], "ss-in");
}

#[test]
fn delete_asks_and_declining_changes_nothing() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["delete", ALICE])
        .stdin("n\n")
        .passes()
        .stderr_has("delete alice");

    assert_eq!(temp.read("clientsTable.json"), ROSTER);
    assert!(temp.backups().is_empty());
}

#[test]
fn delete_confirmed_on_stdin() {
    let temp = Project::with_clients();

    temp.sbm().args(&["delete", "1111"]).stdin("y\n").passes();

    assert!(temp.roster_names().is_empty());
}
