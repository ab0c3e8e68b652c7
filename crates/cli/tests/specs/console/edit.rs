//! Interactive console specs, driven through piped stdin

use crate::prelude::*;

#[test]
fn console_add_save_quit() {
    let temp = Project::with_clients();

    temp.sbm()
        .stdin("add bob\nsave\nquit\n")
        .passes()
        .stdout_has("1 clients in")
        .stdout_has("added bob")
        .stdout_has("bye");

    assert_eq!(temp.roster_names(), vec!["alice", "bob"]);
    assert_eq!(temp.server_names(), vec!["alice", "bob"]);
}

#[test]
fn console_quit_discarding_leaves_files_alone() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["edit"])
        .stdin("delete 1\ny\nquit\nn\n")
        .passes()
        .stdout_has("deleted alice");

    assert_eq!(temp.read("clientsTable.json"), ROSTER);
}

#[test]
fn console_closed_input_discards() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["edit"])
        .stdin("add bob\n")
        .passes()
        .stdout_has("unsaved changes discarded");

    assert_eq!(temp.roster_names(), vec!["alice"]);
}
