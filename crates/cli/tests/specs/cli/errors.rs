//! Error reporting specs
//!
//! Failures print a message, context and suggestions on stderr and exit
//! non-zero without touching any file.

use crate::prelude::*;

#[test]
fn missing_server_config_fails_with_suggestion() {
    let temp = Project::empty();
    temp.settings("true");

    temp.sbm()
        .args(&["list"])
        .fails()
        .stderr_has("error: Failed to load client data")
        .stderr_has("does not exist")
        .stderr_has("--config");
}

#[test]
fn missing_managed_inbound_names_the_tag() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["list", "--vless-tag", "nope"])
        .fails()
        .stderr_has("nope")
        .stderr_has("--vless-tag");
}

#[test]
fn malformed_settings_file_fails() {
    let temp = Project::with_clients();
    temp.file("settings.toml", "config_path = [1, 2");

    temp.sbm()
        .args(&["list"])
        .fails()
        .stderr_has("settings.toml");
}

#[test]
fn unknown_client_id_fails_and_writes_nothing() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["rename", "ffff", "bob"])
        .fails()
        .stderr_has("client not found: ffff");

    assert_eq!(temp.read("clientsTable.json"), ROSTER);
    assert!(temp.backups().is_empty());
}

#[test]
fn blank_name_is_rejected() {
    let temp = Project::with_clients();

    temp.sbm().args(&["add", "   "]).fails();

    assert_eq!(temp.roster_names(), vec!["alice"]);
}
