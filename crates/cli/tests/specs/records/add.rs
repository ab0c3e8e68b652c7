//! Add specs

use crate::prelude::*;

#[test]
fn add_writes_roster_and_server_config() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["add", "bob"])
        .passes()
        .stdout_has("added bob")
        .stdout_has("backup:");

    assert_eq!(temp.roster_names(), vec!["alice", "bob"]);
    assert_eq!(temp.server_names(), vec!["alice", "bob"]);

    let config = temp.json("config.json");
    let roster = temp.json("clientsTable.json");
    let bob = &config["inbounds"][0]["users"][1];
    assert_eq!(bob["uuid"], roster[1]["clientId"]);
    assert_eq!(bob["flow"], "xtls-rprx-vision");
}

#[test]
fn add_keeps_everything_it_does_not_own() {
    let temp = Project::with_clients();

    temp.sbm().args(&["add", "bob"]).passes();

    let config = temp.json("config.json");
    assert_eq!(config["log"]["level"], "warn");
    assert_eq!(config["inbounds"][0]["listen_port"], 443);
    assert_eq!(config["inbounds"][1]["password"], "keep-me");
    // legacy timestamps survive untouched
    assert_eq!(
        temp.json("clientsTable.json")[0]["creationDate"],
        "Sat Oct 17 09:30:00 2026"
    );
}

#[test]
fn add_backs_up_both_files_first() {
    let temp = Project::with_clients();

    temp.sbm().args(&["add", "bob"]).passes();

    let backups = temp.backups();
    assert_eq!(backups.len(), 2);
    let roster_backup = backups
        .iter()
        .find(|p| p.file_name().unwrap().to_string_lossy().starts_with("clientsTable.json."))
        .unwrap();
    assert_eq!(std::fs::read_to_string(roster_backup).unwrap(), ROSTER);
}

#[test]
fn add_with_check_and_restart() {
    let temp = Project::with_clients();

    temp.sbm()
        .args(&["add", "bob", "--check", "--restart"])
        .passes()
        .stdout_has("check: ok")
        .stdout_has("restart: ok");
}

#[test]
fn failed_check_skips_restart_and_fails() {
    let temp = Project::with_clients();
    temp.settings("false");

    temp.sbm()
        .args(&["add", "bob", "--check", "--restart"])
        .fails()
        .stdout_has("check: FAILED")
        .stdout_lacks("restart:")
        .stderr_has("error: check failed")
        .stderr_has("restart skipped because the check failed");

    // the save itself went through
    assert_eq!(temp.roster_names(), vec!["alice", "bob"]);
}

#[test]
fn add_json_reports_each_file() {
    let temp = Project::with_clients();

    let json = temp
        .sbm()
        .args(&["add", "bob", "--format", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json["change"], "added");
    assert_eq!(json["client"]["name"], "bob");
    assert_eq!(json["save"]["clients_table_outcome"]["status"], "written");
    assert_eq!(json["save"]["config_outcome"]["status"], "written");
}
