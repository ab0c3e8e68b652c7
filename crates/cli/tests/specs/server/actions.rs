//! Check and restart specs
//!
//! The container runtime is replaced by `true` / `false` through the
//! `docker_command` setting.

use crate::prelude::*;

#[test]
fn check_passes_when_runtime_succeeds() {
    let temp = Project::with_clients();
    temp.sbm().args(&["check"]).passes().stdout_has("check: ok");
}

#[test]
fn check_fails_when_runtime_fails() {
    let temp = Project::with_clients();
    temp.settings("false");

    temp.sbm()
        .args(&["check"])
        .fails()
        .stdout_has("check: FAILED")
        .stdout_has("exited with")
        .stderr_has("error: check failed");
}

#[test]
fn check_works_on_a_config_without_the_managed_inbound() {
    let temp = Project::with_clients();
    temp.file("config.json", r#"{"inbounds": []}"#);

    temp.sbm().args(&["check"]).passes();
}

#[test]
fn check_of_missing_config_fails() {
    let temp = Project::empty();
    temp.settings("true");

    temp.sbm()
        .args(&["check"])
        .fails()
        .stdout_has("does not exist");
}

#[test]
fn missing_runtime_is_reported() {
    let temp = Project::with_clients();
    temp.settings("sbm-no-such-runtime");

    temp.sbm()
        .args(&["restart"])
        .fails()
        .stdout_has("sbm-no-such-runtime not found");
}

#[test]
fn restart_json() {
    let temp = Project::with_clients();

    let json = temp
        .sbm()
        .args(&["restart", "--format", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json["action"], "restart");
    assert_eq!(json["ok"], true);
}
