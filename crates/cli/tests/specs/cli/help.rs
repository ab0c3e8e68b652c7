//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();
    temp.sbm()
        .args(&["--help"])
        .passes()
        .stdout_has("edit")
        .stdout_has("list")
        .stdout_has("check")
        .stdout_has("--settings");
}

#[test]
fn add_help_shows_follow_up_flags() {
    let temp = Project::empty();
    temp.sbm()
        .args(&["add", "--help"])
        .passes()
        .stdout_has("--restart")
        .stdout_has("--check");
}
