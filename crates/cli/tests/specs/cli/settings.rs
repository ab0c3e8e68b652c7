//! Settings resolution specs

use crate::prelude::*;

#[test]
fn flags_override_the_settings_file() {
    let temp = Project::with_clients();
    temp.file("other/config.json", SERVER_CONFIG);
    temp.file("other/roster.json", "[]\n");

    temp.sbm()
        .args(&[
            "add",
            "bob",
            "--config",
            "other/config.json",
            "--table",
            "other/roster.json",
        ])
        .passes();

    // the seeded user plus bob, in the overridden files only
    let roster = temp.json("other/roster.json");
    assert_eq!(roster.as_array().unwrap().len(), 2);
    assert_eq!(temp.roster_names(), vec!["alice"]);
}

#[test]
fn alternate_settings_file() {
    let temp = Project::with_clients();
    temp.file("custom.toml", "vless_tag = \"missing-tag\"\n");

    temp.sbm()
        .args(&["--settings", "custom.toml", "list"])
        .fails()
        .stderr_has("missing-tag");
}

#[test]
fn legacy_singbox_config_key() {
    let temp = Project::with_clients();
    temp.file("srv/sb.json", SERVER_CONFIG);
    temp.file(
        "settings.toml",
        "singbox_config = \"srv/sb.json\"\nclients_table = \"clientsTable.json\"\n",
    );

    temp.sbm().args(&["add", "carol"]).passes();

    let users = temp.json("srv/sb.json")["inbounds"][0]["users"].clone();
    assert_eq!(users[1]["name"], "carol");
}
