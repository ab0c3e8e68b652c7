// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use crate::id::SequentialIdGen;
use chrono::{TimeZone, Utc};
use serde_json::json;
use yare::parameterized;

fn clock() -> FakeClock {
    FakeClock::at(Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap())
}

fn vless() -> ManagedInbound {
    ManagedInbound::new("vless-in").with_flow("xtls-rprx-vision")
}

fn server_config() -> Value {
    json!({
        "log": { "level": "warn", "timestamp": true },
        "inbounds": [
            { "type": "mixed", "tag": "mixed-in", "listen_port": 1080 },
            {
                "type": "vless",
                "tag": "vless-in",
                "listen_port": 443,
                "users": [
                    { "uuid": "u1", "name": "alice", "flow": "xtls-rprx-vision" },
                    { "uuid": "u2", "name": "bob", "flow": "", "limit": 5 }
                ],
                "tls": { "enabled": true }
            }
        ],
        "outbounds": [{ "type": "direct" }]
    })
}

fn store(entries: &[(&str, &str)]) -> RecordStore {
    let created = CreatedAt::from_raw("2026-01-01T00:00:00Z");
    RecordStore::from_records(
        entries
            .iter()
            .map(|(id, name)| ClientRecord::new(*id, *name, created.clone()))
            .collect(),
    )
    .unwrap()
}

fn user_ids(config: &Value) -> Vec<String> {
    managed_users(config, "vless-in")
        .unwrap()
        .iter()
        .map(|u| u["uuid"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn locate_finds_inbound_by_tag() {
    assert_eq!(locate(&server_config(), "vless-in"), Ok(1));
    assert_eq!(locate(&server_config(), "mixed-in"), Ok(0));
}

#[test]
fn reconcile_replaces_user_list_in_store_order() {
    let updated = reconcile(&server_config(), &store(&[("u2", "bob"), ("u3", "carol")]), &vless()).unwrap();

    assert_eq!(user_ids(&updated), vec!["u2", "u3"]);
    assert_eq!(
        updated["inbounds"][1]["users"][1],
        json!({ "uuid": "u3", "name": "carol", "flow": "xtls-rprx-vision" })
    );
}

#[test]
fn reconcile_keeps_unowned_fields_of_existing_entries() {
    let updated = reconcile(&server_config(), &store(&[("u2", "robert")]), &vless()).unwrap();

    assert_eq!(
        updated["inbounds"][1]["users"][0],
        json!({ "uuid": "u2", "name": "robert", "flow": "", "limit": 5 })
    );
}

#[test]
fn reconcile_preserves_everything_outside_the_user_list() {
    let current = server_config();
    let updated = reconcile(&current, &store(&[("u9", "zed")]), &vless()).unwrap();

    assert_eq!(updated["log"], current["log"]);
    assert_eq!(updated["outbounds"], current["outbounds"]);
    assert_eq!(updated["inbounds"][0], current["inbounds"][0]);

    let mut managed = updated["inbounds"][1].clone();
    let mut original = current["inbounds"][1].clone();
    managed.as_object_mut().unwrap().remove("users");
    original.as_object_mut().unwrap().remove("users");
    assert_eq!(managed, original);
}

#[test]
fn reconcile_preserves_key_order() {
    let current = server_config();
    let updated = reconcile(&current, &store(&[("u1", "alice")]), &vless()).unwrap();

    let keys: Vec<_> = updated.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["log", "inbounds", "outbounds"]);
    let inbound_keys: Vec<_> = updated["inbounds"][1].as_object().unwrap().keys().cloned().collect();
    assert_eq!(inbound_keys, vec!["type", "tag", "listen_port", "users", "tls"]);
}

#[test]
fn reconcile_does_not_touch_its_input() {
    let current = server_config();
    let snapshot = current.clone();
    let _ = reconcile(&current, &store(&[]), &vless()).unwrap();
    assert_eq!(current, snapshot);
}

#[test]
fn reconcile_adds_users_list_when_missing() {
    let current = json!({ "inbounds": [{ "type": "vless", "tag": "vless-in" }] });
    let updated = reconcile(&current, &store(&[("u1", "alice")]), &vless()).unwrap();
    assert_eq!(user_ids(&updated), vec!["u1"]);
}

#[test]
fn reconcile_without_flow_omits_the_field() {
    let inbound = ManagedInbound::new("vless-in").with_flow("");
    let updated = reconcile(&server_config(), &store(&[("u7", "gil")]), &inbound).unwrap();
    assert_eq!(
        updated["inbounds"][1]["users"][0],
        json!({ "uuid": "u7", "name": "gil" })
    );
}

#[test]
fn reconcile_is_idempotent() {
    let records = store(&[("u1", "alice"), ("u4", "dan")]);
    let once = reconcile(&server_config(), &records, &vless()).unwrap();
    let twice = reconcile(&once, &records, &vless()).unwrap();
    assert_eq!(once, twice);
}

#[parameterized(
    root_not_object = { json!([]), ConfigShapeError::RootNotObject },
    missing_inbounds = { json!({ "log": {} }), ConfigShapeError::MissingInbounds },
    inbounds_not_array = { json!({ "inbounds": {} }), ConfigShapeError::InboundsNotArray },
    tag_not_found = {
        json!({ "inbounds": [{ "tag": "other" }] }),
        ConfigShapeError::TagNotFound { tag: "vless-in".to_string() }
    },
    duplicate_tag = {
        json!({ "inbounds": [{ "tag": "vless-in" }, { "tag": "vless-in" }] }),
        ConfigShapeError::DuplicateTag { tag: "vless-in".to_string(), count: 2 }
    },
    users_not_array = {
        json!({ "inbounds": [{ "tag": "vless-in", "users": "alice" }] }),
        ConfigShapeError::UsersNotArray { tag: "vless-in".to_string() }
    },
)]
fn reconcile_rejects_malformed_configs(config: Value, expected: ConfigShapeError) {
    let result = reconcile(&config, &store(&[("u1", "alice")]), &vless());
    assert_eq!(result, Err(expected));
}

#[test]
fn records_from_users_imports_ids_and_names() {
    let users = json!([
        { "uuid": "u1", "name": "alice" },
        { "uuid": "u2" },
        { "name": "no id" },
        { "uuid": "u1", "name": "duplicate" },
        { "uuid": "  ", "name": "blank id" }
    ]);

    let records = records_from_users(users.as_array().unwrap(), &clock());

    let got: Vec<_> = records.iter().map(|r| (r.id.as_str(), r.name.as_str())).collect();
    assert_eq!(got, vec![("u1", "alice"), ("u2", IMPORTED_NAME)]);
    assert_eq!(records[0].created_at.as_str(), "2026-10-17T09:30:00Z");
}

#[test]
fn seeded_store_reconciles_back_to_same_ids() {
    let current = server_config();
    let seeded = records_from_users(managed_users(&current, "vless-in").unwrap(), &clock());
    let store = RecordStore::from_records(seeded).unwrap();

    let updated = reconcile(&current, &store, &vless()).unwrap();
    assert_eq!(updated, current);
}

#[test]
fn padded_uuids_keep_their_unowned_fields() {
    let current = json!({
        "inbounds": [{
            "type": "vless",
            "tag": "vless-in",
            "users": [{ "uuid": " u1 ", "name": "alice", "limit": 5 }]
        }]
    });
    let seeded = records_from_users(managed_users(&current, "vless-in").unwrap(), &clock());
    let store = RecordStore::from_records(seeded).unwrap();

    let updated = reconcile(&current, &store, &vless()).unwrap();

    let user = &updated["inbounds"][0]["users"][0];
    assert_eq!(user["uuid"], "u1");
    assert_eq!(user["limit"], 5);
    assert_eq!(user["flow"], "xtls-rprx-vision");
}

// Property-based tests
use proptest::prelude::*;

proptest! {
    #[test]
    fn reconcile_twice_never_changes_the_user_list(names in proptest::collection::vec("[a-zA-Z ]{1,12}", 0..20)) {
        let clock = clock();
        let id_gen = SequentialIdGen::new(0xb);
        let mut records = RecordStore::new();
        for name in &names {
            if !name.trim().is_empty() {
                records.add(name, &id_gen, &clock).unwrap();
            }
        }

        let once = reconcile(&server_config(), &records, &vless()).unwrap();
        let twice = reconcile(&once, &records, &vless()).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(user_ids(&once).len(), records.len());
    }
}
