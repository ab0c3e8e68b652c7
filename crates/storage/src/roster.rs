// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client roster document codec
//!
//! Canonical entries are flat:
//!
//! ```json
//! { "clientId": "…", "clientName": "alice", "creationDate": "2026-10-17T09:30:00Z" }
//! ```
//!
//! Rosters written by older tooling nest the name and date under
//! `userData`. Both are read; the layout found is written back on save.
//!
//! Entries without a client id are dropped on read. A blank name reads
//! as [`DEFAULT_CLIENT_NAME`].

use sbm_core::{ClientRecord, CreatedAt, RecordId};
use serde::{Deserialize, Serialize};

/// Name given to roster entries whose name is blank
pub const DEFAULT_CLIENT_NAME: &str = "client";

/// Entry layout of a roster file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterLayout {
    #[default]
    Flat,
    Nested,
}

/// A decoded roster, in file order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    pub layout: RosterLayout,
    pub records: Vec<ClientRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatEntry {
    client_id: String,
    client_name: String,
    creation_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NestedEntry {
    client_id: String,
    user_data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserData {
    client_name: String,
    creation_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnyEntry {
    Nested(NestedEntry),
    Flat(FlatEntry),
}

impl AnyEntry {
    fn layout(&self) -> RosterLayout {
        match self {
            AnyEntry::Nested(_) => RosterLayout::Nested,
            AnyEntry::Flat(_) => RosterLayout::Flat,
        }
    }

    fn into_record(self) -> Option<ClientRecord> {
        let (id, name, created) = match self {
            AnyEntry::Nested(e) => (e.client_id, e.user_data.client_name, e.user_data.creation_date),
            AnyEntry::Flat(e) => (e.client_id, e.client_name, e.creation_date),
        };
        let id = id.trim();
        if id.is_empty() {
            tracing::warn!(name = %name, "skipping roster entry without a client id");
            return None;
        }
        let name = if name.trim().is_empty() {
            DEFAULT_CLIENT_NAME.to_string()
        } else {
            name
        };
        Some(ClientRecord {
            id: RecordId(id.to_string()),
            name,
            created_at: CreatedAt::from_raw(created),
        })
    }
}

/// Decode roster text. The layout of the first entry decides the layout
/// used when writing back; an empty roster is flat.
pub fn decode_roster(text: &str) -> Result<Roster, serde_json::Error> {
    let entries: Vec<AnyEntry> = serde_json::from_str(text)?;
    let layout = entries.first().map(AnyEntry::layout).unwrap_or_default();
    Ok(Roster {
        layout,
        records: entries.into_iter().filter_map(AnyEntry::into_record).collect(),
    })
}

/// Two-space pretty JSON with a trailing newline
pub fn encode_roster(
    records: &[ClientRecord],
    layout: RosterLayout,
) -> Result<String, serde_json::Error> {
    let mut text = match layout {
        RosterLayout::Flat => {
            let entries: Vec<FlatEntry> = records
                .iter()
                .map(|r| FlatEntry {
                    client_id: r.id.to_string(),
                    client_name: r.name.clone(),
                    creation_date: r.created_at.to_string(),
                })
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
        RosterLayout::Nested => {
            let entries: Vec<NestedEntry> = records
                .iter()
                .map(|r| NestedEntry {
                    client_id: r.id.to_string(),
                    user_data: UserData {
                        client_name: r.name.clone(),
                        creation_date: r.created_at.to_string(),
                    },
                })
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod tests;
