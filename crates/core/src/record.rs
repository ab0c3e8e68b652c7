// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client records mirrored between the roster and the managed inbound

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a client (UUID-formatted in production)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

/// Creation timestamp, kept as the text found on disk.
///
/// Rosters written by older tooling carry ctime-style strings
/// (`Sat Oct 17 09:30:00 2026`), so the raw text is what round-trips.
/// New records are stamped in RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatedAt(String);

const CTIME_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

impl CreatedAt {
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        CreatedAt(time.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        CreatedAt(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the stored text as RFC 3339 or ctime (read as UTC)
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        if let Ok(time) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(time.with_timezone(&Utc));
        }
        // ctime pads single-digit days with a space
        let normalized = self.0.split_whitespace().collect::<Vec<_>>().join(" ");
        NaiveDateTime::parse_from_str(&normalized, CTIME_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

impl std::fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One client's identity and display entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    pub id: RecordId,
    pub name: String,
    pub created_at: CreatedAt,
}

impl ClientRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: CreatedAt) -> Self {
        Self {
            id: RecordId(id.into()),
            name: name.into(),
            created_at,
        }
    }
}
