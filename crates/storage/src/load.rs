// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading both documents at session start (and on reload)

use crate::document::decode_document;
use crate::roster::{decode_roster, Roster, RosterLayout};
use sbm_core::{
    managed_users, records_from_users, Clock, ConfigShapeError, ManagedInbound, RecordStore,
    SessionPaths, StoreError,
};
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that prevent a session from starting
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("server config {} does not exist", path.display())]
    MissingConfig { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: {source}", path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: ConfigShapeError,
    },
    #[error("{}: {source}", path.display())]
    Roster {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
}

/// Everything read from disk for one session
#[derive(Debug, Clone)]
pub struct LoadedDocuments {
    pub store: RecordStore,
    pub document: Value,
    pub layout: RosterLayout,
    /// The store was seeded from the managed inbound's existing users
    pub seeded: bool,
}

/// Read the server config and the roster.
///
/// The server config must exist, parse and have a well-formed managed
/// inbound. A missing or empty roster starts from the inbound's current
/// users (or empty, if it has none).
pub fn load_documents(
    paths: &SessionPaths,
    inbound: &ManagedInbound,
    clock: &impl Clock,
) -> Result<LoadedDocuments, LoadError> {
    let document = load_server_config(&paths.config_path)?;
    let existing_users =
        managed_users(&document, &inbound.tag).map_err(|source| LoadError::Shape {
            path: paths.config_path.clone(),
            source,
        })?;

    let roster = load_roster(&paths.clients_table)?.unwrap_or_default();
    let (records, seeded) = if roster.records.is_empty() && !existing_users.is_empty() {
        tracing::info!(
            users = existing_users.len(),
            tag = %inbound.tag,
            "seeding roster from server config"
        );
        (records_from_users(existing_users, clock), true)
    } else {
        (roster.records, false)
    };

    let store = RecordStore::from_records(records).map_err(|source| LoadError::Roster {
        path: paths.clients_table.clone(),
        source,
    })?;

    tracing::info!(
        records = store.len(),
        config = %paths.config_path.display(),
        roster = %paths.clients_table.display(),
        "documents loaded"
    );

    Ok(LoadedDocuments {
        store,
        document,
        layout: roster.layout,
        seeded,
    })
}

fn load_server_config(path: &Path) -> Result<Value, LoadError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::MissingConfig {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    decode_document(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// `None` when the roster file does not exist yet
fn load_roster(path: &Path) -> Result<Option<Roster>, LoadError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    decode_roster(&text)
        .map(Some)
        .map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
