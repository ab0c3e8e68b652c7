// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence engine: backup, reconcile and write both documents
//!
//! Steps run in order and a failure stops the ones after it:
//!
//! 1. back up both targets (before either is touched)
//! 2. serialize the roster
//! 3. reconcile the server config
//! 4. write the roster atomically
//! 5. write the server config atomically
//!
//! There is no transaction spanning both files. If step 5 fails the roster
//! is already new; the report says so and the backups are the way back.

use crate::atomic::DocumentWriter;
use crate::backup::backup_file;
use crate::document::encode_document;
use crate::roster::{encode_roster, RosterLayout};
use sbm_core::{reconcile, Clock, ConfigShapeError, ManagedInbound, RecordStore, SessionPaths};
use serde::Serialize;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What happened to one target file during a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Written,
    Failed { error: String },
    NotAttempted,
}

impl FileOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, FileOutcome::Written)
    }
}

/// Per-file result of a save, for the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub clients_table: PathBuf,
    pub clients_table_outcome: FileOutcome,
    pub config_path: PathBuf,
    pub config_outcome: FileOutcome,
    pub backups: Vec<PathBuf>,
}

impl SaveReport {
    fn new(paths: &SessionPaths, backups: Vec<PathBuf>) -> Self {
        Self {
            clients_table: paths.clients_table.clone(),
            clients_table_outcome: FileOutcome::NotAttempted,
            config_path: paths.config_path.clone(),
            config_outcome: FileOutcome::NotAttempted,
            backups,
        }
    }
}

/// A completed save
#[derive(Debug, Clone)]
pub struct Committed {
    pub report: SaveReport,
    /// The server config as written
    pub document: Value,
}

/// Errors that abort a save
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("backup of {} failed: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize roster: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot update server config: {0}")]
    Shape(#[from] ConfigShapeError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
        report: Box<SaveReport>,
    },
}

impl SaveError {
    /// The partial report, when the save got as far as writing
    pub fn report(&self) -> Option<&SaveReport> {
        match self {
            SaveError::Write { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Writes the roster and the server config with backups
#[derive(Debug, Clone)]
pub struct PersistenceEngine<W: DocumentWriter, C: Clock> {
    writer: W,
    clock: C,
}

impl<W: DocumentWriter, C: Clock> PersistenceEngine<W, C> {
    pub fn new(writer: W, clock: C) -> Self {
        Self { writer, clock }
    }

    /// Save `store` and the server config derived from `current`
    pub fn save(
        &self,
        store: &RecordStore,
        layout: RosterLayout,
        current: &Value,
        inbound: &ManagedInbound,
        paths: &SessionPaths,
    ) -> Result<Committed, SaveError> {
        let now = self.clock.now();
        let mut backups = Vec::new();
        for target in [&paths.clients_table, &paths.config_path] {
            let backup = backup_file(target, &paths.backup_dir, now).map_err(|source| {
                tracing::error!(target = %target.display(), error = %source, "backup failed");
                SaveError::Backup {
                    path: target.clone(),
                    source,
                }
            })?;
            backups.extend(backup);
        }

        let roster_text = encode_roster(store.list(), layout)?;
        let document = reconcile(current, store, inbound)?;
        let config_text = encode_document(&document)?;

        let mut report = SaveReport::new(paths, backups);

        report.clients_table_outcome = self.write(&paths.clients_table, &roster_text, &report)?;
        report.config_outcome = self.write(&paths.config_path, &config_text, &report)?;

        tracing::info!(
            records = store.len(),
            backups = report.backups.len(),
            "save committed"
        );
        Ok(Committed { report, document })
    }

    fn write(&self, path: &Path, text: &str, report: &SaveReport) -> Result<FileOutcome, SaveError> {
        match self.writer.write(path, text.as_bytes()) {
            Ok(()) => Ok(FileOutcome::Written),
            Err(source) => {
                tracing::error!(path = %path.display(), error = %source, "write failed");
                let mut report = report.clone();
                let failed = FileOutcome::Failed {
                    error: source.to_string(),
                };
                if path == report.clients_table {
                    report.clients_table_outcome = failed;
                } else {
                    report.config_outcome = failed;
                }
                Err(SaveError::Write {
                    path: path.to_path_buf(),
                    source,
                    report: Box::new(report),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
