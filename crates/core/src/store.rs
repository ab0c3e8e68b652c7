// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record store: the ordered, in-memory list of clients being edited
//!
//! Order is display order and is preserved across load and save. Every
//! mutation either fully applies or leaves the store untouched.

use crate::clock::Clock;
use crate::id::IdGen;
use crate::record::{ClientRecord, CreatedAt, RecordId};
use thiserror::Error;

/// Fresh ids are redrawn on collision at most this many times
const MAX_ID_ATTEMPTS: usize = 8;

/// Errors from record mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid client name: {reason}")]
    Validation { reason: String },
    #[error("client id must not be empty")]
    EmptyId,
    #[error("client not found: {query}")]
    NotFound { query: String },
    #[error("client id prefix '{query}' is ambiguous ({count} matches)")]
    Ambiguous { query: String, count: usize },
    #[error("duplicate client id: {0}")]
    DuplicateId(RecordId),
    #[error("could not generate an unused client id")]
    IdExhausted,
}

/// Ordered collection of client records with unique ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<ClientRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded records, rejecting blank or duplicate ids
    pub fn from_records(records: Vec<ClientRecord>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            if record.id.as_str().trim().is_empty() {
                return Err(StoreError::EmptyId);
            }
            if store.contains(&record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            store.records.push(record);
        }
        Ok(store)
    }

    /// Append a new record with a fresh id, stamped with the current time
    pub fn add(
        &mut self,
        name: &str,
        id_gen: &impl IdGen,
        clock: &impl Clock,
    ) -> Result<ClientRecord, StoreError> {
        let name = validate_name(name)?;
        let id = (0..MAX_ID_ATTEMPTS)
            .map(|_| RecordId(id_gen.next()))
            .find(|id| !self.contains(id))
            .ok_or(StoreError::IdExhausted)?;

        let record = ClientRecord {
            id,
            name,
            created_at: CreatedAt::from_datetime(clock.now()),
        };
        tracing::debug!(id = %record.id, name = %record.name, "client added");
        self.records.push(record.clone());
        Ok(record)
    }

    /// Rename a record in place, keeping its id, timestamp and position
    pub fn rename(&mut self, id: &RecordId, new_name: &str) -> Result<(), StoreError> {
        let index = self.position(id)?;
        let name = validate_name(new_name)?;
        tracing::debug!(%id, from = %self.records[index].name, to = %name, "client renamed");
        self.records[index].name = name;
        Ok(())
    }

    /// Remove a record, shifting later records up
    pub fn delete(&mut self, id: &RecordId) -> Result<ClientRecord, StoreError> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);
        tracing::debug!(%id, name = %removed.name, "client deleted");
        Ok(removed)
    }

    /// Read-only view of the records in order
    pub fn list(&self) -> &[ClientRecord] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&ClientRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by exact id or unique id prefix (like git commit hashes)
    pub fn resolve(&self, query: &str) -> Result<&ClientRecord, StoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(StoreError::NotFound {
                query: query.to_string(),
            });
        }

        // Try exact match first
        if let Some(record) = self.records.iter().find(|r| r.id.as_str() == query) {
            return Ok(record);
        }

        let matches: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.id.as_str().starts_with(query))
            .collect();

        match matches.as_slice() {
            [record] => Ok(record),
            [] => Err(StoreError::NotFound {
                query: query.to_string(),
            }),
            _ => Err(StoreError::Ambiguous {
                query: query.to_string(),
                count: matches.len(),
            }),
        }
    }

    fn position(&self, id: &RecordId) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound {
                query: id.to_string(),
            })
    }
}

fn validate_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation {
            reason: "name must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
