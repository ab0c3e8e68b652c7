// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config reconciler: derives the server configuration from the record store
//!
//! The server configuration is an opaque JSON tree. Only the `users` list of
//! the inbound whose `tag` matches the managed tag is rewritten; everything
//! else is carried over value-for-value (and, with `preserve_order`, in the
//! same key order).

use crate::clock::Clock;
use crate::record::{ClientRecord, CreatedAt, RecordId};
use crate::store::RecordStore;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Name used for users imported from the server config without one
pub const IMPORTED_NAME: &str = "imported";

/// Errors describing a server config that cannot be reconciled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigShapeError {
    #[error("server config root is not a JSON object")]
    RootNotObject,
    #[error("server config has no \"inbounds\" list")]
    MissingInbounds,
    #[error("server config \"inbounds\" is not a list")]
    InboundsNotArray,
    #[error("no inbound tagged '{tag}' in server config")]
    TagNotFound { tag: String },
    #[error("{count} inbounds are tagged '{tag}'; expected exactly one")]
    DuplicateTag { tag: String, count: usize },
    #[error("inbound '{tag}' has a \"users\" field that is not a list")]
    UsersNotArray { tag: String },
}

/// The inbound this editor owns, and the shape of the user entries it writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedInbound {
    pub tag: String,
    /// Value for the `flow` field of new entries; `None` omits the field
    pub flow: Option<String>,
}

impl ManagedInbound {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            flow: None,
        }
    }

    pub fn with_flow(mut self, flow: impl Into<String>) -> Self {
        let flow = flow.into();
        self.flow = (!flow.is_empty()).then_some(flow);
        self
    }
}

/// Index of the managed inbound within `inbounds`, after validating its shape
pub fn locate(config: &Value, tag: &str) -> Result<usize, ConfigShapeError> {
    let root = config.as_object().ok_or(ConfigShapeError::RootNotObject)?;
    let inbounds = root
        .get("inbounds")
        .ok_or(ConfigShapeError::MissingInbounds)?
        .as_array()
        .ok_or(ConfigShapeError::InboundsNotArray)?;

    let matches: Vec<usize> = inbounds
        .iter()
        .enumerate()
        .filter(|(_, inbound)| inbound.get("tag").and_then(Value::as_str) == Some(tag))
        .map(|(i, _)| i)
        .collect();

    let index = match matches.as_slice() {
        [index] => *index,
        [] => {
            return Err(ConfigShapeError::TagNotFound {
                tag: tag.to_string(),
            })
        }
        _ => {
            return Err(ConfigShapeError::DuplicateTag {
                tag: tag.to_string(),
                count: matches.len(),
            })
        }
    };

    match inbounds[index].get("users") {
        None | Some(Value::Array(_)) => Ok(index),
        Some(_) => Err(ConfigShapeError::UsersNotArray {
            tag: tag.to_string(),
        }),
    }
}

/// The managed inbound's current user list (empty if it has none yet)
pub fn managed_users<'a>(config: &'a Value, tag: &str) -> Result<&'a [Value], ConfigShapeError> {
    let index = locate(config, tag)?;
    Ok(config["inbounds"][index]
        .get("users")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default())
}

/// Produce a new server config whose managed user list mirrors `store`.
///
/// Entries follow store order. An existing entry with the same `uuid` keeps
/// any fields this editor does not own; only `name` is overwritten and
/// `flow` is filled in when missing. The input document is not modified.
pub fn reconcile(
    current: &Value,
    store: &RecordStore,
    inbound: &ManagedInbound,
) -> Result<Value, ConfigShapeError> {
    let index = locate(current, &inbound.tag)?;
    let previous: HashMap<&str, &Map<String, Value>> = managed_users(current, &inbound.tag)?
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|user| Some((user_key(user)?, user)))
        .collect();

    let users: Vec<Value> = store
        .list()
        .iter()
        .map(|record| {
            user_entry(
                record,
                previous.get(record.id.as_str()).copied(),
                inbound.flow.as_deref(),
            )
        })
        .collect();

    let mut updated = current.clone();
    let target = updated
        .get_mut("inbounds")
        .and_then(Value::as_array_mut)
        .and_then(|inbounds| inbounds.get_mut(index))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ConfigShapeError::TagNotFound {
            tag: inbound.tag.clone(),
        })?;
    target.insert("users".to_string(), Value::Array(users));

    tracing::debug!(tag = %inbound.tag, users = store.len(), "reconciled managed inbound");
    Ok(updated)
}

/// Seed records from an existing user list (used when the roster is empty)
pub fn records_from_users(users: &[Value], clock: &impl Clock) -> Vec<ClientRecord> {
    let created_at = CreatedAt::from_datetime(clock.now());
    let mut seen = HashSet::new();

    users
        .iter()
        .filter_map(|user| {
            let id = user_key(user.as_object()?)?;
            if id.is_empty() || !seen.insert(id.to_string()) {
                return None;
            }
            let name = user
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(IMPORTED_NAME);
            Some(ClientRecord {
                id: RecordId(id.to_string()),
                name: name.to_string(),
                created_at: created_at.clone(),
            })
        })
        .collect()
}

/// Identity of an existing user entry; surrounding whitespace is not part of it
fn user_key(user: &Map<String, Value>) -> Option<&str> {
    user.get("uuid")?.as_str().map(str::trim)
}

fn user_entry(
    record: &ClientRecord,
    previous: Option<&Map<String, Value>>,
    flow: Option<&str>,
) -> Value {
    let mut entry = previous.cloned().unwrap_or_default();
    entry.insert("uuid".to_string(), Value::String(record.id.to_string()));
    entry.insert("name".to_string(), Value::String(record.name.clone()));
    if let Some(flow) = flow {
        if !entry.contains_key("flow") {
            entry.insert("flow".to_string(), Value::String(flow.to_string()));
        }
    }
    Value::Object(entry)
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
