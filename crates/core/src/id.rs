// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation abstractions

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates unique identifiers
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// UUID-based ID generator for production use
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic generator for tests. Ids keep the UUID shape so they
/// pass wherever a real client id would: the first group is the series,
/// the last group counts from 1.
#[derive(Clone)]
pub struct SequentialIdGen {
    series: u32,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(series: u32) -> Self {
        Self {
            series,
            counter: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The `n`th id (from 1) handed out for `series`
    pub fn id(series: u32, n: u64) -> String {
        format!("{:08x}-0000-4000-8000-{:012x}", series, n)
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new(0)
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Self::id(self.series, n)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
