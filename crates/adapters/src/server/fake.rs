// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake server adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ActionOutcome, ServerAdapter};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded server call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerCall {
    CheckConfig { path: PathBuf },
    Restart { container: String },
}

/// Fake server adapter for testing
#[derive(Clone)]
pub struct FakeServerAdapter {
    calls: Arc<Mutex<Vec<ServerCall>>>,
    check_outcome: Arc<Mutex<ActionOutcome>>,
    restart_outcome: Arc<Mutex<ActionOutcome>>,
}

impl Default for FakeServerAdapter {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            check_outcome: Arc::new(Mutex::new(ActionOutcome::success("configuration ok"))),
            restart_outcome: Arc::new(Mutex::new(ActionOutcome::success("singbox"))),
        }
    }
}

impl FakeServerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ServerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_check_outcome(&self, outcome: ActionOutcome) {
        *self.check_outcome.lock().unwrap_or_else(|e| e.into_inner()) = outcome;
    }

    pub fn set_restart_outcome(&self, outcome: ActionOutcome) {
        *self.restart_outcome.lock().unwrap_or_else(|e| e.into_inner()) = outcome;
    }
}

#[async_trait]
impl ServerAdapter for FakeServerAdapter {
    async fn check_config(&self, config_path: &Path) -> ActionOutcome {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ServerCall::CheckConfig {
                path: config_path.to_path_buf(),
            });
        self.check_outcome
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn restart(&self, container: &str) -> ActionOutcome {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ServerCall::Restart {
                container: container.to_string(),
            });
        self.restart_outcome
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
