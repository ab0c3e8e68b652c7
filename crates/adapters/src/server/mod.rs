// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server validation and restart adapters
//!
//! Both actions are advisory. They never return `Err`: a failure to launch
//! the runtime and a non-zero exit both come back as an [`ActionOutcome`]
//! with `ok == false` and whatever diagnostics were captured.

mod docker;

pub use docker::DockerAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeServerAdapter, ServerCall};

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Reasons an external action could not run
#[derive(Debug, Error)]
pub enum ExternalActionError {
    #[error("{program} not found")]
    ProgramNotFound { program: String },
    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },
}

/// Result of a check or restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub ok: bool,
    /// Captured stdout followed by stderr, trimmed
    pub output: String,
}

impl ActionOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            ok: true,
            output: output.into(),
        }
    }

    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            ok: false,
            output: output.into(),
        }
    }
}

impl From<ExternalActionError> for ActionOutcome {
    fn from(err: ExternalActionError) -> Self {
        ActionOutcome::failure(err.to_string())
    }
}

/// Adapter for validating the server config and restarting the server
#[async_trait]
pub trait ServerAdapter: Clone + Send + Sync + 'static {
    /// Validate the config file at `config_path`; never modifies it
    async fn check_config(&self, config_path: &Path) -> ActionOutcome;

    /// Restart the long-running server process named `container`
    async fn restart(&self, container: &str) -> ActionOutcome;
}
