// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::server::{ActionOutcome, ServerAdapter};
use async_trait::async_trait;
use std::path::Path;
use tracing::Instrument;

/// Wrapper that adds tracing to any ServerAdapter
#[derive(Clone)]
pub struct TracedServerAdapter<S> {
    inner: S,
}

impl<S> TracedServerAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ServerAdapter> ServerAdapter for TracedServerAdapter<S> {
    async fn check_config(&self, config_path: &Path) -> ActionOutcome {
        let span = tracing::info_span!("server.check", path = %config_path.display());

        async {
            tracing::info!("starting");

            // Precondition: the config must exist on disk
            if !config_path.exists() {
                tracing::error!("config file does not exist");
                return ActionOutcome::failure(format!(
                    "config file does not exist: {}",
                    config_path.display()
                ));
            }

            let start = std::time::Instant::now();
            let outcome = self.inner.check_config(config_path).await;
            let elapsed = start.elapsed();

            if outcome.ok {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "config valid");
            } else {
                tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    output = %outcome.output,
                    "config check failed"
                );
            }

            outcome
        }
        .instrument(span)
        .await
    }

    async fn restart(&self, container: &str) -> ActionOutcome {
        let span = tracing::info_span!("server.restart", container);

        async {
            tracing::info!("starting");
            let start = std::time::Instant::now();
            let outcome = self.inner.restart(container).await;
            let elapsed = start.elapsed();

            if outcome.ok {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "restarted");
            } else {
                tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    output = %outcome.output,
                    "restart failed"
                );
            }

            outcome
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
