// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker-backed server adapter

use super::{ActionOutcome, ExternalActionError, ServerAdapter};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Where the config is mounted inside the check container
const CONTAINER_CONFIG: &str = "/etc/sing-box/config.json";

/// Runs checks in a throwaway container and restarts via `docker restart`
#[derive(Clone)]
pub struct DockerAdapter {
    program: String,
    image: String,
}

impl DockerAdapter {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            program: "docker".to_string(),
            image: image.into(),
        }
    }

    /// Use a different runtime binary (e.g. `podman`)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments for validating `config_path` (which must be absolute)
    pub fn check_args(&self, config_path: &Path) -> Vec<String> {
        vec![
            "run".to_string(),
            "--rm".to_string(),
            "-v".to_string(),
            format!("{}:{}:ro", config_path.display(), CONTAINER_CONFIG),
            self.image.clone(),
            "check".to_string(),
            "-c".to_string(),
            CONTAINER_CONFIG.to_string(),
        ]
    }

    async fn run(&self, args: &[String]) -> Result<ActionOutcome, ExternalActionError> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ExternalActionError::ProgramNotFound {
                    program: self.program.clone(),
                },
                _ => ExternalActionError::Spawn {
                    program: self.program.clone(),
                    message: e.to_string(),
                },
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        let text = text.trim().to_string();

        if output.status.success() {
            Ok(ActionOutcome::success(text))
        } else {
            let text = if text.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                text
            };
            Ok(ActionOutcome::failure(text))
        }
    }
}

#[async_trait]
impl ServerAdapter for DockerAdapter {
    async fn check_config(&self, config_path: &Path) -> ActionOutcome {
        // Bind mounts need an absolute host path
        let host_path = tokio::fs::canonicalize(config_path)
            .await
            .unwrap_or_else(|_| PathBuf::from(config_path));
        self.run(&self.check_args(&host_path))
            .await
            .unwrap_or_else(ActionOutcome::from)
    }

    async fn restart(&self, container: &str) -> ActionOutcome {
        self.run(&["restart".to_string(), container.to_string()])
            .await
            .unwrap_or_else(ActionOutcome::from)
    }
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
