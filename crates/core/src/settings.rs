// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings loaded from a TOML file
//!
//! Every key is optional. Blank strings fall back to the default, except
//! `flow` where an empty string means "write entries without a flow".
//! Unknown keys are ignored so the file can be shared with other tools.

use crate::reconcile::ManagedInbound;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "/opt/singbox/config.json";
pub const DEFAULT_CLIENTS_TABLE: &str = "/opt/singbox/clientsTable.json";
pub const DEFAULT_VLESS_TAG: &str = "vless-in";
pub const DEFAULT_FLOW: &str = "xtls-rprx-vision";
pub const DEFAULT_CONTAINER: &str = "singbox";
pub const DEFAULT_DOCKER_IMAGE: &str = "ghcr.io/sagernet/sing-box:latest";
pub const DEFAULT_DOCKER_COMMAND: &str = "docker";

/// Errors loading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub clients_table: PathBuf,
    /// Explicit backup directory; `None` means `<clients_table dir>/backup`
    pub backup_dir: Option<PathBuf>,
    pub vless_tag: String,
    /// Empty means new user entries carry no `flow` field
    pub flow: String,
    pub container: String,
    pub docker_image: String,
    /// Container runtime binary (`docker`, `podman`, ...)
    pub docker_command: String,
    pub auto_save_on_quit: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            clients_table: PathBuf::from(DEFAULT_CLIENTS_TABLE),
            backup_dir: None,
            vless_tag: DEFAULT_VLESS_TAG.to_string(),
            flow: DEFAULT_FLOW.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            docker_image: DEFAULT_DOCKER_IMAGE.to_string(),
            docker_command: DEFAULT_DOCKER_COMMAND.to_string(),
            auto_save_on_quit: false,
            log_file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(alias = "singbox_config")]
    config_path: Option<String>,
    clients_table: Option<String>,
    backup_dir: Option<String>,
    vless_tag: Option<String>,
    flow: Option<String>,
    container: Option<String>,
    docker_image: Option<String>,
    docker_command: Option<String>,
    auto_save_on_quit: Option<bool>,
    log_file: Option<String>,
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&content).map_err(|source| SettingsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let raw: RawSettings = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(Self {
            config_path: non_blank(raw.config_path)
                .map(PathBuf::from)
                .unwrap_or(defaults.config_path),
            clients_table: non_blank(raw.clients_table)
                .map(PathBuf::from)
                .unwrap_or(defaults.clients_table),
            backup_dir: non_blank(raw.backup_dir).map(PathBuf::from),
            vless_tag: non_blank(raw.vless_tag).unwrap_or(defaults.vless_tag),
            flow: raw.flow.map(|f| f.trim().to_string()).unwrap_or(defaults.flow),
            container: non_blank(raw.container).unwrap_or(defaults.container),
            docker_image: non_blank(raw.docker_image).unwrap_or(defaults.docker_image),
            docker_command: non_blank(raw.docker_command).unwrap_or(defaults.docker_command),
            auto_save_on_quit: raw.auto_save_on_quit.unwrap_or(defaults.auto_save_on_quit),
            log_file: non_blank(raw.log_file).map(PathBuf::from),
        })
    }

    /// Directory receiving backups before each overwrite
    pub fn backup_dir(&self) -> PathBuf {
        match &self.backup_dir {
            Some(dir) => dir.clone(),
            None => self
                .clients_table
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("backup"),
        }
    }

    /// The managed inbound described by these settings
    pub fn managed_inbound(&self) -> ManagedInbound {
        ManagedInbound::new(self.vless_tag.clone()).with_flow(self.flow.clone())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
