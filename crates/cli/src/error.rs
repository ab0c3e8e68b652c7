// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use sbm_core::{SettingsError, StoreError};
use sbm_engine::EditorError;
use sbm_storage::{FileOutcome, LoadError, SaveError, SaveReport};
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl CliError {
    /// The settings file exists but cannot be used.
    pub fn settings(err: SettingsError) -> Self {
        let path = match &err {
            SettingsError::Io { path, .. } | SettingsError::Toml { path, .. } => path.clone(),
        };
        CliError::new(err.to_string())
            .with_suggestion(format!("Fix or remove {}", path.display()))
            .with_suggestion("Point at another file: sbm --settings <path>")
            .with_source(err)
    }

    /// The documents could not be loaded, so no session was started.
    pub fn load(err: LoadError) -> Self {
        let mut cli = CliError::new("Failed to load client data").with_context(err.to_string());
        cli = match &err {
            LoadError::MissingConfig { path } => cli
                .with_suggestion(format!("Check that {} is the server config", path.display()))
                .with_suggestion("Set config_path in settings.toml or pass --config <path>"),
            LoadError::Shape { .. } => cli
                .with_context("The managed inbound is looked up by its tag")
                .with_suggestion("Set vless_tag in settings.toml or pass --vless-tag <tag>"),
            LoadError::Json { path, .. } => cli.with_suggestion(format!(
                "Restore {} from the backup directory",
                path.display()
            )),
            LoadError::Roster { path, .. } => cli.with_suggestion(format!(
                "Remove the duplicate entries from {}",
                path.display()
            )),
            LoadError::Io { .. } => cli.with_suggestion("Check file permissions"),
        };
        cli.with_source(err)
    }

    /// A save stopped part way; say which file holds what.
    pub fn save(err: SaveError) -> Self {
        let mut cli = CliError::new("Save failed").with_context(err.to_string());
        match err.report() {
            Some(report) => {
                cli = describe_partial_save(cli, report);
            }
            None => {
                cli = cli.with_context("Neither file was modified");
            }
        }
        cli.with_suggestion("Fix the problem and save again; the edits are still in memory")
            .with_source(err)
    }

    /// A record lookup or mutation was rejected.
    pub fn store(err: StoreError) -> Self {
        let cli = CliError::new(err.to_string());
        let cli = match &err {
            StoreError::NotFound { .. } => cli.with_suggestion("List client ids: sbm list"),
            StoreError::Ambiguous { .. } => cli.with_suggestion("Type more characters of the id"),
            _ => cli,
        };
        cli.with_source(err)
    }

    /// A check or restart reported failure.
    pub fn action_failed(action: &str, output: &str) -> Self {
        let mut cli = CliError::new(format!("{} failed", action));
        for line in output.lines().filter(|l| !l.trim().is_empty()) {
            cli = cli.with_context(line.to_string());
        }
        cli
    }
}

impl From<EditorError> for CliError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Store(e) => CliError::store(e),
            EditorError::Load(e) => CliError::load(e),
            EditorError::Save(e) => CliError::save(e),
            EditorError::SessionEnded => CliError::new("the session has already ended"),
        }
    }
}

fn describe_partial_save(mut cli: CliError, report: &SaveReport) -> CliError {
    cli = cli
        .with_context(outcome_line(&report.clients_table, &report.clients_table_outcome))
        .with_context(outcome_line(&report.config_path, &report.config_outcome));
    if report.clients_table_outcome.is_written() && !report.config_outcome.is_written() {
        cli = cli.with_context("The two files are out of step until the next successful save");
    }
    for backup in &report.backups {
        cli = cli.with_suggestion(format!("Previous version kept in {}", backup.display()));
    }
    cli
}

fn outcome_line(path: &Path, outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Written => format!("{}: written", path.display()),
        FileOutcome::Failed { error } => format!("{}: failed ({})", path.display(), error),
        FileOutcome::NotAttempted => format!("{}: unchanged", path.display()),
    }
}
