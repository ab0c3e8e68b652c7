// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use sbm_adapters::ActionOutcome;
use sbm_core::ClientRecord;
use sbm_engine::SaveSummary;
use sbm_storage::{FileOutcome, SaveReport};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// One row of the client table
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub row: usize,
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl RecordView {
    pub fn new(row: usize, record: &ClientRecord) -> Self {
        Self {
            row,
            id: record.id.to_string(),
            name: record.name.clone(),
            created_at: record.created_at.to_string(),
        }
    }

    /// Rows numbered from 1, in store order
    pub fn table(records: &[ClientRecord]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| Self::new(i + 1, record))
            .collect()
    }
}

impl fmt::Display for RecordView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}  {:<36}  {:<24}  {}",
            self.row, self.id, self.name, self.created_at
        )
    }
}

/// Result of a check or restart
#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    pub action: &'static str,
    pub ok: bool,
    pub output: String,
}

impl ActionView {
    pub fn new(action: &'static str, outcome: &ActionOutcome) -> Self {
        Self {
            action,
            ok: outcome.ok,
            output: outcome.output.clone(),
        }
    }
}

impl fmt::Display for ActionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.ok { "ok" } else { "FAILED" };
        write!(f, "{}: {}", self.action, status)?;
        for line in self.output.lines() {
            write!(f, "\n  {}", line)?;
        }
        Ok(())
    }
}

/// Result of a save, plus any follow-up action
#[derive(Debug, Clone, Serialize)]
pub struct SaveView {
    pub clients_table: PathBuf,
    pub clients_table_outcome: FileOutcome,
    pub config_path: PathBuf,
    pub config_outcome: FileOutcome,
    pub backups: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionView>,
}

impl SaveView {
    pub fn new(report: &SaveReport) -> Self {
        Self {
            clients_table: report.clients_table.clone(),
            clients_table_outcome: report.clients_table_outcome.clone(),
            config_path: report.config_path.clone(),
            config_outcome: report.config_outcome.clone(),
            backups: report.backups.clone(),
            actions: Vec::new(),
        }
    }

    pub fn from_summary(summary: &SaveSummary) -> Self {
        let mut view = Self::new(&summary.report);
        if let Some(restart) = &summary.restart {
            view.actions.push(ActionView::new("restart", restart));
        }
        view
    }

    pub fn with_action(mut self, action: ActionView) -> Self {
        self.actions.push(action);
        self
    }
}

impl fmt::Display for SaveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "saved {} and {}",
            self.clients_table.display(),
            self.config_path.display()
        )?;
        for backup in &self.backups {
            write!(f, "\n  backup: {}", backup.display())?;
        }
        for action in &self.actions {
            write!(f, "\n{}", action)?;
        }
        Ok(())
    }
}
