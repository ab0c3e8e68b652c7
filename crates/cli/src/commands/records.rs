// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted record commands
//!
//! Each invocation opens the documents, applies one change and saves
//! before returning, so the files on disk never lag behind the command.

use crate::adapters::{make_editor, CliEditor};
use crate::error::CliError;
use crate::output::{print, print_list, ActionView, OutputFormat, RecordView, SaveView};
use clap::Args;
use sbm_core::Settings;
use serde::Serialize;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Follow-up actions after a successful save
#[derive(Args)]
pub struct SaveArgs {
    /// Validate the server config after saving
    #[arg(long)]
    pub check: bool,
    /// Restart the server container after saving
    #[arg(long)]
    pub restart: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Display name of the new client
    pub name: String,
    #[command(flatten)]
    pub save: SaveArgs,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Client id or unique id prefix
    pub id: String,
    /// New display name
    pub name: String,
    #[command(flatten)]
    pub save: SaveArgs,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Client id or unique id prefix
    pub id: String,
    /// Do not ask for confirmation
    #[arg(long, short)]
    pub yes: bool,
    #[command(flatten)]
    pub save: SaveArgs,
}

#[derive(Serialize)]
struct ChangeView {
    change: &'static str,
    client: RecordView,
    save: SaveView,
}

impl fmt::Display for ChangeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} ({})", self.change, self.client.name, self.client.id)?;
        write!(f, "{}", self.save)
    }
}

pub fn list(settings: &Settings, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let editor = make_editor(settings)?;
    let rows = RecordView::table(editor.records());
    match format {
        OutputFormat::Text if rows.is_empty() => println!("No clients"),
        _ => print_list(&rows, format),
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn add(
    settings: &Settings,
    args: AddArgs,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let mut editor = make_editor(settings)?;
    let record = editor.add(&args.name).map_err(CliError::store)?;
    let row = editor.records().len();
    let client = RecordView::new(row, &record);
    finish(&mut editor, "added", client, &args.save, format).await
}

pub async fn rename(
    settings: &Settings,
    args: RenameArgs,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let mut editor = make_editor(settings)?;
    let id = editor.resolve(&args.id).map_err(CliError::store)?.id.clone();
    editor.rename(&id, &args.name).map_err(CliError::store)?;

    let (row, record) = editor
        .records()
        .iter()
        .enumerate()
        .find(|(_, r)| r.id == id)
        .ok_or_else(|| CliError::new(format!("client {} vanished after rename", id)))?;
    let client = RecordView::new(row + 1, record);
    finish(&mut editor, "renamed", client, &args.save, format).await
}

pub async fn delete(
    settings: &Settings,
    args: DeleteArgs,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let mut editor = make_editor(settings)?;
    let target = editor.resolve(&args.id).map_err(CliError::store)?.clone();

    if !args.yes && !confirm(&format!("delete {} ({})? [y/N] ", target.name, target.id))? {
        eprintln!("not deleted");
        return Ok(ExitCode::SUCCESS);
    }

    let row = editor
        .records()
        .iter()
        .position(|r| r.id == target.id)
        .map_or(0, |i| i + 1);
    let record = editor.delete(&target.id).map_err(CliError::store)?;
    let client = RecordView::new(row, &record);
    finish(&mut editor, "deleted", client, &args.save, format).await
}

async fn finish(
    editor: &mut CliEditor,
    change: &'static str,
    client: RecordView,
    opts: &SaveArgs,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let summary = editor.save().await.map_err(CliError::from)?;
    let mut save = SaveView::new(&summary.report);

    let mut failures = Vec::new();
    if opts.check {
        let outcome = editor.check().await;
        if !outcome.ok {
            let mut err = CliError::action_failed("check", &outcome.output);
            if opts.restart {
                tracing::warn!("config check failed, not restarting");
                err = err.with_context("restart skipped because the check failed");
            }
            failures.push(err);
        }
        save = save.with_action(ActionView::new("check", &outcome));
    }
    if opts.restart && failures.is_empty() {
        let outcome = editor.restart().await;
        if !outcome.ok {
            failures.push(CliError::action_failed("restart", &outcome.output));
        }
        save = save.with_action(ActionView::new("restart", &outcome));
    }

    print(
        &ChangeView {
            change,
            client,
            save,
        },
        format,
    );
    for err in &failures {
        eprint!("{}", err);
    }
    Ok(if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Ask a yes/no question on stdin; end of input means no
fn confirm(prompt: &str) -> io::Result<bool> {
    eprint!("{}", prompt);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
