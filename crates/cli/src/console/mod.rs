// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive console over one edit session
//!
//! Lookup, mutation and save failures are shown and the loop goes on;
//! only failing to read input or write output ends it early.

mod command;
mod input;

pub use input::{Input, LineSource, ReadlineInput};

use crate::error::CliError;
use crate::output::{ActionView, RecordView, SaveView};
use command::{parse, ConsoleCommand, HELP};
use sbm_adapters::ServerAdapter;
use sbm_core::{Clock, IdGen, QuitChoice, RecordId};
use sbm_engine::{Editor, EditorError, QuitOutcome, ReloadOutcome};
use sbm_storage::DocumentWriter;
use std::io::Write;

const PROMPT: &str = "sbm> ";
const DIRTY_PROMPT: &str = "sbm*> ";

pub struct Console<'a, S, W, C, I, L, O>
where
    W: DocumentWriter,
    C: Clock,
    I: IdGen,
{
    editor: &'a mut Editor<S, W, C, I>,
    input: L,
    out: O,
    /// End of input was already seen once at the main prompt
    input_closed: bool,
}

impl<'a, S, W, C, I, L, O> Console<'a, S, W, C, I, L, O>
where
    S: ServerAdapter,
    W: DocumentWriter,
    C: Clock,
    I: IdGen,
    L: LineSource,
    O: Write,
{
    pub fn new(editor: &'a mut Editor<S, W, C, I>, input: L, out: O) -> Self {
        Self {
            editor,
            input,
            out,
            input_closed: false,
        }
    }

    /// Run until the session ends
    pub async fn run(mut self) -> anyhow::Result<()> {
        self.greet()?;

        while !self.editor.is_finished() {
            let prompt = if self.editor.is_dirty() {
                DIRTY_PROMPT
            } else {
                PROMPT
            };
            match self.input.read(prompt)? {
                Input::Line(line) => {
                    self.input_closed = false;
                    self.handle_line(&line).await?;
                }
                Input::Interrupted => self.quit().await?,
                Input::Eof if self.input_closed => {
                    // Nobody is left to answer; a second end of input gives up
                    if self.editor.is_dirty() {
                        tracing::warn!("input closed, discarding unsaved changes");
                        writeln!(self.out, "input closed, unsaved changes discarded")?;
                    }
                    let outcome = self.editor.quit(QuitChoice::Discard).await;
                    self.report_quit(outcome)?;
                }
                Input::Eof => {
                    self.input_closed = true;
                    self.quit().await?;
                }
            }
        }
        Ok(())
    }

    fn greet(&mut self) -> anyhow::Result<()> {
        let paths = &self.editor.session().paths;
        writeln!(
            self.out,
            "{} clients in {} (server config {})",
            self.editor.records().len(),
            paths.clients_table.display(),
            paths.config_path.display()
        )?;
        if self.editor.seeded() {
            writeln!(
                self.out,
                "roster was empty; imported the users of inbound '{}'",
                self.editor.session().inbound.tag
            )?;
        }
        writeln!(self.out, "type 'help' for commands")?;
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> anyhow::Result<()> {
        let command = match parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(err) => {
                writeln!(self.out, "{}", err)?;
                return Ok(());
            }
        };
        self.input.remember(line.trim());
        tracing::debug!(?command, "console command");
        self.execute(command).await
    }

    async fn execute(&mut self, command: ConsoleCommand) -> anyhow::Result<()> {
        match command {
            ConsoleCommand::List => self.list(),
            ConsoleCommand::Add { name } => match self.editor.add(&name) {
                Ok(record) => {
                    writeln!(self.out, "added {} ({})", record.name, record.id)?;
                    Ok(())
                }
                Err(err) => self.show(CliError::store(err)),
            },
            ConsoleCommand::Rename { target, name } => {
                let id = match self.target(&target) {
                    Ok(id) => id,
                    Err(err) => return self.show(err),
                };
                match self.editor.rename(&id, &name) {
                    Ok(()) => {
                        writeln!(self.out, "renamed {} to {}", id, name.trim())?;
                        Ok(())
                    }
                    Err(err) => self.show(CliError::store(err)),
                }
            }
            ConsoleCommand::Delete { target } => self.delete(&target),
            ConsoleCommand::Save { restart } => {
                let result = if restart {
                    self.editor.save_and_restart().await
                } else {
                    self.editor.save().await
                };
                match result {
                    Ok(summary) => {
                        writeln!(self.out, "{}", SaveView::from_summary(&summary))?;
                        Ok(())
                    }
                    Err(err) => self.show(err.into()),
                }
            }
            ConsoleCommand::Check => {
                let outcome = self.editor.check().await;
                writeln!(self.out, "{}", ActionView::new("check", &outcome))?;
                Ok(())
            }
            ConsoleCommand::Restart => {
                let outcome = self.editor.restart().await;
                writeln!(self.out, "{}", ActionView::new("restart", &outcome))?;
                Ok(())
            }
            ConsoleCommand::Reload => self.reload().await,
            ConsoleCommand::Quit => self.quit().await,
            ConsoleCommand::Help => {
                writeln!(self.out, "{}", HELP)?;
                Ok(())
            }
        }
    }

    fn list(&mut self) -> anyhow::Result<()> {
        let rows = RecordView::table(self.editor.records());
        if rows.is_empty() {
            writeln!(self.out, "no clients")?;
        }
        for row in rows {
            writeln!(self.out, "{}", row)?;
        }
        Ok(())
    }

    fn delete(&mut self, target: &str) -> anyhow::Result<()> {
        let id = match self.target(target) {
            Ok(id) => id,
            Err(err) => return self.show(err),
        };
        let name = self
            .editor
            .records()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.clone())
            .unwrap_or_default();

        let prompt = format!("delete {} ({})? [y/N] ", name, id);
        if !matches!(self.ask(&prompt)?.as_deref(), Some("y" | "yes")) {
            writeln!(self.out, "not deleted")?;
            return Ok(());
        }
        match self.editor.delete(&id) {
            Ok(record) => {
                writeln!(self.out, "deleted {} ({})", record.name, record.id)?;
                Ok(())
            }
            Err(err) => self.show(CliError::store(err)),
        }
    }

    async fn reload(&mut self) -> anyhow::Result<()> {
        let mut outcome = self.editor.reload(false).await;
        if let Ok(ReloadOutcome::NeedsConfirmation) = outcome {
            let answer = self.ask("discard unsaved changes and reload? [y/N] ")?;
            if !matches!(answer.as_deref(), Some("y" | "yes")) {
                writeln!(self.out, "reload cancelled")?;
                return Ok(());
            }
            outcome = self.editor.reload(true).await;
        }
        match outcome {
            Ok(ReloadOutcome::Reloaded { records, seeded }) => {
                let note = if seeded { " (imported from server config)" } else { "" };
                writeln!(self.out, "reloaded {} clients{}", records, note)?;
                Ok(())
            }
            Ok(ReloadOutcome::NeedsConfirmation) => Ok(()),
            Err(err) => self.show(err.into()),
        }
    }

    async fn quit(&mut self) -> anyhow::Result<()> {
        let outcome = match self.editor.quit(QuitChoice::Ask).await {
            Ok(QuitOutcome::NeedsConfirmation) => {
                let choice = self.ask_quit_choice()?;
                self.editor.quit(choice).await
            }
            other => other,
        };
        self.report_quit(outcome)
    }

    fn ask_quit_choice(&mut self) -> anyhow::Result<QuitChoice> {
        loop {
            let answer = self.ask("save changes before quitting? [y]es/[n]o/[c]ancel ")?;
            let choice = match answer.as_deref() {
                Some("y" | "yes") => QuitChoice::Save,
                Some("n" | "no") => QuitChoice::Discard,
                Some("c" | "cancel" | "") | None => QuitChoice::Cancel,
                Some(_) => continue,
            };
            return Ok(choice);
        }
    }

    fn report_quit(&mut self, outcome: Result<QuitOutcome, EditorError>) -> anyhow::Result<()> {
        match outcome {
            Ok(QuitOutcome::Quit { saved }) => {
                if let Some(report) = saved {
                    writeln!(self.out, "{}", SaveView::new(&report))?;
                }
                writeln!(self.out, "bye")?;
                Ok(())
            }
            Ok(QuitOutcome::Cancelled | QuitOutcome::NeedsConfirmation) => {
                writeln!(self.out, "quit cancelled")?;
                Ok(())
            }
            Err(err) => self.show(err.into()),
        }
    }

    /// Row number (as shown by `list`) or id / unique id prefix
    fn target(&self, target: &str) -> Result<RecordId, CliError> {
        let records = self.editor.records();
        if let Ok(row) = target.parse::<usize>() {
            if (1..=records.len()).contains(&row) {
                return Ok(records[row - 1].id.clone());
            }
        }
        self.editor
            .resolve(target)
            .map(|record| record.id.clone())
            .map_err(CliError::store)
    }

    /// Read a one-line answer, lowercased; `None` when input ends or is interrupted
    fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.input.read(prompt)? {
            Input::Line(line) => Ok(Some(line.trim().to_ascii_lowercase())),
            Input::Interrupted | Input::Eof => Ok(None),
        }
    }

    fn show(&mut self, err: CliError) -> anyhow::Result<()> {
        write!(self.out, "{}", err)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
