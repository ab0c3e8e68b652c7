// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line input for the console

use super::command::COMMANDS;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// What the operator typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or closed stdin
    Eof,
}

/// Source of console lines
pub trait LineSource {
    fn read(&mut self, prompt: &str) -> anyhow::Result<Input>;

    /// Record a line the console acted on
    fn remember(&mut self, _line: &str) {}
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn read(&mut self, prompt: &str) -> anyhow::Result<Input> {
        (**self).read(prompt)
    }

    fn remember(&mut self, line: &str) {
        (**self).remember(line)
    }
}

/// Completes and hints command words
#[derive(Clone, Default)]
pub struct ConsoleHelper;

impl Helper for ConsoleHelper {}

impl Completer for ConsoleHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(char::is_whitespace) {
            return Ok((0, vec![]));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ConsoleHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(char::is_whitespace) {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for ConsoleHelper {}

impl Validator for ConsoleHelper {}

/// Terminal input with history and completion
pub struct ReadlineInput {
    rl: Editor<ConsoleHelper, DefaultHistory>,
}

impl ReadlineInput {
    pub fn new() -> anyhow::Result<Self> {
        let mut rl = Editor::new()?;
        rl.set_helper(Some(ConsoleHelper));
        Ok(Self { rl })
    }
}

impl LineSource for ReadlineInput {
    fn read(&mut self, prompt: &str) -> anyhow::Result<Input> {
        match self.rl.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        let _ = self.rl.add_history_entry(line);
    }
}
