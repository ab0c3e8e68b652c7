// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edit session and its state machine
//!
//! A session owns the record store, the last loaded (or last written)
//! server config document and the dirty state. Mutations go through the
//! session so the store and the state can never disagree.
//!
//! ```text
//! Loaded --mutation--> Edited --save ok--> Saved --mutation--> Edited
//!    ^                   |                   |
//!    +-----reload--------+-------reload------+
//! ```
//!
//! Quitting is reachable from every state once the driver reports
//! `Terminated`; the state machine only asks for confirmation first when
//! there are unsaved edits.

use crate::clock::Clock;
use crate::effect::Effect;
use crate::id::IdGen;
use crate::reconcile::ManagedInbound;
use crate::record::{ClientRecord, RecordId};
use crate::store::{RecordStore, StoreError};
use serde_json::Value;
use std::path::PathBuf;

/// The state of an edit session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Freshly read from disk, nothing to save
    Loaded,
    /// In-memory edits not yet persisted
    Edited,
    /// Edits persisted; behaves like `Loaded`
    Saved,
    /// Terminal
    Quitting,
}

impl SessionState {
    pub fn is_dirty(&self) -> bool {
        matches!(self, SessionState::Edited)
    }

    /// Pure transition function. Invalid transitions are ignored.
    pub fn transition(&self, event: SessionEvent) -> (SessionState, Vec<Effect>) {
        use SessionEvent as E;
        use SessionState as S;

        match (*self, event) {
            (S::Quitting, _) => (S::Quitting, vec![]),

            (_, E::Mutated) => (S::Edited, vec![]),

            (state, E::Save { restart }) => {
                let mut effects = vec![Effect::Persist];
                if restart {
                    effects.push(Effect::Restart);
                }
                (state, effects)
            }
            (_, E::SaveSucceeded) => (S::Saved, vec![]),
            (S::Edited, E::SaveFailed) => (S::Edited, vec![]),

            (S::Edited, E::Reload { confirmed: false }) => (S::Edited, vec![Effect::ConfirmReload]),
            (state, E::Reload { .. }) => (state, vec![Effect::Reload]),
            (_, E::Reloaded) => (S::Loaded, vec![]),

            (S::Edited, E::Quit { choice }) => match choice {
                QuitChoice::Ask => (S::Edited, vec![Effect::ConfirmQuit]),
                QuitChoice::Save => (S::Edited, vec![Effect::Persist, Effect::Terminate]),
                QuitChoice::Discard => (S::Edited, vec![Effect::Terminate]),
                QuitChoice::Cancel => (S::Edited, vec![]),
            },
            (state, E::Quit { choice: QuitChoice::Cancel }) => (state, vec![]),
            (state, E::Quit { .. }) => (state, vec![Effect::Terminate]),
            (_, E::Terminated) => (S::Quitting, vec![]),

            // Invalid transitions are ignored
            (state, _) => (state, vec![]),
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Loaded => "loaded",
            SessionState::Edited => "edited",
            SessionState::Saved => "saved",
            SessionState::Quitting => "quitting",
        };
        write!(f, "{}", name)
    }
}

/// What the operator wants done with unsaved edits on quit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitChoice {
    /// Prompt if dirty
    Ask,
    Save,
    Discard,
    Cancel,
}

/// Inputs to the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Mutated,
    Save { restart: bool },
    SaveSucceeded,
    SaveFailed,
    Reload { confirmed: bool },
    Reloaded,
    Quit { choice: QuitChoice },
    Terminated,
}

/// The files one session works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    pub config_path: PathBuf,
    pub clients_table: PathBuf,
    pub backup_dir: PathBuf,
}

/// One edit session over a roster and a server config
#[derive(Debug, Clone)]
pub struct Session {
    pub paths: SessionPaths,
    pub inbound: ManagedInbound,
    store: RecordStore,
    document: Value,
    state: SessionState,
    auto_save_on_quit: bool,
}

impl Session {
    /// Create a session in the `Loaded` state
    pub fn new(
        paths: SessionPaths,
        inbound: ManagedInbound,
        store: RecordStore,
        document: Value,
    ) -> Self {
        Self {
            paths,
            inbound,
            store,
            document,
            state: SessionState::Loaded,
            auto_save_on_quit: false,
        }
    }

    pub fn with_auto_save_on_quit(mut self, enabled: bool) -> Self {
        self.auto_save_on_quit = enabled;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Server config as last read from or written to disk
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Feed an event to the state machine and return the requested effects
    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        let (next, effects) = self.state.transition(event);
        if next != self.state {
            tracing::debug!(from = %self.state, to = %next, ?event, "session transition");
        }
        self.state = next;
        effects
    }

    pub fn add(
        &mut self,
        name: &str,
        id_gen: &impl IdGen,
        clock: &impl Clock,
    ) -> Result<ClientRecord, StoreError> {
        let record = self.store.add(name, id_gen, clock)?;
        self.apply(SessionEvent::Mutated);
        Ok(record)
    }

    pub fn rename(&mut self, id: &RecordId, new_name: &str) -> Result<(), StoreError> {
        self.store.rename(id, new_name)?;
        self.apply(SessionEvent::Mutated);
        Ok(())
    }

    pub fn delete(&mut self, id: &RecordId) -> Result<ClientRecord, StoreError> {
        let removed = self.store.delete(id)?;
        self.apply(SessionEvent::Mutated);
        Ok(removed)
    }

    /// Request to quit; `Ask` becomes `Save` when auto-save is configured
    pub fn quit(&mut self, choice: QuitChoice) -> Vec<Effect> {
        let choice = match choice {
            QuitChoice::Ask if self.auto_save_on_quit && self.is_dirty() => QuitChoice::Save,
            other => other,
        };
        self.apply(SessionEvent::Quit { choice })
    }

    /// Record a successful persist: the written document becomes current
    pub fn committed(&mut self, document: Value) {
        self.document = document;
        self.apply(SessionEvent::SaveSucceeded);
    }

    /// Replace the in-memory state with a fresh read from disk
    pub fn reloaded(&mut self, store: RecordStore, document: Value) {
        self.store = store;
        self.document = document;
        self.apply(SessionEvent::Reloaded);
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
