// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The editor: one session plus the collaborators that act on its effects
//!
//! Mutations are applied directly to the session. Everything that touches
//! disk or the container runtime goes through the state machine, and the
//! effects it returns are executed in order (see `executor`).

use crate::error::EditorError;
use crate::executor::Steps;
use sbm_adapters::{ActionOutcome, ServerAdapter};
use sbm_core::{
    ClientRecord, Clock, IdGen, QuitChoice, RecordId, Session, SessionEvent, SessionPaths, SessionState,
    Settings, StoreError,
};
use sbm_storage::{
    load_documents, DocumentWriter, LoadError, PersistenceEngine, RosterLayout, SaveReport,
};

/// Collaborators an editor needs
pub struct EditorDeps<S, W, C, I> {
    pub server: S,
    pub writer: W,
    pub clock: C,
    pub id_gen: I,
}

/// Result of a successful save
#[derive(Debug, Clone)]
pub struct SaveSummary {
    pub report: SaveReport,
    /// Present when a restart was requested
    pub restart: Option<ActionOutcome>,
}

/// Result of a reload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Unsaved edits would be lost; ask and call again with `confirmed`
    NeedsConfirmation,
    Reloaded { records: usize, seeded: bool },
}

/// Result of a quit request
#[derive(Debug, Clone)]
pub enum QuitOutcome {
    /// Unsaved edits; ask save / discard / cancel and call again
    NeedsConfirmation,
    Cancelled,
    Quit { saved: Option<SaveReport> },
}

/// Drives one edit session
pub struct Editor<S, W: DocumentWriter, C: Clock, I: IdGen> {
    pub(crate) session: Session,
    pub(crate) layout: RosterLayout,
    pub(crate) seeded: bool,
    pub(crate) container: String,
    pub(crate) server: S,
    pub(crate) persistence: PersistenceEngine<W, C>,
    pub(crate) clock: C,
    id_gen: I,
}

impl<S, W, C, I> Editor<S, W, C, I>
where
    S: ServerAdapter,
    W: DocumentWriter,
    C: Clock,
    I: IdGen,
{
    /// Load both documents and start a clean session
    pub fn open(settings: &Settings, deps: EditorDeps<S, W, C, I>) -> Result<Self, LoadError> {
        let paths = SessionPaths {
            config_path: settings.config_path.clone(),
            clients_table: settings.clients_table.clone(),
            backup_dir: settings.backup_dir(),
        };
        let inbound = settings.managed_inbound();
        let loaded = load_documents(&paths, &inbound, &deps.clock)?;

        let session = Session::new(paths, inbound, loaded.store, loaded.document)
            .with_auto_save_on_quit(settings.auto_save_on_quit);

        Ok(Self {
            session,
            layout: loaded.layout,
            seeded: loaded.seeded,
            container: settings.container.clone(),
            server: deps.server,
            persistence: PersistenceEngine::new(deps.writer, deps.clock.clone()),
            clock: deps.clock,
            id_gen: deps.id_gen,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn records(&self) -> &[ClientRecord] {
        self.session.store().list()
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    /// The store was seeded from the server config's users at the last load
    pub fn seeded(&self) -> bool {
        self.seeded
    }

    /// Find a record by exact id or unique id prefix
    pub fn resolve(&self, query: &str) -> Result<&ClientRecord, StoreError> {
        self.session.store().resolve(query)
    }

    pub fn add(&mut self, name: &str) -> Result<ClientRecord, StoreError> {
        self.session.add(name, &self.id_gen, &self.clock)
    }

    pub fn rename(&mut self, id: &RecordId, new_name: &str) -> Result<(), StoreError> {
        self.session.rename(id, new_name)
    }

    pub fn delete(&mut self, id: &RecordId) -> Result<ClientRecord, StoreError> {
        self.session.delete(id)
    }

    /// Back up, reconcile and write both documents
    pub async fn save(&mut self) -> Result<SaveSummary, EditorError> {
        self.save_with(false).await
    }

    /// Save, then restart the server if the save succeeded
    pub async fn save_and_restart(&mut self) -> Result<SaveSummary, EditorError> {
        self.save_with(true).await
    }

    async fn save_with(&mut self, restart: bool) -> Result<SaveSummary, EditorError> {
        let effects = self.session.apply(SessionEvent::Save { restart });
        let steps = self.run(effects).await?;
        match steps.saved {
            Some(report) => Ok(SaveSummary {
                report,
                restart: steps.restart,
            }),
            None => Err(EditorError::SessionEnded),
        }
    }

    /// Validate the server config currently on disk
    pub async fn check(&self) -> ActionOutcome {
        self.server.check_config(&self.session.paths.config_path).await
    }

    /// Restart the server container
    pub async fn restart(&self) -> ActionOutcome {
        self.server.restart(&self.container).await
    }

    /// Re-read both documents, discarding in-memory state
    pub async fn reload(&mut self, confirmed: bool) -> Result<ReloadOutcome, EditorError> {
        let effects = self.session.apply(SessionEvent::Reload { confirmed });
        let steps = self.run(effects).await?;
        if steps.confirm_reload {
            return Ok(ReloadOutcome::NeedsConfirmation);
        }
        Ok(ReloadOutcome::Reloaded {
            records: self.session.store().len(),
            seeded: self.seeded,
        })
    }

    pub async fn quit(&mut self, choice: QuitChoice) -> Result<QuitOutcome, EditorError> {
        let effects = self.session.quit(choice);
        let steps: Steps = self.run(effects).await?;
        if steps.confirm_quit {
            Ok(QuitOutcome::NeedsConfirmation)
        } else if steps.terminated {
            Ok(QuitOutcome::Quit {
                saved: steps.saved,
            })
        } else {
            Ok(QuitOutcome::Cancelled)
        }
    }

    /// The session has ended
    pub fn is_finished(&self) -> bool {
        self.session.state() == SessionState::Quitting
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
