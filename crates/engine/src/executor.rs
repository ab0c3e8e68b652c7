// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor for the editor

use crate::editor::Editor;
use crate::error::EditorError;
use sbm_adapters::{ActionOutcome, ServerAdapter};
use sbm_core::{Clock, Effect, IdGen, SessionEvent};
use sbm_storage::{load_documents, DocumentWriter, SaveReport};
use tracing::Instrument;

/// What executing a batch of effects produced
#[derive(Debug, Default)]
pub(crate) struct Steps {
    pub saved: Option<SaveReport>,
    pub restart: Option<ActionOutcome>,
    pub confirm_reload: bool,
    pub confirm_quit: bool,
    pub terminated: bool,
}

impl<S, W, C, I> Editor<S, W, C, I>
where
    S: ServerAdapter,
    W: DocumentWriter,
    C: Clock,
    I: IdGen,
{
    /// Execute effects in order. A failing effect stops the batch, so a
    /// failed persist never restarts the server or ends the session.
    pub(crate) async fn run(&mut self, effects: Vec<Effect>) -> Result<Steps, EditorError> {
        let mut steps = Steps::default();
        for effect in effects {
            let span = tracing::info_span!("effect", effect = ?effect);
            self.execute(effect, &mut steps).instrument(span).await?;
        }
        Ok(steps)
    }

    async fn execute(&mut self, effect: Effect, steps: &mut Steps) -> Result<(), EditorError> {
        match effect {
            Effect::Persist => {
                let result = self.persistence.save(
                    self.session.store(),
                    self.layout,
                    self.session.document(),
                    &self.session.inbound,
                    &self.session.paths,
                );
                match result {
                    Ok(committed) => {
                        self.session.committed(committed.document);
                        steps.saved = Some(committed.report);
                        Ok(())
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "save failed, session stays dirty");
                        self.session.apply(SessionEvent::SaveFailed);
                        Err(e.into())
                    }
                }
            }

            Effect::Restart => {
                let outcome = self.server.restart(&self.container).await;
                if !outcome.ok {
                    // The save is already committed; only report
                    tracing::warn!(container = %self.container, "restart after save failed");
                }
                steps.restart = Some(outcome);
                Ok(())
            }

            Effect::ConfirmReload => {
                steps.confirm_reload = true;
                Ok(())
            }

            Effect::Reload => {
                let loaded =
                    load_documents(&self.session.paths, &self.session.inbound, &self.clock)?;
                self.layout = loaded.layout;
                self.seeded = loaded.seeded;
                self.session.reloaded(loaded.store, loaded.document);
                Ok(())
            }

            Effect::ConfirmQuit => {
                steps.confirm_quit = true;
                Ok(())
            }

            Effect::Terminate => {
                self.session.apply(SessionEvent::Terminated);
                steps.terminated = true;
                Ok(())
            }
        }
    }
}
