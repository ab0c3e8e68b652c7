// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects requested by the session state machine
//!
//! The state machine never touches the filesystem or the container runtime
//! itself. It returns effects and the editor executes them in order,
//! feeding the outcome back as a [`SessionEvent`](crate::session::SessionEvent).

/// Side effects the session state machine asks its driver to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Back up, reconcile and write both documents
    Persist,
    /// Restart the server container (only after a successful persist)
    Restart,
    /// Ask the operator before discarding unsaved edits on reload
    ConfirmReload,
    /// Re-read both documents from disk
    Reload,
    /// Ask the operator what to do with unsaved edits before quitting
    ConfirmQuit,
    /// End the session
    Terminate,
}
