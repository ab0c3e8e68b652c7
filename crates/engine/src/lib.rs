// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sbm execution engine: drives one edit session

mod editor;
mod error;
mod executor;

pub use editor::{Editor, EditorDeps, QuitOutcome, ReloadOutcome, SaveSummary};
pub use error::EditorError;
