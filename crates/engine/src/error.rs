// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the editor

use sbm_core::StoreError;
use sbm_storage::{LoadError, SaveError};
use thiserror::Error;

/// Errors surfaced by editor operations
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("reload failed: {0}")]
    Load(#[from] LoadError),
    #[error("save failed: {0}")]
    Save(#[from] SaveError),
    #[error("session has ended")]
    SessionEnded,
}
