// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sbm-storage: On-disk documents for sbm
//!
//! Reads and writes the client roster and the server config, snapshots
//! both before every overwrite and replaces them atomically.

mod atomic;
mod backup;
mod document;
mod load;
mod persist;
mod roster;

pub use atomic::{AtomicFileWriter, DocumentWriter};
pub use backup::{backup_file, backup_name};
pub use document::{decode_document, encode_document};
pub use load::{load_documents, LoadError, LoadedDocuments};
pub use persist::{Committed, FileOutcome, PersistenceEngine, SaveError, SaveReport};
pub use roster::{decode_roster, encode_roster, Roster, RosterLayout, DEFAULT_CLIENT_NAME};

#[cfg(any(test, feature = "test-support"))]
pub use atomic::FailingWriter;
