// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sbm-core: Core library for the sing-box client manager (sbm)
//!
//! This crate provides:
//! - The client record store and its identity rules
//! - The config reconciler that mirrors the store into the server config
//! - The edit session and its pure state machine
//! - Settings, clock and id abstractions

pub mod clock;
pub mod id;

pub mod effect;
pub mod reconcile;
pub mod record;
pub mod session;
pub mod settings;
pub mod store;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use effect::Effect;
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use reconcile::{
    locate, managed_users, reconcile, records_from_users, ConfigShapeError, ManagedInbound,
};
pub use record::{ClientRecord, CreatedAt, RecordId};
pub use session::{QuitChoice, Session, SessionEvent, SessionPaths, SessionState};
pub use settings::{Settings, SettingsError};
pub use store::{RecordStore, StoreError};
