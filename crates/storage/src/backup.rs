// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamped backups taken before a document is overwritten

use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Upper bound on `-N` suffixes tried for one timestamp
const MAX_COLLISIONS: u32 = 1000;

/// Backup file name for `file_name` taken at `now`, e.g.
/// `clientsTable.json.20261017T093000.000Z.bak`
pub fn backup_name(file_name: &str, now: DateTime<Utc>, attempt: u32) -> String {
    let stamp = now.format("%Y%m%dT%H%M%S%.3fZ");
    if attempt == 0 {
        format!("{}.{}.bak", file_name, stamp)
    } else {
        format!("{}.{}-{}.bak", file_name, stamp, attempt)
    }
}

/// Copy `target` unmodified into `backup_dir`.
///
/// Returns `None` when the target does not exist yet (nothing to protect).
/// Never overwrites an existing backup.
pub fn backup_file(
    target: &Path,
    backup_dir: &Path,
    now: DateTime<Utc>,
) -> io::Result<Option<PathBuf>> {
    let contents = match fs::read(target) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", target.display()),
            )
        })?;

    fs::create_dir_all(backup_dir)?;

    for attempt in 0..MAX_COLLISIONS {
        let path = backup_dir.join(backup_name(&file_name, now, attempt));
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        };
        file.write_all(&contents)?;
        file.sync_all()?;
        tracing::info!(target = %target.display(), backup = %path.display(), "backup written");
        return Ok(Some(path));
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("too many backups of {} at {}", file_name, now),
    ))
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
