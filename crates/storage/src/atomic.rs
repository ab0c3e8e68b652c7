// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic replacement of document files

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes a whole document to its canonical path
pub trait DocumentWriter: Send + Sync {
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writes `<name>.tmp` next to the target, syncs it, then renames it over
/// the target. Readers see the old file or the new one, never a mix.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicFileWriter;

impl DocumentWriter for AtomicFileWriter {
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = temp_path_for(path);
        let result = write_then_rename(&temp_path, path, contents);
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

fn write_then_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    // Atomic replace (rename is atomic on POSIX)
    fs::rename(temp_path, path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writer that fails for chosen file names and delegates the rest
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FailingWriter {
    inner: AtomicFileWriter,
    failing: Vec<std::ffi::OsString>,
}

#[cfg(any(test, feature = "test-support"))]
impl FailingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write whose target file name is `name`
    pub fn fail_on(mut self, name: impl Into<std::ffi::OsString>) -> Self {
        self.failing.push(name.into());
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
impl DocumentWriter for FailingWriter {
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let name = path.file_name().unwrap_or_default();
        if self.failing.iter().any(|f| f == name) {
            return Err(io::Error::other(format!(
                "injected write failure for {}",
                path.display()
            )));
        }
        self.inner.write(path, contents)
    }
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
