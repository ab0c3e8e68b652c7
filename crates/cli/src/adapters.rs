// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Editor factory for CLI commands

use crate::error::CliError;
use sbm_adapters::{DockerAdapter, TracedServerAdapter};
use sbm_core::{Settings, SystemClock, UuidIdGen};
use sbm_engine::{Editor, EditorDeps};
use sbm_storage::AtomicFileWriter;

/// Editor wired to the container runtime and the real filesystem
pub type CliEditor =
    Editor<TracedServerAdapter<DockerAdapter>, AtomicFileWriter, SystemClock, UuidIdGen>;

/// Create the container runtime adapter
pub fn make_server(settings: &Settings) -> TracedServerAdapter<DockerAdapter> {
    let docker = DockerAdapter::new(settings.docker_image.clone())
        .with_program(settings.docker_command.clone());
    TracedServerAdapter::new(docker)
}

/// Open a production editor over the documents named in `settings`
pub fn make_editor(settings: &Settings) -> Result<CliEditor, CliError> {
    let deps = EditorDeps {
        server: make_server(settings),
        writer: AtomicFileWriter,
        clock: SystemClock,
        id_gen: UuidIdGen,
    };
    Editor::open(settings, deps).map_err(CliError::load)
}
