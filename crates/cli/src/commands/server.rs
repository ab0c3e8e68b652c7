// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server commands: check and restart
//!
//! Neither needs the roster, so neither opens an editor. A malformed
//! managed inbound must not stop the operator from validating the file.

use crate::adapters::make_server;
use crate::error::CliError;
use crate::output::{print, ActionView, OutputFormat};
use sbm_adapters::ServerAdapter;
use sbm_core::Settings;
use std::process::ExitCode;

pub async fn check(settings: &Settings, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let outcome = make_server(settings)
        .check_config(&settings.config_path)
        .await;
    Ok(report(ActionView::new("check", &outcome), format))
}

pub async fn restart(settings: &Settings, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let outcome = make_server(settings).restart(&settings.container).await;
    Ok(report(ActionView::new("restart", &outcome), format))
}

fn report(view: ActionView, format: OutputFormat) -> ExitCode {
    print(&view, format);
    if view.ok {
        return ExitCode::SUCCESS;
    }
    eprint!("{}", CliError::action_failed(view.action, &view.output));
    ExitCode::FAILURE
}
