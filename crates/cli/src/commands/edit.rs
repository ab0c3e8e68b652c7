// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive edit command

use crate::adapters::make_editor;
use crate::console::{Console, ReadlineInput};
use sbm_core::Settings;
use std::process::ExitCode;

pub async fn handle(settings: &Settings) -> anyhow::Result<ExitCode> {
    let mut editor = make_editor(settings)?;
    let input = ReadlineInput::new()?;

    Console::new(&mut editor, input, std::io::stdout())
        .run()
        .await?;
    Ok(ExitCode::SUCCESS)
}
