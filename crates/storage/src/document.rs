// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server config document text codec
//!
//! The document stays an opaque `serde_json::Value` (with key order
//! preserved); only the reconciler looks inside it.

use serde_json::Value;

pub fn decode_document(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Two-space pretty JSON with a trailing newline
pub fn encode_document(document: &Value) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}
