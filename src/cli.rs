// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Command-line interface

use clap::Parser;
use std::path::PathBuf;

/// Detect and redact PII in a CSV of JSON payloads.
///
/// Writes `redacted_output.csv` to the current directory.
#[derive(Debug, Parser)]
#[command(name = "pii-redactor", version, about)]
pub struct Cli {
    /// Input CSV with a header row and `record_id,data_json` rows
    pub input: PathBuf,
}
