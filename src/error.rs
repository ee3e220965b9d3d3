// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Error types for the PII redactor

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Any of these aborts a run.
#[derive(Debug, Error)]
pub enum PiiError {
    #[error("failed to compile pattern '{pattern}': {source}")]
    PatternCompile {
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("input file not found at {}", .0.display())]
    InputNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Why a payload could not be turned into a field mapping.
///
/// Recovered by the pipeline, never surfaced to the caller.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("payload is JSON but not an object")]
    NotAnObject,
}

pub type Result<T, E = PiiError> = std::result::Result<T, E>;
