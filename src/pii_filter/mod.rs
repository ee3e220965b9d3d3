// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// PII Filter - record classification and field masking
//
// - Anchored per-field patterns for standalone identifiers
// - Signal counting for combinatorial identifiers
// - Copy-on-write masking that leaves non-PII records untouched

pub mod config;
pub mod detector;
pub mod masking;
pub mod patterns;

pub use config::{FieldKind, PipelineConfig, SignalType};
pub use detector::{Classification, FieldClassifier, FieldMap};
pub use masking::{mask_fields, redact};
