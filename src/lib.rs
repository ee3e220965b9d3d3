// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Record-level PII classification and redaction
// for CSV files carrying JSON payloads

//! Scans `record_id,data_json` rows, decides per record whether the payload
//! holds PII, and writes a copy with the offending fields masked.
//!
//! A record is PII when either
//! - a standalone field (`phone`, `aadhar`, `passport`, `upi_id`) matches its
//!   format exactly, or
//! - two or more signal types (`name`, `email`, `address`, `ip_address`,
//!   `device_id`) are present together.
//!
//! # Examples
//!
//! ```
//! use pii_redactor::{PipelineConfig, RecordPipeline};
//!
//! let pipeline = RecordPipeline::new(PipelineConfig::default()).unwrap();
//! let redacted = pipeline
//!     .redact_payload(r#"{"phone": "9876543210", "city": "Pune"}"#)
//!     .unwrap();
//!
//! assert!(redacted.is_pii());
//! assert_eq!(redacted.fields["phone"], "98XXXXXX10");
//! assert_eq!(redacted.fields["city"], "Pune");
//! ```

pub mod cli;
pub mod error;
pub mod pii_filter;
pub mod pipeline;

pub use error::{DecodeError, PiiError};
pub use pii_filter::{Classification, FieldClassifier, FieldKind, FieldMap, PipelineConfig};
pub use pipeline::{RecordPipeline, RedactedPayload, RunSummary};
