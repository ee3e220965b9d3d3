// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Field vocabularies and configuration for the PII filter

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default output file, written to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "redacted_output.csv";

/// Payload fields the filter knows how to classify and mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Phone,
    Aadhar,
    Passport,
    UpiId,
    Name,
    FirstName,
    LastName,
    Email,
    Address,
    IpAddress,
    DeviceId,
}

impl FieldKind {
    /// Payload key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Phone => "phone",
            FieldKind::Aadhar => "aadhar",
            FieldKind::Passport => "passport",
            FieldKind::UpiId => "upi_id",
            FieldKind::Name => "name",
            FieldKind::FirstName => "first_name",
            FieldKind::LastName => "last_name",
            FieldKind::Email => "email",
            FieldKind::Address => "address",
            FieldKind::IpAddress => "ip_address",
            FieldKind::DeviceId => "device_id",
        }
    }

    /// Look up a payload key. Keys are matched exactly (case-sensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "phone" => Some(FieldKind::Phone),
            "aadhar" => Some(FieldKind::Aadhar),
            "passport" => Some(FieldKind::Passport),
            "upi_id" => Some(FieldKind::UpiId),
            "name" => Some(FieldKind::Name),
            "first_name" => Some(FieldKind::FirstName),
            "last_name" => Some(FieldKind::LastName),
            "email" => Some(FieldKind::Email),
            "address" => Some(FieldKind::Address),
            "ip_address" => Some(FieldKind::IpAddress),
            "device_id" => Some(FieldKind::DeviceId),
            _ => None,
        }
    }
}

/// Evidence categories tallied by the combinatorial rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Name,
    Email,
    Address,
    IpAddress,
    DeviceId,
}

impl SignalType {
    pub const ALL: [SignalType; 5] = [
        SignalType::Name,
        SignalType::Email,
        SignalType::Address,
        SignalType::IpAddress,
        SignalType::DeviceId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Name => "name",
            SignalType::Email => "email",
            SignalType::Address => "address",
            SignalType::IpAddress => "ip_address",
            SignalType::DeviceId => "device_id",
        }
    }

    /// Fields that back this signal and get flagged when it fires
    pub fn fields(&self) -> &'static [FieldKind] {
        match self {
            SignalType::Name => &[FieldKind::Name, FieldKind::FirstName, FieldKind::LastName],
            SignalType::Email => &[FieldKind::Email],
            SignalType::Address => &[FieldKind::Address],
            SignalType::IpAddress => &[FieldKind::IpAddress],
            SignalType::DeviceId => &[FieldKind::DeviceId],
        }
    }
}

/// Configuration for a redaction run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_path: PathBuf,
    // Emit a debug event naming the flagged fields of every PII record
    pub log_detections: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_detections: true,
        }
    }
}
