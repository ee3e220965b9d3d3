// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Record-level PII classification
//
// Two independent passes, unioned:
// - standalone: a known field whose whole value matches its pattern
// - combinatorial: two or more signal types present in the same record

use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::debug;

use super::config::{FieldKind, SignalType};
use super::patterns::{compile_patterns, CompiledPatterns};
use crate::error::PiiError;

/// Decoded payload: top-level keys only, in payload order
pub type FieldMap = serde_json::Map<String, Value>;

/// Number of distinct signal types that makes a record PII on its own
pub const COMBINATORIAL_THRESHOLD: usize = 2;

/// Verdict for one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Fields selected for redaction
    pub flagged: BTreeSet<FieldKind>,
    /// Signal types with evidence, whether or not the threshold was reached
    pub signals: BTreeSet<SignalType>,
    pub is_pii: bool,
}

impl Classification {
    pub fn is_flagged(&self, key: &str) -> bool {
        FieldKind::from_key(key).is_some_and(|kind| self.flagged.contains(&kind))
    }

    pub fn flagged_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.flagged.iter().map(FieldKind::as_str)
    }
}

/// Classifies decoded payloads against the fixed rule set
///
/// # Example
/// ```
/// use pii_redactor::pii_filter::{FieldClassifier, FieldMap};
/// use serde_json::json;
///
/// let classifier = FieldClassifier::new().unwrap();
/// let fields: FieldMap = json!({"email": "a@b.com", "address": "12 Main St"})
///     .as_object()
///     .cloned()
///     .unwrap();
///
/// let verdict = classifier.classify(&fields);
/// assert!(verdict.is_pii);
/// assert!(verdict.is_flagged("email"));
/// assert!(verdict.is_flagged("address"));
/// ```
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    patterns: CompiledPatterns,
}

impl FieldClassifier {
    pub fn new() -> Result<Self, PiiError> {
        let patterns = compile_patterns()?;
        debug!(
            patterns = ?patterns.patterns.iter().map(|p| p.description).collect::<Vec<_>>(),
            "compiled standalone patterns"
        );
        Ok(Self { patterns })
    }

    pub fn classify(&self, fields: &FieldMap) -> Classification {
        let mut result = Classification::default();

        // Standalone pass: only textual values are matched
        for pattern in &self.patterns.patterns {
            if let Some(Value::String(text)) = fields.get(pattern.field.as_str()) {
                if pattern.regex.is_match(text) {
                    result.is_pii = true;
                    result.flagged.insert(pattern.field);
                }
            }
        }

        // Combinatorial pass
        result.signals = SignalType::ALL
            .into_iter()
            .filter(|signal| signal_present(*signal, fields))
            .collect();

        if result.signals.len() >= COMBINATORIAL_THRESHOLD {
            result.is_pii = true;
            for signal in &result.signals {
                // Present keys are flagged even when their own value is empty
                for field in signal.fields() {
                    if fields.contains_key(field.as_str()) {
                        result.flagged.insert(*field);
                    }
                }
            }
        }

        result
    }
}

fn signal_present(signal: SignalType, fields: &FieldMap) -> bool {
    match signal {
        SignalType::Name => {
            has_full_name(fields)
                || (has_value(fields, FieldKind::FirstName)
                    && has_value(fields, FieldKind::LastName))
        }
        other => other.fields().iter().any(|field| has_value(fields, *field)),
    }
}

/// `name` counts only when it holds at least two whitespace-separated tokens
fn has_full_name(fields: &FieldMap) -> bool {
    fields
        .get(FieldKind::Name.as_str())
        .filter(|value| is_truthy(value))
        .is_some_and(|value| value_text(value).split_whitespace().nth(1).is_some())
}

fn has_value(fields: &FieldMap, field: FieldKind) -> bool {
    fields.get(field.as_str()).is_some_and(is_truthy)
}

/// Emptiness test for "present with a non-empty value"
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        // Out of f64 range is never zero
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Textual form of a value: strings as-is, anything else as compact JSON
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
