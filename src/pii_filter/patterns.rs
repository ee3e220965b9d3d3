// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Standalone rule table and regex compilation
// Every pattern is anchored: the whole field value must match

use once_cell::sync::Lazy;
use regex::Regex;

use super::config::FieldKind;
use crate::error::PiiError;

/// Compiled standalone rule
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub field: FieldKind,
    pub regex: Regex,
    pub description: &'static str,
}

/// All compiled standalone rules, one per field
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub patterns: Vec<CompiledPattern>,
}

impl CompiledPatterns {
    /// Rule bound to `field`, if it is a standalone field
    pub fn for_field(&self, field: FieldKind) -> Option<&CompiledPattern> {
        self.patterns.iter().find(|p| p.field == field)
    }
}

/// Pattern definitions (field, pattern, description)
type PatternDef = (FieldKind, &'static str, &'static str);

static STANDALONE_PATTERNS: Lazy<Vec<PatternDef>> = Lazy::new(|| {
    vec![
        (FieldKind::Phone, r"^[0-9]{10}$", "10-digit mobile number"),
        (FieldKind::Aadhar, r"^[0-9]{12}$", "12-digit Aadhaar number"),
        (
            FieldKind::Passport,
            r"^[A-Z][0-9]{7}$",
            "Passport number (letter + 7 digits)",
        ),
        // No dot allowed after the '@'
        (FieldKind::UpiId, r"^[\w.\-]+@\w+$", "UPI virtual payment address"),
    ]
});

/// Compile the standalone rule table
pub fn compile_patterns() -> Result<CompiledPatterns, PiiError> {
    let mut patterns = Vec::with_capacity(STANDALONE_PATTERNS.len());

    for &(field, pattern, description) in STANDALONE_PATTERNS.iter() {
        let regex = Regex::new(pattern).map_err(|source| PiiError::PatternCompile {
            pattern,
            source,
        })?;
        patterns.push(CompiledPattern {
            field,
            regex,
            description,
        });
    }

    Ok(CompiledPatterns { patterns })
}
