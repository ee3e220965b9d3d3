// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Record pipeline: CSV rows in, redacted CSV rows out

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::{Serialize, Serializer};
use serde_json::ser::Formatter;
use serde_json::Value;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DecodeError, PiiError, Result};
use crate::pii_filter::{
    mask_fields, Classification, FieldClassifier, FieldMap, PipelineConfig, SignalType,
};

/// Header of the output file
pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data rows read, header excluded
    pub rows_read: u64,
    pub rows_written: u64,
    /// Rows without exactly two fields
    pub rows_skipped: u64,
    pub pii_records: u64,
    pub decode_failures: u64,
}

/// Payload after classification and masking
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedactedPayload {
    pub fields: FieldMap,
    pub classification: Classification,
}

impl RedactedPayload {
    pub fn is_pii(&self) -> bool {
        self.classification.is_pii
    }
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    record_id: &'a str,
    redacted_data_json: String,
    #[serde(serialize_with = "serialize_flag")]
    is_pii: bool,
}

fn serialize_flag<S>(flag: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *flag { "True" } else { "False" })
}

/// Drives classification and masking over a whole file
///
/// Records are independent; nothing is carried from one row to the next.
pub struct RecordPipeline {
    classifier: FieldClassifier,
    config: PipelineConfig,
}

impl RecordPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            classifier: FieldClassifier::new()?,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read `input`, write the redacted file to the configured output path
    pub fn run(&self, input: &Path) -> Result<RunSummary> {
        let reader = File::open(input).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PiiError::InputNotFound(input.to_path_buf()),
            _ => PiiError::Io(err),
        })?;
        let writer = File::create(&self.config.output_path)?;

        self.process(reader, writer)
    }

    /// Stream rows from `input` to `output`
    ///
    /// The first input row is a header and is skipped. Rows that do not have
    /// exactly two fields are dropped; undecodable payloads are written as `{}`.
    pub fn process<R: Read, W: Write>(&self, input: R, output: W) -> Result<RunSummary> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_writer(output);

        writer.write_record(OUTPUT_HEADER)?;

        let mut summary = RunSummary::default();
        for row in reader.records() {
            let row = row?;
            summary.rows_read += 1;

            if row.len() != 2 {
                summary.rows_skipped += 1;
                debug!(
                    line = ?row.position().map(|pos| pos.line()),
                    fields = row.len(),
                    "skipping malformed row"
                );
                continue;
            }

            let record_id = &row[0];
            let redacted = match self.redact_payload(&row[1]) {
                Ok(redacted) => redacted,
                Err(err) => {
                    summary.decode_failures += 1;
                    debug!(record_id, error = %err, "payload decode failed");
                    RedactedPayload::default()
                }
            };

            if redacted.is_pii() {
                summary.pii_records += 1;
                if self.config.log_detections {
                    let flagged: Vec<_> = redacted.classification.flagged_keys().collect();
                    let signals: Vec<_> = redacted
                        .classification
                        .signals
                        .iter()
                        .map(SignalType::as_str)
                        .collect();
                    debug!(record_id, ?flagged, ?signals, "PII detected");
                }
            }

            writer.serialize(OutputRow {
                record_id,
                redacted_data_json: encode_payload(&redacted.fields)?,
                is_pii: redacted.is_pii(),
            })?;
            summary.rows_written += 1;
        }

        writer.flush()?;

        info!(
            rows_read = summary.rows_read,
            rows_written = summary.rows_written,
            rows_skipped = summary.rows_skipped,
            pii_records = summary.pii_records,
            decode_failures = summary.decode_failures,
            "redaction run complete"
        );

        Ok(summary)
    }

    /// Decode, classify and mask one payload
    pub fn redact_payload(
        &self,
        payload: &str,
    ) -> std::result::Result<RedactedPayload, DecodeError> {
        let fields = decode_payload(payload)?;
        let classification = self.classifier.classify(&fields);

        let fields = if classification.is_pii {
            mask_fields(&fields, &classification).into_owned()
        } else {
            fields
        };

        Ok(RedactedPayload {
            fields,
            classification,
        })
    }
}

/// Decode payload text into a field mapping
///
/// Tries the text as-is first, then with CSV quote doubling undone.
pub fn decode_payload(text: &str) -> std::result::Result<FieldMap, DecodeError> {
    match parse_object(text) {
        Ok(fields) => Ok(fields),
        Err(err) => match unescape_quotes(text) {
            Some(unescaped) => parse_object(&unescaped),
            None => Err(err),
        },
    }
}

/// Encode a field mapping the way the upstream exports do: `", "` and `": "`
/// separators, ASCII-only output, keys and number text as decoded
pub fn encode_payload(fields: &FieldMap) -> Result<String> {
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiSpacedFormatter);
    fields.serialize(&mut serializer)?;
    String::from_utf8(out)
        .map_err(|err| PiiError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Spaced separators, everything outside printable ASCII escaped as `\uXXXX`
struct AsciiSpacedFormatter;

impl Formatter for AsciiSpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn parse_object(text: &str) -> std::result::Result<FieldMap, DecodeError> {
    match serde_json::from_str(text).map_err(DecodeError::InvalidJson)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Strip one pair of outer quotes and collapse `""` to `"`.
/// None when there is nothing to undo.
fn unescape_quotes(text: &str) -> Option<String> {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text);

    if inner.len() == text.len() && !inner.contains("\"\"") {
        return None;
    }
    Some(inner.replace("\"\"", "\""))
}
