// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// pii-redactor binary

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pii_redactor::cli::Cli;
use pii_redactor::{PipelineConfig, RecordPipeline};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout is reserved for the run report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pipeline = RecordPipeline::new(PipelineConfig::default())?;
    let output = pipeline.config().output_path.clone();

    let summary = pipeline
        .run(&cli.input)
        .with_context(|| format!("failed to redact {}", cli.input.display()))?;

    println!("Processing complete. Output written to {}", output.display());
    println!(
        "{} rows written, {} with PII, {} malformed rows skipped",
        summary.rows_written, summary.pii_records, summary.rows_skipped
    );

    Ok(())
}
