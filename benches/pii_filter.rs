// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Criterion benchmarks for classification, masking and the record pipeline

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use std::hint::black_box;

use pii_redactor::pii_filter::{mask_fields, redact, FieldClassifier, FieldMap, PipelineConfig};
use pii_redactor::RecordPipeline;

fn fields(value: serde_json::Value) -> FieldMap {
    value.as_object().cloned().unwrap()
}

fn bench_classifier_construction(c: &mut Criterion) {
    c.bench_function("classifier_new", |b| b.iter(FieldClassifier::new));
}

fn bench_classify(c: &mut Criterion) {
    let classifier = FieldClassifier::new().unwrap();
    let cases = [
        ("no_pii", fields(json!({"order_id": 1234, "product": "pen", "qty": 2}))),
        ("standalone", fields(json!({"phone": "9876543210", "product": "pen"}))),
        (
            "combinatorial",
            fields(json!({
                "name": "John Smith",
                "email": "john.smith@example.com",
                "address": "12 MG Road, Pune",
            })),
        ),
    ];

    let mut group = c.benchmark_group("classify");
    for (label, record) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(label), record, |b, record| {
            b.iter(|| classifier.classify(black_box(record)))
        });
    }
    group.finish();
}

fn bench_redact(c: &mut Criterion) {
    let phone = json!("9876543210");
    let name = json!("Rahul Kumar Sharma");
    let email = json!("rahul.sharma@example.com");

    c.bench_function("redact_phone", |b| {
        b.iter(|| redact(black_box("phone"), black_box(&phone)))
    });
    c.bench_function("redact_name", |b| {
        b.iter(|| redact(black_box("name"), black_box(&name)))
    });
    c.bench_function("redact_email", |b| {
        b.iter(|| redact(black_box("email"), black_box(&email)))
    });
}

fn bench_mask_fields(c: &mut Criterion) {
    let classifier = FieldClassifier::new().unwrap();
    let record = fields(json!({
        "phone": "9876543210",
        "name": "John Smith",
        "email": "john.smith@example.com",
        "device_id": "D-1234",
        "product": "pen",
    }));
    let verdict = classifier.classify(&record);

    c.bench_function("mask_fields", |b| {
        b.iter(|| mask_fields(black_box(&record), black_box(&verdict)))
    });
}

fn build_input(rows: usize) -> String {
    let mut input = String::from("record_id,data_json\n");
    for i in 0..rows {
        let payload = match i % 3 {
            0 => json!({"phone": "9876543210", "city": "Pune"}),
            1 => json!({"name": "Jane Doe", "email": "jane@example.com"}),
            _ => json!({"product": "pen", "qty": i}),
        };
        input.push_str(&format!(
            "{},\"{}\"\n",
            i,
            payload.to_string().replace('"', "\"\"")
        ));
    }
    input
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = RecordPipeline::new(PipelineConfig {
        log_detections: false,
        ..Default::default()
    })
    .unwrap();

    let mut group = c.benchmark_group("pipeline");
    for rows in [100usize, 1_000, 10_000] {
        let input = build_input(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, input| {
            b.iter(|| {
                let mut output = Vec::with_capacity(input.len());
                pipeline
                    .process(black_box(input.as_bytes()), &mut output)
                    .unwrap();
                output
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_classifier_construction,
    bench_classify,
    bench_redact,
    bench_mask_fields,
    bench_pipeline
);
criterion_main!(benches);
