//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod fake_codecs;

use pixbench::result::{BenchmarkResult, Implementation, Operation};

/// Result with timings given in milliseconds.
pub fn result_ms(
    implementation: Implementation,
    size: u32,
    operation: Operation,
    millis: &[f64],
) -> BenchmarkResult {
    BenchmarkResult::with_timings(
        implementation,
        size,
        operation,
        millis.iter().map(|m| m / 1000.0).collect(),
    )
}
