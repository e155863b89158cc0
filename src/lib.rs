//! # pixbench
//!
//! Benchmark harness that times a candidate image codec against a reference
//! codec across a sweep of square image sizes and writes comparison reports.
//!
//! The codecs are external programs. The reference is driven as two
//! commands (encoder and decoder) that the harness times per trial; the
//! candidate exposes a `benchmark` subcommand that times itself and writes a
//! JSON document.
//!
//! ## Pipeline
//!
//! 1. [`corpus`] writes one grayscale PGM per size (reused on later runs).
//! 2. [`runner`] adapters run the trials and return [`result::SizeRun`]s.
//! 3. [`stats`] derives average, median, deviation and throughput on demand.
//! 4. [`analysis`] compares the implementations and classifies scaling.
//! 5. [`report`] renders markdown, CSV and a narrative profile.
//!
//! [`harness`] wires these together for the `pixbench` binary.
//!
//! ## Example
//!
//! ```rust
//! use pixbench::analysis::Analysis;
//! use pixbench::config::ProfileConfig;
//! use pixbench::result::{BenchmarkResult, Implementation, Operation, ResultSet, SizeRun};
//!
//! let mut results = ResultSet::new();
//! results.push(SizeRun {
//!     encode: BenchmarkResult::with_timings(
//!         Implementation::Candidate, 512, Operation::Encode, vec![0.12]),
//!     decode: None,
//! });
//! results.push(SizeRun {
//!     encode: BenchmarkResult::with_timings(
//!         Implementation::Reference, 512, Operation::Encode, vec![0.10]),
//!     decode: None,
//! });
//!
//! let analysis = Analysis::new(&results, &ProfileConfig::default());
//! let pct = analysis.relative_speed(512, Operation::Encode).unwrap();
//! assert!((pct - 83.33).abs() < 0.01);
//! ```

#![forbid(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod error;
pub mod harness;
pub mod report;
pub mod result;
pub mod runner;
pub mod stats;

pub use config::Config;
pub use error::{Error, Result};
pub use result::{BenchmarkResult, Implementation, Operation, ResultSet};
