//! Benchmark result records and the collection threaded through a sweep.

use std::fmt;

use crate::stats::{self, Summary};

/// Which side of the comparison a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Implementation {
    /// The system under test. Ordered first so reports list it before the
    /// baseline within a size.
    Candidate,
    /// The established baseline codec.
    Reference,
}

impl Implementation {
    /// Stable identifier used in machine-readable output.
    pub fn as_str(self) -> &'static str {
        match self {
            Implementation::Candidate => "candidate",
            Implementation::Reference => "reference",
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codec direction being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    /// Raw image to compressed stream.
    Encode,
    /// Compressed stream back to raw image.
    Decode,
}

impl Operation {
    /// Both operations in report order.
    pub const ALL: [Operation; 2] = [Operation::Encode, Operation::Decode];

    /// Stable identifier used in machine-readable output.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Encode => "encode",
            Operation::Decode => "decode",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timings for one (implementation, size, operation) triple.
///
/// Only raw trial times are stored; every statistic is recomputed from them
/// on request.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    implementation: Implementation,
    image_size: u32,
    operation: Operation,
    timings: Vec<f64>,
    compressed_size: Option<u64>,
}

impl BenchmarkResult {
    /// Create an empty result awaiting trials.
    pub fn new(implementation: Implementation, image_size: u32, operation: Operation) -> Self {
        Self {
            implementation,
            image_size,
            operation,
            timings: Vec::new(),
            compressed_size: None,
        }
    }

    /// Create a result from already measured timings (seconds).
    pub fn with_timings(
        implementation: Implementation,
        image_size: u32,
        operation: Operation,
        timings: Vec<f64>,
    ) -> Self {
        Self {
            implementation,
            image_size,
            operation,
            timings,
            compressed_size: None,
        }
    }

    /// Append one trial duration in seconds.
    pub fn record(&mut self, secs: f64) {
        self.timings.push(secs);
    }

    /// Attach the compressed artifact size reported for an encode.
    pub fn set_compressed_size(&mut self, bytes: Option<u64>) {
        self.compressed_size = bytes;
    }

    /// Builder form of [`set_compressed_size`](Self::set_compressed_size).
    pub fn compressed(mut self, bytes: Option<u64>) -> Self {
        self.compressed_size = bytes;
        self
    }

    pub fn implementation(&self) -> Implementation {
        self.implementation
    }

    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Trial durations in seconds, in execution order.
    pub fn timings(&self) -> &[f64] {
        &self.timings
    }

    pub fn compressed_size(&self) -> Option<u64> {
        self.compressed_size
    }

    /// Number of pixels in the test image.
    pub fn pixels(&self) -> u64 {
        self.image_size as u64 * self.image_size as u64
    }

    pub fn average(&self) -> f64 {
        stats::mean(&self.timings)
    }

    pub fn median(&self) -> f64 {
        stats::median(&self.timings)
    }

    pub fn std_dev(&self) -> f64 {
        stats::sample_std_dev(&self.timings)
    }

    pub fn min_time(&self) -> f64 {
        stats::min(&self.timings)
    }

    pub fn max_time(&self) -> f64 {
        stats::max(&self.timings)
    }

    /// Megapixels per second at the average time.
    pub fn throughput(&self) -> f64 {
        stats::throughput_mpps(self.image_size, self.average())
    }

    /// All derived metrics at once.
    pub fn summary(&self) -> Summary {
        Summary::from_timings(self.image_size, &self.timings)
    }

    /// Raw input bytes per compressed byte for an 8-bit grayscale input.
    ///
    /// `None` when the codec did not report a (non-zero) compressed size.
    pub fn compression_ratio(&self) -> Option<f64> {
        match self.compressed_size {
            Some(bytes) if bytes > 0 => Some(self.pixels() as f64 / bytes as f64),
            _ => None,
        }
    }
}

/// Outcome of running one adapter over one input size.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeRun {
    /// Encode timings.
    pub encode: BenchmarkResult,
    /// Decode timings, or `None` when the implementation could not decode.
    pub decode: Option<BenchmarkResult>,
}

/// A result that could not be measured at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Missing {
    pub implementation: Implementation,
    pub image_size: u32,
    pub operation: Operation,
}

/// Every result gathered during one sweep, in the order it was measured.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    results: Vec<BenchmarkResult>,
    missing: Vec<Missing>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one adapter's outcome for one size.
    ///
    /// An absent decode is recorded as [`Missing`] so renderers can tell it
    /// apart from a decode that was measured.
    pub fn push(&mut self, run: SizeRun) {
        let SizeRun { encode, decode } = run;
        match decode {
            Some(decode) => {
                self.results.push(encode);
                self.results.push(decode);
            }
            None => {
                self.missing.push(Missing {
                    implementation: encode.implementation(),
                    image_size: encode.image_size(),
                    operation: Operation::Decode,
                });
                self.results.push(encode);
            }
        }
    }

    /// Append a single result.
    pub fn push_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Results that were explicitly unavailable.
    pub fn missing(&self) -> &[Missing] {
        &self.missing
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Look up the result for one triple.
    pub fn get(
        &self,
        implementation: Implementation,
        image_size: u32,
        operation: Operation,
    ) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| {
            r.implementation == implementation
                && r.image_size == image_size
                && r.operation == operation
        })
    }

    /// Whether `implementation` was run at `image_size` but could not perform
    /// `operation`.
    pub fn is_unavailable(
        &self,
        implementation: Implementation,
        image_size: u32,
        operation: Operation,
    ) -> bool {
        self.missing.iter().any(|m| {
            m.implementation == implementation
                && m.image_size == image_size
                && m.operation == operation
        })
    }

    /// Results for one implementation and operation, ascending by size.
    pub fn filter(
        &self,
        implementation: Implementation,
        operation: Operation,
    ) -> Vec<&BenchmarkResult> {
        let mut out: Vec<&BenchmarkResult> = self
            .results
            .iter()
            .filter(|r| r.implementation == implementation && r.operation == operation)
            .collect();
        out.sort_by_key(|r| r.image_size);
        out
    }

    /// Distinct image sizes seen, ascending.
    pub fn sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self
            .results
            .iter()
            .map(|r| r.image_size)
            .chain(self.missing.iter().map(|m| m.image_size))
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}
