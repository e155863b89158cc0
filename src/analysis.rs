//! Cross-implementation comparison and scaling analysis.
//!
//! Everything here is derived from a [`ResultSet`]; the report renderers only
//! format what [`Analysis::new`] computes.

use std::fmt;

use crate::config::ProfileConfig;
use crate::result::{BenchmarkResult, Implementation, Operation, ResultSet};
use crate::stats;

/// Candidate speed (as % of reference) at or above which it is acceptable.
pub const ACCEPTABLE_RELATIVE_SPEED: f64 = 80.0;

/// Pass/fail against [`ACCEPTABLE_RELATIVE_SPEED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_relative_speed(percent: f64) -> Self {
        if percent >= ACCEPTABLE_RELATIVE_SPEED {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

/// Reference average / candidate average × 100.
///
/// `None` when the candidate average is not positive.
pub fn relative_speed(reference_avg: f64, candidate_avg: f64) -> Option<f64> {
    (candidate_avg > 0.0).then(|| reference_avg / candidate_avg * 100.0)
}

/// Relative speed of the candidate at one size and operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRecord {
    pub image_size: u32,
    pub operation: Operation,
    /// `None` means "not applicable": no reference result, or a zero
    /// candidate average.
    pub relative_speed: Option<f64>,
}

impl ComparisonRecord {
    pub fn verdict(&self) -> Option<Verdict> {
        self.relative_speed.map(Verdict::from_relative_speed)
    }
}

/// One record per candidate result.
pub fn compare(results: &ResultSet) -> Vec<ComparisonRecord> {
    let mut records = Vec::new();
    for operation in Operation::ALL {
        for candidate in results.filter(Implementation::Candidate, operation) {
            let size = candidate.image_size();
            let relative = results
                .get(Implementation::Reference, size, operation)
                .and_then(|reference| relative_speed(reference.average(), candidate.average()));
            records.push(ComparisonRecord {
                image_size: size,
                operation,
                relative_speed: relative,
            });
        }
    }
    records
}

/// Candidate speed for one operation averaged over every size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallComparison {
    pub operation: Operation,
    pub relative_speed: f64,
    pub verdict: Verdict,
}

/// Mean reference average over mean candidate average, per operation.
///
/// `None` when either implementation has no results for `operation`.
pub fn overall(results: &ResultSet, operation: Operation) -> Option<OverallComparison> {
    let mean_average = |imp| {
        let averages: Vec<f64> = results
            .filter(imp, operation)
            .iter()
            .map(|r| r.average())
            .collect();
        (!averages.is_empty()).then(|| stats::mean(&averages))
    };
    let candidate = mean_average(Implementation::Candidate)?;
    let reference = mean_average(Implementation::Reference)?;
    let percent = relative_speed(reference, candidate)?;
    Some(OverallComparison {
        operation,
        relative_speed: percent,
        verdict: Verdict::from_relative_speed(percent),
    })
}

/// How alarming a scaling band is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Notable,
    Good,
    Warning,
    Failure,
}

/// Classification of a scaling factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScalingBand {
    /// `[0, 0.9)`: time grows slower than pixel count.
    SuperLinear,
    /// `[0.9, 1.1)`
    Linear,
    /// `[1.1, 1.5)`: some per-pixel overhead grows with size.
    SubLinear,
    /// `[1.5, ∞)`
    Poor,
}

impl ScalingBand {
    /// Band for a scaling factor; lower bounds are inclusive.
    pub fn classify(scaling_factor: f64) -> Self {
        if scaling_factor < 0.9 {
            ScalingBand::SuperLinear
        } else if scaling_factor < 1.1 {
            ScalingBand::Linear
        } else if scaling_factor < 1.5 {
            ScalingBand::SubLinear
        } else {
            ScalingBand::Poor
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            ScalingBand::SuperLinear => Severity::Notable,
            ScalingBand::Linear => Severity::Good,
            ScalingBand::SubLinear => Severity::Warning,
            ScalingBand::Poor => Severity::Failure,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScalingBand::SuperLinear => "Performance improves with larger images",
            ScalingBand::Linear => "Good performance characteristics",
            ScalingBand::SubLinear => "Some overhead present",
            ScalingBand::Poor => "Significant bottlenecks present",
        }
    }
}

impl fmt::Display for ScalingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScalingBand::SuperLinear => "Super-linear scaling",
            ScalingBand::Linear => "Linear scaling",
            ScalingBand::SubLinear => "Sub-linear scaling",
            ScalingBand::Poor => "Poor scaling",
        })
    }
}

/// Growth in time versus growth in pixels between the smallest and largest
/// sizes benchmarked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalabilityRecord {
    pub first_size: u32,
    pub last_size: u32,
    pub pixel_ratio: f64,
    pub time_ratio: f64,
    pub scaling_factor: f64,
    pub band: ScalingBand,
}

impl ScalabilityRecord {
    pub fn from_ratios(first_size: u32, last_size: u32, pixel_ratio: f64, time_ratio: f64) -> Self {
        let scaling_factor = time_ratio / pixel_ratio;
        Self {
            first_size,
            last_size,
            pixel_ratio,
            time_ratio,
            scaling_factor,
            band: ScalingBand::classify(scaling_factor),
        }
    }

    /// Compare two results of the same implementation and operation.
    ///
    /// `None` when the sizes are equal or the first average is zero.
    pub fn between(first: &BenchmarkResult, last: &BenchmarkResult) -> Option<Self> {
        if first.image_size() == last.image_size() || first.average() <= 0.0 {
            return None;
        }
        let pixel_ratio = last.pixels() as f64 / first.pixels() as f64;
        let time_ratio = last.average() / first.average();
        Some(Self::from_ratios(
            first.image_size(),
            last.image_size(),
            pixel_ratio,
            time_ratio,
        ))
    }
}

/// Scaling of the candidate's encoder across the sweep.
///
/// Skipped (`None`) with fewer than two distinct sizes.
pub fn scalability(results: &ResultSet) -> Option<ScalabilityRecord> {
    let encodes = results.filter(Implementation::Candidate, Operation::Encode);
    let first = encodes.first()?;
    let last = encodes.last()?;
    ScalabilityRecord::between(first, last)
}

/// Candidate throughput relative to the configured target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// At least 80% of target.
    Met,
    /// At least 50% of target.
    Approaching,
    Below,
}

impl TargetStatus {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 80.0 {
            TargetStatus::Met
        } else if percent >= 50.0 {
            TargetStatus::Approaching
        } else {
            TargetStatus::Below
        }
    }
}

/// A titled group of advisory strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: &'static str,
    pub items: Vec<String>,
}

/// Aggregate figures for the narrative profile report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    /// Mean candidate encode throughput over all sizes (MP/s).
    pub average_throughput: f64,
    /// Mean candidate compression ratio over all sizes; sizes without a
    /// reported compressed size count as zero.
    pub average_compression_ratio: f64,
    pub target_throughput: f64,
    pub target_percent: f64,
    pub target_status: TargetStatus,
    pub recommendations: Vec<Recommendation>,
    /// Sizes at which the candidate ran but could not decode.
    pub decode_unavailable: Vec<u32>,
    /// False for an encode-only sweep.
    pub decode_benchmarked: bool,
}

impl ProfileSummary {
    pub fn new(results: &ResultSet, config: &ProfileConfig) -> Self {
        let encodes = results.filter(Implementation::Candidate, Operation::Encode);
        let throughputs: Vec<f64> = encodes.iter().map(|r| r.throughput()).collect();
        let ratios: Vec<f64> = encodes
            .iter()
            .map(|r| r.compression_ratio().unwrap_or(0.0))
            .collect();
        let average_throughput = stats::mean(&throughputs);
        let average_compression_ratio = stats::mean(&ratios);

        let target_percent = if config.target_throughput_mpps > 0.0 {
            average_throughput / config.target_throughput_mpps * 100.0
        } else {
            0.0
        };

        let mut recommendations = Vec::new();
        if average_throughput < config.low_throughput_mpps {
            recommendations.push(Recommendation {
                title: "High Priority",
                items: config.entropy_recommendations.clone(),
            });
        }
        if average_compression_ratio < config.low_compression_ratio {
            recommendations.push(Recommendation {
                title: "Compression Efficiency",
                items: config.rate_control_recommendations.clone(),
            });
        }
        recommendations.push(Recommendation {
            title: "General Optimizations",
            items: config.general_recommendations.clone(),
        });

        let decode_unavailable = results
            .missing()
            .iter()
            .filter(|m| {
                m.implementation == Implementation::Candidate && m.operation == Operation::Decode
            })
            .map(|m| m.image_size)
            .collect::<Vec<_>>();
        let decode_benchmarked = !decode_unavailable.is_empty()
            || !results
                .filter(Implementation::Candidate, Operation::Decode)
                .is_empty();

        Self {
            average_throughput,
            average_compression_ratio,
            target_throughput: config.target_throughput_mpps,
            target_percent,
            target_status: TargetStatus::from_percent(target_percent),
            recommendations,
            decode_unavailable,
            decode_benchmarked,
        }
    }
}

/// Everything the renderers need beyond the raw results.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub comparisons: Vec<ComparisonRecord>,
    pub overall_encode: Option<OverallComparison>,
    pub overall_decode: Option<OverallComparison>,
    pub scalability: Option<ScalabilityRecord>,
    pub profile: ProfileSummary,
}

impl Analysis {
    pub fn new(results: &ResultSet, profile: &ProfileConfig) -> Self {
        Self {
            comparisons: compare(results),
            overall_encode: overall(results, Operation::Encode),
            overall_decode: overall(results, Operation::Decode),
            scalability: scalability(results),
            profile: ProfileSummary::new(results, profile),
        }
    }

    /// Relative speed for one size and operation, if applicable.
    pub fn relative_speed(&self, image_size: u32, operation: Operation) -> Option<f64> {
        self.comparisons
            .iter()
            .find(|c| c.image_size == image_size && c.operation == operation)
            .and_then(|c| c.relative_speed)
    }

    pub fn overall(&self, operation: Operation) -> Option<&OverallComparison> {
        match operation {
            Operation::Encode => self.overall_encode.as_ref(),
            Operation::Decode => self.overall_decode.as_ref(),
        }
    }
}
