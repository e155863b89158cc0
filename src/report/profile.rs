//! Narrative encoder profile report.

use super::{ms, size_label, ReportMeta};
use crate::analysis::{Analysis, Severity, TargetStatus};
use crate::config::ProfileConfig;
use crate::result::{Implementation, Operation, ResultSet};

const RULE: &str =
    "================================================================================";

/// Render the plain-text profile of the candidate encoder.
pub fn render(
    results: &ResultSet,
    analysis: &Analysis,
    meta: &ReportMeta,
    config: &ProfileConfig,
) -> String {
    let candidate = &meta.labels.candidate;
    let summary = &analysis.profile;
    let mut report: Vec<String> = vec![
        RULE.into(),
        format!("{candidate} Encoder Performance Profile Report"),
        RULE.into(),
        String::new(),
        "## Encoding Performance Summary".into(),
        String::new(),
        "| Image Size  | Avg Time (ms) | Throughput (MP/s) | Compressed (KB) | Ratio |".into(),
        "|-------------|---------------|-------------------|-----------------|-------|".into(),
    ];

    for r in results.filter(Implementation::Candidate, Operation::Encode) {
        let kb = r.compressed_size().unwrap_or(0) as f64 / 1024.0;
        report.push(format!(
            "| {:11} | {:13.2} | {:17.2} | {:15.1} | {:5.2} |",
            size_label(r.image_size()),
            ms(r.average()),
            r.throughput(),
            kb,
            r.compression_ratio().unwrap_or(0.0)
        ));
    }
    report.push(String::new());

    report.push("## Performance Analysis".into());
    report.push(String::new());
    match &analysis.scalability {
        Some(scaling) => {
            let marker = match scaling.band.severity() {
                Severity::Notable | Severity::Good => "✅",
                Severity::Warning => "⚠️",
                Severity::Failure => "❌",
            };
            report.push("### Scalability Analysis".into());
            report.push(format!("- Pixel count increase: {:.2}x", scaling.pixel_ratio));
            report.push(format!("- Time increase: {:.2}x", scaling.time_ratio));
            report.push(format!(
                "- Scaling factor: {:.2} (1.0 = perfect linear scaling)",
                scaling.scaling_factor
            ));
            report.push(String::new());
            report.push(format!(
                "{marker} **{}** - {}",
                scaling.band,
                scaling.band.description()
            ));
        }
        None => {
            report.push("### Scalability Analysis".into());
            report.push("- Skipped: at least two image sizes are required".into());
        }
    }
    report.push(String::new());

    report.push("### Key Metrics".into());
    report.push(String::new());
    report.push(format!(
        "- **Average Throughput**: {:.2} MP/s",
        summary.average_throughput
    ));
    report.push(format!(
        "- **Average Compression Ratio**: {:.2}:1",
        summary.average_compression_ratio
    ));
    report.push(String::new());

    report.push("### Decode".into());
    if !summary.decode_benchmarked {
        report.push("- Decode not benchmarked (encode-only profile)".into());
    } else if summary.decode_unavailable.is_empty() {
        report.push("- Decode measured at every size".into());
    } else {
        let sizes: Vec<String> = summary
            .decode_unavailable
            .iter()
            .map(|&s| size_label(s))
            .collect();
        report.push(format!(
            "- Decode unavailable at {}; decode metrics are not included",
            sizes.join(", ")
        ));
    }
    report.push(String::new());

    report.push(format!("### Performance vs. {} Target", meta.labels.reference));
    report.push(format!(
        "- **Target Throughput**: ~{:.1} MP/s",
        config.target_throughput_mpps
    ));
    report.push(format!(
        "- **Current Performance**: {:.1}% of target",
        summary.target_percent
    ));
    report.push(String::new());
    report.push(
        match summary.target_status {
            TargetStatus::Met => "✅ **Target met!** Performance is within acceptable range.",
            TargetStatus::Approaching => "⚠️ **Approaching target** - Further optimization needed",
            TargetStatus::Below => "❌ **Below target** - Significant optimization required",
        }
        .into(),
    );
    report.push(String::new());

    report.push("## Optimization Recommendations".into());
    report.push(String::new());
    for group in &summary.recommendations {
        report.push(format!("### {}", group.title));
        for (i, item) in group.items.iter().enumerate() {
            report.push(format!("{}. {item}", i + 1));
        }
        report.push(String::new());
    }

    report.push(RULE.into());
    report.push(format!("Report generated: {}", meta.generated_at));
    report.push(RULE.into());

    let mut out = report.join("\n");
    out.push('\n');
    out
}
