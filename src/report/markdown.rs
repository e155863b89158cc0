//! Markdown comparison report.

use std::fmt::Write;

use super::{ms, size_label, ReportMeta};
use crate::analysis::{Analysis, Verdict, ACCEPTABLE_RELATIVE_SPEED};
use crate::result::{BenchmarkResult, Implementation, Operation, ResultSet};

/// Render the full comparison document.
pub fn render(results: &ResultSet, analysis: &Analysis, meta: &ReportMeta) -> String {
    let labels = &meta.labels;
    let mut lines = vec![
        format!(
            "# {} vs {} Performance Comparison",
            labels.candidate, labels.reference
        ),
        String::new(),
        format!("**Generated**: {}", meta.generated_at),
        String::new(),
    ];

    for operation in Operation::ALL {
        render_table(&mut lines, results, analysis, meta, operation);
    }

    if let Some(scaling) = &analysis.scalability {
        lines.push("## Scalability".into());
        lines.push(String::new());
        lines.push(format!(
            "- {} encode, {} → {}: {:.2}x pixels, {:.2}x time, scaling factor {:.2} ({})",
            labels.candidate,
            size_label(scaling.first_size),
            size_label(scaling.last_size),
            scaling.pixel_ratio,
            scaling.time_ratio,
            scaling.scaling_factor,
            scaling.band
        ));
        lines.push(String::new());
    }

    lines.push("## Summary".into());
    lines.push(String::new());
    for operation in Operation::ALL {
        render_summary(&mut lines, results, analysis, meta, operation);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_table(
    lines: &mut Vec<String>,
    results: &ResultSet,
    analysis: &Analysis,
    meta: &ReportMeta,
    operation: Operation,
) {
    let with_size = operation == Operation::Encode;
    let title = match operation {
        Operation::Encode => "## Encoding Performance",
        Operation::Decode => "## Decoding Performance",
    };
    lines.push(title.into());
    lines.push(String::new());

    let mut header = String::from(
        "| Image Size | Implementation | Avg (ms) | Median (ms) | Min (ms) | Max (ms) | Throughput (MP/s) |",
    );
    let mut rule = String::from("|------------|----------------|----------|-------------|----------|----------|-------------------|");
    if with_size {
        header.push_str(" Compressed Size (KB) |");
        rule.push_str("----------------------|");
    }
    let _ = write!(header, " vs {} |", meta.labels.reference);
    rule.push_str("-------------|");
    lines.push(header);
    lines.push(rule);

    for size in results.sizes() {
        // Candidate rows come first within a size.
        for implementation in [Implementation::Candidate, Implementation::Reference] {
            let name = meta.labels.name(implementation);
            match results.get(implementation, size, operation) {
                Some(r) => {
                    let relative = match implementation {
                        Implementation::Reference => "100.0%".to_string(),
                        Implementation::Candidate => analysis
                            .relative_speed(size, operation)
                            .map(|p| format!("{p:.1}%"))
                            .unwrap_or_else(|| "N/A".into()),
                    };
                    lines.push(result_row(r, name, with_size, &relative));
                }
                None if results.is_unavailable(implementation, size, operation) => {
                    lines.push(unavailable_row(size, name, with_size));
                }
                None => {}
            }
        }
    }
    lines.push(String::new());
}

fn result_row(r: &BenchmarkResult, name: &str, with_size: bool, relative: &str) -> String {
    let s = r.summary();
    let mut row = format!(
        "| {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.2} |",
        size_label(r.image_size()),
        name,
        ms(s.average),
        ms(s.median),
        ms(s.min),
        ms(s.max),
        s.throughput
    );
    if with_size {
        let kb = r
            .compressed_size()
            .filter(|&b| b > 0)
            .map(|b| format!("{:.1}", b as f64 / 1024.0))
            .unwrap_or_else(|| "N/A".into());
        let _ = write!(row, " {kb} |");
    }
    let _ = write!(row, " {relative} |");
    row
}

fn unavailable_row(size: u32, name: &str, with_size: bool) -> String {
    let blanks = if with_size { 6 } else { 5 };
    let mut row = format!("| {} | {} | unavailable |", size_label(size), name);
    for _ in 0..blanks {
        row.push_str(" - |");
    }
    row
}

fn render_summary(
    lines: &mut Vec<String>,
    results: &ResultSet,
    analysis: &Analysis,
    meta: &ReportMeta,
    operation: Operation,
) {
    let labels = &meta.labels;
    let heading = match operation {
        Operation::Encode => "Encoding",
        Operation::Decode => "Decoding",
    };

    match analysis.overall(operation) {
        Some(overall) => {
            let status = match overall.verdict {
                Verdict::Pass => "✅ PASS",
                Verdict::Fail => "❌ FAIL",
            };
            lines.push(format!(
                "- **{heading}**: {} is {:.1}% of {} speed",
                labels.candidate, overall.relative_speed, labels.reference
            ));
            lines.push(format!(
                "  - Target: ≥{ACCEPTABLE_RELATIVE_SPEED:.0}% (within {ACCEPTABLE_RELATIVE_SPEED:.0}% of {})",
                labels.reference
            ));
            lines.push(format!("  - Status: {status}"));
        }
        None if operation == Operation::Decode
            && !results.is_empty()
            && !analysis.profile.decode_benchmarked =>
        {
            lines.push(format!("- **{heading}**: not benchmarked (encode-only sweep)"));
        }
        None if results
            .filter(Implementation::Candidate, operation)
            .is_empty() =>
        {
            lines.push(format!(
                "- **{heading}**: {} {} unavailable, no benchmark recorded",
                labels.candidate,
                match operation {
                    Operation::Encode => "encoder",
                    Operation::Decode => "decoder",
                }
            ));
        }
        None => {
            lines.push(format!(
                "- **{heading}**: no {} results to compare against",
                labels.reference
            ));
        }
    }

    let unavailable: Vec<String> = results
        .missing()
        .iter()
        .filter(|m| m.implementation == Implementation::Candidate && m.operation == operation)
        .map(|m| size_label(m.image_size))
        .collect();
    if !unavailable.is_empty() {
        lines.push(format!(
            "  - Unavailable at: {} (partial results)",
            unavailable.join(", ")
        ));
    }
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Labels, ProfileConfig};
    use crate::result::SizeRun;

    fn meta() -> ReportMeta {
        ReportMeta {
            labels: Labels {
                reference: "OpenJPEG".into(),
                candidate: "J2KSwift".into(),
            },
            generated_at: "2024-01-01 00:00:00".into(),
        }
    }

    fn result(imp: Implementation, size: u32, op: Operation, secs: f64) -> BenchmarkResult {
        BenchmarkResult::with_timings(imp, size, op, vec![secs])
    }

    #[test]
    fn test_rows_order_and_relative_column() {
        let mut set = ResultSet::new();
        set.push(SizeRun {
            encode: result(Implementation::Reference, 512, Operation::Encode, 0.2),
            decode: Some(result(Implementation::Reference, 512, Operation::Decode, 0.1)),
        });
        set.push(SizeRun {
            encode: result(Implementation::Candidate, 256, Operation::Encode, 0.12)
                .compressed(Some(2048)),
            decode: None,
        });
        set.push(SizeRun {
            encode: result(Implementation::Reference, 256, Operation::Encode, 0.1),
            decode: Some(result(Implementation::Reference, 256, Operation::Decode, 0.05)),
        });
        let analysis = Analysis::new(&set, &ProfileConfig::default());
        let md = render(&set, &analysis, &meta());

        assert!(md.starts_with("# J2KSwift vs OpenJPEG Performance Comparison"));
        assert!(md.contains(
            "| 256×256 | J2KSwift | 120.0 | 120.0 | 120.0 | 120.0 | 0.55 | 2.0 | 83.3% |"
        ));
        assert!(md.contains("| 256×256 | OpenJPEG | 100.0 | 100.0 | 100.0 | 100.0 | 0.66 | N/A | 100.0% |"));
        assert!(md.contains("| 256×256 | J2KSwift | unavailable | - | - | - | - | - |"));

        let cand = md.find("| 256×256 | J2KSwift | 120.0").unwrap();
        let refr = md.find("| 256×256 | OpenJPEG | 100.0").unwrap();
        let big = md.find("| 512×512 | OpenJPEG | 200.0").unwrap();
        assert!(cand < refr && refr < big);

        assert!(md.contains("J2KSwift decoder unavailable"));
        assert!(md.contains("Unavailable at: 256×256"));
    }

    #[test]
    fn test_zero_compressed_size_is_not_applicable() {
        let mut set = ResultSet::new();
        set.push_result(
            result(Implementation::Candidate, 256, Operation::Encode, 0.12).compressed(Some(0)),
        );
        let analysis = Analysis::new(&set, &ProfileConfig::default());
        let md = render(&set, &analysis, &meta());

        assert!(md.contains("| 256×256 | J2KSwift | 120.0 | 120.0 | 120.0 | 120.0 | 0.55 | N/A | N/A |"));
        assert!(md.contains("- **Decoding**: not benchmarked (encode-only sweep)"));
    }
}
