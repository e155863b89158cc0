//! Flat CSV export, one row per result in measurement order.

use std::fmt::Write;

use super::ms;
use crate::result::ResultSet;

/// Column header line.
pub const HEADER: &str = "ImageSize,Implementation,Operation,AvgTime(ms),MedianTime(ms),\
MinTime(ms),MaxTime(ms),StdDev(ms),Throughput(MP/s),CompressedSize(bytes)";

/// Render every result as CSV. Unknown compressed sizes are left empty.
pub fn render(results: &ResultSet) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for r in results.results() {
        let s = r.summary();
        let compressed = r
            .compressed_size()
            .map(|b| b.to_string())
            .unwrap_or_default();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{}",
            r.image_size(),
            r.implementation(),
            r.operation(),
            ms(s.average),
            ms(s.median),
            ms(s.min),
            ms(s.max),
            ms(s.std_dev),
            s.throughput,
            compressed
        );
    }
    out
}
