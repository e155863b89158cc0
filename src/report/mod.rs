//! Report rendering.
//!
//! Three views of the same data:
//!
//! - [`markdown`]: grouped comparison tables for humans.
//! - [`csv`]: one flat row per result for spreadsheets and scripts.
//! - [`profile`]: narrative encoder profile with scaling and advice.
//!
//! Renderers only format; every number comes from [`ResultSet`] accessors or
//! the [`Analysis`].

pub mod csv;
pub mod markdown;
pub mod profile;

use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::config::{Labels, ProfileConfig};
use crate::error::{Error, Result};
use crate::result::ResultSet;

/// File name of the markdown comparison.
pub const MARKDOWN_FILE: &str = "performance_comparison.md";
/// File name of the flat CSV export.
pub const CSV_FILE: &str = "performance_data.csv";
/// File name of the narrative profile.
pub const PROFILE_FILE: &str = "profile_report.txt";

/// Presentation details shared by the human-readable renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
    pub labels: Labels,
    pub generated_at: String,
}

impl ReportMeta {
    /// Stamp with the current local time.
    pub fn now(labels: Labels) -> Self {
        Self {
            labels,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Which reports to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Markdown,
    Csv,
    Profile,
}

/// Render the requested reports into `dir`, returning the written paths.
pub fn write_reports(
    dir: &Path,
    kinds: &[ReportKind],
    results: &ResultSet,
    analysis: &Analysis,
    meta: &ReportMeta,
    profile_config: &ProfileConfig,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut written = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let (name, body) = match kind {
            ReportKind::Markdown => (MARKDOWN_FILE, markdown::render(results, analysis, meta)),
            ReportKind::Csv => (CSV_FILE, csv::render(results)),
            ReportKind::Profile => (
                PROFILE_FILE,
                profile::render(results, analysis, meta, profile_config),
            ),
        };
        let path = dir.join(name);
        fs::write(&path, body).map_err(|e| Error::io(&path, e))?;
        tracing::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Seconds to milliseconds.
pub(crate) fn ms(secs: f64) -> f64 {
    secs * 1000.0
}

/// `256×256`
pub(crate) fn size_label(size: u32) -> String {
    format!("{size}×{size}")
}
