//! Harness configuration.
//!
//! Everything here has a built-in default; a TOML file passed with
//! `--config` only needs the keys it wants to change:
//!
//! ```toml
//! [labels]
//! reference = "OpenJPEG"
//! candidate = "J2KSwift"
//!
//! [reference]
//! encoder = "/opt/openjpeg/bin/opj_compress"
//!
//! [profile]
//! target_throughput_mpps = 5.0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::result::Implementation;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub labels: Labels,
    pub reference: ReferenceConfig,
    pub candidate: CandidateConfig,
    pub build: BuildConfig,
    pub profile: ProfileConfig,
}

impl Config {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&text).map_err(|reason| Error::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

/// Display names used in human-readable reports.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Labels {
    pub reference: String,
    pub candidate: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            reference: "reference".into(),
            candidate: "candidate".into(),
        }
    }
}

impl Labels {
    /// Display name of an implementation.
    pub fn name(&self, implementation: Implementation) -> &str {
        match implementation {
            Implementation::Reference => &self.reference,
            Implementation::Candidate => &self.candidate,
        }
    }
}

/// The reference codec's two commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceConfig {
    pub encoder: String,
    pub decoder: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            encoder: "opj_compress".into(),
            decoder: "opj_decompress".into(),
        }
    }
}

/// Where to look for the candidate tool when no explicit path is given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CandidateConfig {
    pub search_paths: Vec<PathBuf>,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![
                PathBuf::from("target/release/j2k"),
                PathBuf::from("target/debug/j2k"),
                PathBuf::from(".build/release/j2k"),
                PathBuf::from(".build/debug/j2k"),
            ],
        }
    }
}

impl CandidateConfig {
    /// First search path that exists.
    pub fn locate(&self) -> Result<PathBuf> {
        self.search_paths
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| {
                let tried: Vec<String> = self
                    .search_paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect();
                Error::Setup(format!(
                    "candidate tool not found (tried {})",
                    tried.join(", ")
                ))
            })
    }
}

/// Command that builds the candidate before a profiling sweep.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Program followed by its arguments. Empty disables the build step.
    pub command: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: vec!["cargo".into(), "build".into(), "--release".into()],
        }
    }
}

/// Thresholds and advisory text for the narrative profile report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Throughput the candidate is measured against (MP/s).
    pub target_throughput_mpps: f64,
    /// Below this average throughput the entropy-stage advice is shown.
    pub low_throughput_mpps: f64,
    /// Below this average compression ratio the rate-control advice is shown.
    pub low_compression_ratio: f64,
    pub entropy_recommendations: Vec<String>,
    pub rate_control_recommendations: Vec<String>,
    pub general_recommendations: Vec<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            target_throughput_mpps: 4.0,
            low_throughput_mpps: 2.0,
            low_compression_ratio: 2.0,
            entropy_recommendations: strings(&[
                "Profile the entropy coding stage (MQ-coder), the likely bottleneck",
                "Optimize the wavelet transform and check for unnecessary allocations",
                "Review the quantization step for efficient memory access",
            ]),
            rate_control_recommendations: strings(&[
                "Review rate control parameters",
                "Check quantization step sizes",
                "Verify entropy coding is functioning correctly",
            ]),
            general_recommendations: strings(&[
                "Inline hot-path functions",
                "Pre-allocate buffers to avoid repeated allocations",
                "Consider SIMD for data-parallel stages",
                "Profile with a sampling profiler to find specific hot spots",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = Config::from_toml(
            r#"
            [labels]
            candidate = "J2KSwift"

            [profile]
            target_throughput_mpps = 5.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.labels.candidate, "J2KSwift");
        assert_eq!(cfg.labels.reference, "reference");
        assert_eq!(cfg.profile.target_throughput_mpps, 5.5);
        assert_eq!(cfg.profile.low_throughput_mpps, 2.0);
        assert_eq!(cfg.reference.encoder, "opj_compress");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("[profile]\nbogus = 1\n").is_err());
    }

    #[test]
    fn test_locate_reports_tried_paths() {
        let cfg = CandidateConfig {
            search_paths: vec![PathBuf::from("/nonexistent/j2k")],
        };
        let err = cfg.locate().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/j2k"));
    }
}
