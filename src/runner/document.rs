//! The candidate tool's structured benchmark document.
//!
//! ```json
//! {
//!   "image":  { "width": 512, "height": 512 },
//!   "encode": { "runs": [12.1, 11.8], "average_ms": 11.95,
//!               "throughput_mpps": 21.9, "compressed_size": 40213 },
//!   "decode": { "runs": [9.0, 9.2] }
//! }
//! ```
//!
//! Times are milliseconds. `decode` is omitted when the tool could not
//! decode; that is not a parse failure.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkDocument {
    pub image: ImageInfo,
    pub encode: EncodeSection,
    #[serde(default)]
    pub decode: Option<DecodeSection>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EncodeSection {
    /// Per-run encode time in milliseconds.
    pub runs: Vec<f64>,
    #[serde(default)]
    pub average_ms: Option<f64>,
    #[serde(default)]
    pub throughput_mpps: Option<f64>,
    #[serde(default)]
    pub compressed_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecodeSection {
    /// Per-run decode time in milliseconds.
    pub runs: Vec<f64>,
}

impl BenchmarkDocument {
    /// Read and validate a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| parse_error(path, e.to_string()))?;
        Self::parse(&text).map_err(|reason| parse_error(path, reason))
    }

    /// Parse and validate document text.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let doc: BenchmarkDocument = serde_json::from_str(text).map_err(|e| e.to_string())?;
        if doc.image.width == 0 {
            return Err("image.width must be positive".into());
        }
        validate_runs("encode.runs", &doc.encode.runs)?;
        if let Some(decode) = &doc.decode {
            validate_runs("decode.runs", &decode.runs)?;
        }
        Ok(doc)
    }

    /// Encode timings converted to seconds.
    pub fn encode_secs(&self) -> Vec<f64> {
        ms_to_secs(&self.encode.runs)
    }

    /// Decode timings converted to seconds, if decode was measured.
    pub fn decode_secs(&self) -> Option<Vec<f64>> {
        self.decode.as_ref().map(|d| ms_to_secs(&d.runs))
    }
}

fn validate_runs(field: &str, runs: &[f64]) -> std::result::Result<(), String> {
    match runs.iter().position(|t| !t.is_finite() || *t < 0.0) {
        Some(i) => Err(format!("{field}[{i}] is not a non-negative time")),
        None => Ok(()),
    }
}

fn ms_to_secs(runs: &[f64]) -> Vec<f64> {
    runs.iter().map(|ms| ms / 1000.0).collect()
}

fn parse_error(path: &Path, reason: String) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        reason,
    }
}
