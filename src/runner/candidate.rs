//! Candidate codec adapter.
//!
//! The candidate repeats trials itself: one `benchmark` invocation per size
//! writes a JSON document with per-run timings, which is then parsed into
//! results.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::result::{BenchmarkResult, Implementation, Operation, SizeRun};

use super::document::BenchmarkDocument;
use super::process::Invocation;
use super::Runner;

/// Which operations to ask the candidate for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateMode {
    /// Encode and decode, retrying encode-only if the combined run fails.
    Full,
    /// Encode only (profiling).
    EncodeOnly,
}

/// Runs `<tool> benchmark -i <pgm> -r <runs> -o <json> [--preset P] [--encode-only]`.
#[derive(Debug, Clone)]
pub struct CandidateRunner {
    tool: PathBuf,
    work_dir: PathBuf,
    mode: CandidateMode,
    preset: Option<String>,
}

impl CandidateRunner {
    pub fn new(tool: impl Into<PathBuf>, work_dir: impl Into<PathBuf>, mode: CandidateMode) -> Self {
        Self {
            tool: tool.into(),
            work_dir: work_dir.into(),
            mode,
            preset: None,
        }
    }

    /// Pass `--preset <preset>` to every invocation.
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Where the document for `size` is written.
    pub fn document_path(&self, size: u32) -> PathBuf {
        match &self.preset {
            Some(preset) => self
                .work_dir
                .join(format!("profile_test_{size}x{size}_{preset}.json")),
            None => self.work_dir.join(format!("test_{size}x{size}.json")),
        }
    }

    fn invocation(&self, input: &Path, runs: u32, document: &Path, encode_only: bool) -> Invocation {
        let mut inv = Invocation::new(&self.tool)
            .arg("benchmark")
            .arg("-i")
            .arg(input)
            .arg("-r")
            .arg(runs.to_string())
            .arg("-o")
            .arg(document);
        if let Some(preset) = &self.preset {
            inv = inv.arg("--preset").arg(preset);
        }
        if encode_only {
            inv = inv.arg("--encode-only");
        }
        inv
    }

    /// Invoke the tool, falling back to encode-only in [`CandidateMode::Full`].
    fn invoke(&self, input: &Path, runs: u32, document: &Path) -> Result<()> {
        if self.mode == CandidateMode::Full {
            clear_document(document)?;
            let combined = self.invocation(input, runs, document, false);
            let out = combined.run_captured()?;
            if out.status.success() {
                return Ok(());
            }
            tracing::warn!(
                "Full benchmark failed ({}), trying encode-only...",
                out.status
            );
            if !out.stderr.is_empty() {
                tracing::debug!("candidate stderr: {}", out.stderr);
            }
        }

        clear_document(document)?;
        let encode_only = self.invocation(input, runs, document, true);
        let out = encode_only.run_captured()?;
        if out.status.success() {
            return Ok(());
        }
        if !out.stderr.is_empty() {
            tracing::debug!("candidate stderr: {}", out.stderr);
        }
        Err(match self.mode {
            CandidateMode::Full => Error::ExecutionFailed(format!(
                "candidate benchmark failed even with encode-only ({})",
                out.status
            )),
            CandidateMode::EncodeOnly => Error::Execution {
                command: encode_only.command_line(),
                status: out.status,
            },
        })
    }
}

impl Runner for CandidateRunner {
    fn implementation(&self) -> Implementation {
        Implementation::Candidate
    }

    fn measures_decode(&self) -> bool {
        self.mode == CandidateMode::Full
    }

    fn run(&self, input: &Path, size: u32, runs: u32) -> Result<SizeRun> {
        tracing::info!("  Running {} benchmark...", self.implementation());
        let document = self.document_path(size);
        self.invoke(input, runs, &document)?;

        let doc = BenchmarkDocument::load(&document)?;
        results_from_document(&doc, size)
            .map_err(|reason| Error::Parse {
                path: document,
                reason,
            })
    }
}

/// Remove a document left by an earlier invocation so only what the tool
/// writes now is read back.
fn clear_document(document: &Path) -> Result<()> {
    match fs::remove_file(document) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(document, e)),
    }
}

/// Turn a parsed document into encode/decode results.
///
/// The image size recorded is the one the tool reports.
pub fn results_from_document(
    doc: &BenchmarkDocument,
    requested_size: u32,
) -> std::result::Result<SizeRun, String> {
    let size = doc.image.width;
    if size != requested_size {
        tracing::warn!(
            "candidate reported width {} for a {}×{} input",
            size,
            requested_size,
            requested_size
        );
    }
    if doc.encode.runs.is_empty() {
        return Err("encode.runs is empty".into());
    }

    let encode = BenchmarkResult::with_timings(
        Implementation::Candidate,
        size,
        Operation::Encode,
        doc.encode_secs(),
    )
    .compressed(doc.encode.compressed_size);

    let decode = doc.decode_secs().map(|secs| {
        BenchmarkResult::with_timings(Implementation::Candidate, size, Operation::Decode, secs)
    });

    Ok(SizeRun { encode, decode })
}
