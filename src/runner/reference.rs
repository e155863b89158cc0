//! Reference codec adapter: separate encoder and decoder commands, one
//! process per trial, timed by the harness.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::result::{BenchmarkResult, Implementation, Operation, SizeRun};

use super::process::Invocation;
use super::Runner;

/// Runs `<encoder> -i <pgm> -o <j2k>` and `<decoder> -i <j2k> -o <pgm>`.
#[derive(Debug, Clone)]
pub struct ReferenceRunner {
    encoder: PathBuf,
    decoder: PathBuf,
    work_dir: PathBuf,
}

impl ReferenceRunner {
    /// `work_dir` receives the per-size artifacts, overwritten every trial.
    pub fn new(
        encoder: impl Into<PathBuf>,
        decoder: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            encoder: encoder.into(),
            decoder: decoder.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Compressed artifact path for a size.
    pub fn encoded_path(&self, size: u32) -> PathBuf {
        self.work_dir.join(format!("test_{size}x{size}.j2k"))
    }

    /// Decoded artifact path for a size.
    pub fn decoded_path(&self, size: u32) -> PathBuf {
        self.work_dir.join(format!("test_{size}x{size}_decoded.pgm"))
    }

    fn time_trials(
        &self,
        program: &Path,
        input: &Path,
        output: &Path,
        result: &mut BenchmarkResult,
        runs: u32,
    ) -> Result<()> {
        let invocation = Invocation::new(program)
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output);

        for trial in 0..runs {
            let elapsed = invocation.run_timed()?;
            tracing::debug!(
                "{} trial {}/{}: {:.3} ms",
                result.operation(),
                trial + 1,
                runs,
                elapsed.as_secs_f64() * 1000.0
            );
            result.record(elapsed.as_secs_f64());
        }
        Ok(())
    }
}

impl Runner for ReferenceRunner {
    fn implementation(&self) -> Implementation {
        Implementation::Reference
    }

    fn run(&self, input: &Path, size: u32, runs: u32) -> Result<SizeRun> {
        let encoded = self.encoded_path(size);
        let decoded = self.decoded_path(size);

        tracing::info!("  Running {} encode benchmark...", self.implementation());
        let mut encode = BenchmarkResult::new(Implementation::Reference, size, Operation::Encode);
        self.time_trials(&self.encoder, input, &encoded, &mut encode, runs)?;
        encode.set_compressed_size(file_size(&encoded));

        tracing::info!("  Running {} decode benchmark...", self.implementation());
        let mut decode = BenchmarkResult::new(Implementation::Reference, size, Operation::Decode);
        self.time_trials(&self.decoder, &encoded, &decoded, &mut decode, runs)?;

        Ok(SizeRun {
            encode,
            decode: Some(decode),
        })
    }
}

/// Byte length of `path`, or `None` when it does not exist.
fn file_size(path: &Path) -> Option<u64> {
    if !path.is_file() {
        return None;
    }
    fs::metadata(path).ok().map(|m| m.len())
}
