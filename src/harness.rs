//! Sweep orchestration.
//!
//! A sweep walks the requested sizes in order. For each size every runner is
//! driven to completion before the next starts, so no two timed regions
//! overlap. A size's results enter the [`ResultSet`] only once every runner
//! has finished it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{relative_speed, Analysis};
use crate::config::Config;
use crate::corpus::{self, Pattern};
use crate::error::{Error, Result};
use crate::report::{self, ReportKind, ReportMeta};
use crate::result::{Implementation, Operation, ResultSet, SizeRun};
use crate::runner::process::{find_tool, Invocation};
use crate::runner::{CandidateMode, CandidateRunner, ReferenceRunner, Runner};

/// Output directory structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub test_images: PathBuf,
    pub reference: PathBuf,
    pub candidate: PathBuf,
    pub reports: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            test_images: root.join("test_images"),
            reference: root.join("reference"),
            candidate: root.join("candidate"),
            reports: root.join("reports"),
            root,
        }
    }

    /// Create the directories a sweep writes to. `reference/` is only
    /// created when the reference codec takes part.
    pub fn create(&self, with_reference: bool) -> Result<()> {
        let mut dirs = vec![&self.root, &self.test_images, &self.candidate, &self.reports];
        if with_reference {
            dirs.push(&self.reference);
        }
        for dir in dirs {
            fs::create_dir_all(dir).map_err(|e| {
                Error::Setup(format!("cannot create directory {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }
}

/// Parse a comma-separated list of positive image sizes.
///
/// Duplicates are dropped, keeping the first occurrence.
pub fn parse_sizes(list: &str) -> Result<Vec<u32>> {
    let mut sizes = Vec::new();
    for part in list.split(',') {
        let part = part.trim();
        let size: u32 = part
            .parse()
            .map_err(|_| Error::Setup(format!("invalid image size '{part}'")))?;
        if size == 0 {
            return Err(Error::Setup("image sizes must be positive".into()));
        }
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }
    Ok(sizes)
}

/// Encoding preset forwarded to the candidate when profiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    Fast,
    #[default]
    Balanced,
    Quality,
}

impl Preset {
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Fast => "fast",
            Preset::Balanced => "balanced",
            Preset::Quality => "quality",
        }
    }
}

/// Settings shared by both sweep variants.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    pub sizes: Vec<u32>,
    pub runs: u32,
    pub output_dir: PathBuf,
    /// Explicit candidate tool; searched for when `None`.
    pub candidate: Option<PathBuf>,
    pub pattern: Pattern,
    /// Log a failed size and continue instead of stopping the sweep.
    pub keep_going: bool,
}

impl SweepOptions {
    fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::Setup("no image sizes given".into()));
        }
        if self.runs == 0 {
            return Err(Error::Setup("run count must be at least 1".into()));
        }
        Ok(())
    }
}

/// Profiling-only settings.
#[derive(Debug, Clone, Default)]
pub struct ProfileOptions {
    pub preset: Preset,
    pub skip_build: bool,
}

/// Results of a sweep and where its reports went.
#[derive(Debug)]
pub struct SweepReport {
    pub results: ResultSet,
    pub analysis: Analysis,
    pub reports: Vec<PathBuf>,
    /// Sizes that failed and were skipped under `keep_going`.
    pub failed_sizes: Vec<(u32, String)>,
}

/// Benchmark the candidate against the reference and write the markdown and
/// CSV reports.
pub fn run_compare(opts: &SweepOptions, config: &Config) -> Result<SweepReport> {
    opts.validate()?;
    let layout = Layout::new(&opts.output_dir);
    let candidate_tool = resolve_candidate(opts.candidate.as_deref(), config)?;
    let encoder = resolve_reference_tool("encoder", &config.reference.encoder)?;
    let decoder = resolve_reference_tool("decoder", &config.reference.decoder)?;
    layout.create(true)?;

    tracing::info!(
        "{} vs {} Performance Comparison",
        config.labels.candidate,
        config.labels.reference
    );
    log_settings(opts, &layout);

    let runners: Vec<Box<dyn Runner>> = vec![
        Box::new(CandidateRunner::new(
            candidate_tool,
            &layout.candidate,
            CandidateMode::Full,
        )),
        Box::new(ReferenceRunner::new(encoder, decoder, &layout.reference)),
    ];

    finish(
        opts,
        config,
        &layout,
        &runners,
        &[ReportKind::Markdown, ReportKind::Csv],
    )
}

/// Profile the candidate encoder alone and write all three reports.
///
/// A failing size is logged and skipped; the sweep fails only if no size
/// produced results.
pub fn run_profile(
    opts: &SweepOptions,
    profile: &ProfileOptions,
    config: &Config,
) -> Result<SweepReport> {
    opts.validate()?;
    let layout = Layout::new(&opts.output_dir);

    if !profile.skip_build {
        build_candidate(&config.build.command)?;
    }
    let candidate_tool = resolve_candidate(opts.candidate.as_deref(), config)?;
    layout.create(false)?;

    tracing::info!(
        "Profiling {} encoder (preset '{}')",
        config.labels.candidate,
        profile.preset.as_str()
    );
    log_settings(opts, &layout);

    let runners: Vec<Box<dyn Runner>> = vec![Box::new(
        CandidateRunner::new(candidate_tool, &layout.candidate, CandidateMode::EncodeOnly)
            .with_preset(profile.preset.as_str()),
    )];

    let opts = SweepOptions {
        keep_going: true,
        ..opts.clone()
    };
    let report = finish(
        &opts,
        config,
        &layout,
        &runners,
        &[ReportKind::Markdown, ReportKind::Csv, ReportKind::Profile],
    )?;
    if report.results.is_empty() {
        return Err(Error::ExecutionFailed("no results collected".into()));
    }
    Ok(report)
}

/// Generate the corpus, sweep, then write reports for whatever completed.
fn finish(
    opts: &SweepOptions,
    config: &Config,
    layout: &Layout,
    runners: &[Box<dyn Runner>],
    kinds: &[ReportKind],
) -> Result<SweepReport> {
    tracing::info!("Generating test images...");
    let mut inputs = Vec::with_capacity(opts.sizes.len());
    for &size in &opts.sizes {
        inputs.push(corpus::generate(&layout.test_images, size, opts.pattern)?);
    }

    let mut results = ResultSet::new();
    let mut failed_sizes = Vec::new();
    let mut fatal = None;

    for entry in &inputs {
        tracing::info!("Benchmarking {}×{}...", entry.size, entry.size);
        match run_size(runners, &entry.path, entry.size, opts.runs) {
            Ok(runs) => {
                log_size(runners, &runs, entry.size);
                for (runner, run) in runners.iter().zip(runs) {
                    record(&mut results, runner.as_ref(), run);
                }
            }
            Err(err) if opts.keep_going => {
                tracing::warn!("{}×{} failed: {err}", entry.size, entry.size);
                failed_sizes.push((entry.size, err.to_string()));
            }
            Err(err) => {
                tracing::error!("{}×{} failed, stopping sweep", entry.size, entry.size);
                fatal = Some(err);
                break;
            }
        }
    }

    tracing::info!("Generating reports...");
    let analysis = Analysis::new(&results, &config.profile);
    let meta = ReportMeta::now(config.labels.clone());
    let reports = report::write_reports(
        &layout.reports,
        kinds,
        &results,
        &analysis,
        &meta,
        &config.profile,
    )?;
    for path in &reports {
        tracing::info!("  Report: {}", path.display());
    }

    match fatal {
        Some(err) => Err(err),
        None => Ok(SweepReport {
            results,
            analysis,
            reports,
            failed_sizes,
        }),
    }
}

/// Run every runner on one input; all must succeed.
fn run_size(runners: &[Box<dyn Runner>], input: &Path, size: u32, runs: u32) -> Result<Vec<SizeRun>> {
    runners
        .iter()
        .map(|runner| runner.run(input, size, runs))
        .collect()
}

/// Add one runner's outcome. A decode the runner never attempted is left out
/// rather than marked unavailable.
fn record(results: &mut ResultSet, runner: &dyn Runner, run: SizeRun) {
    if runner.measures_decode() {
        results.push(run);
    } else {
        results.push_result(run.encode);
    }
}

fn log_size(runners: &[Box<dyn Runner>], runs: &[SizeRun], size: u32) {
    let find = |imp| runs.iter().find(|r| r.encode.implementation() == imp);

    for (runner, run) in runners.iter().zip(runs) {
        let name = run.encode.implementation();
        tracing::info!(
            "    {name} encode: {:.1}ms avg ({:.2} MP/s)",
            run.encode.average() * 1000.0,
            run.encode.throughput()
        );
        match &run.decode {
            Some(decode) => tracing::info!(
                "    {name} decode: {:.1}ms avg ({:.2} MP/s)",
                decode.average() * 1000.0,
                decode.throughput()
            ),
            None if runner.measures_decode() => {
                tracing::warn!("    {name} decode: unavailable at {size}×{size}")
            }
            None => {}
        }
    }

    if let (Some(candidate), Some(reference)) = (
        find(Implementation::Candidate),
        find(Implementation::Reference),
    ) {
        for operation in Operation::ALL {
            let pair = match operation {
                Operation::Encode => Some((&candidate.encode, &reference.encode)),
                Operation::Decode => candidate.decode.as_ref().zip(reference.decode.as_ref()),
            };
            if let Some((c, r)) = pair {
                if let Some(pct) = relative_speed(r.average(), c.average()) {
                    tracing::info!("  {operation}: candidate at {pct:.1}% of reference speed");
                }
            }
        }
    }
}

fn log_settings(opts: &SweepOptions, layout: &Layout) {
    tracing::info!("Output directory: {}", layout.root.display());
    tracing::info!("Benchmark runs: {}", opts.runs);
    let sizes: Vec<String> = opts.sizes.iter().map(u32::to_string).collect();
    tracing::info!("Image sizes: {}", sizes.join(","));
}

/// Locate the candidate tool: the explicit path if given, else the configured
/// search paths.
pub fn resolve_candidate(explicit: Option<&Path>, config: &Config) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(Error::Setup(format!(
            "candidate tool not found at {}",
            path.display()
        ))),
        None => config.candidate.locate(),
    }
}

fn resolve_reference_tool(role: &str, name: &str) -> Result<PathBuf> {
    find_tool(name)
        .ok_or_else(|| Error::Setup(format!("reference {role} `{name}` not found")))
}

/// Run the configured build command; an empty command is a no-op.
pub fn build_candidate(command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Ok(());
    };
    let invocation = Invocation::new(program).args(args);
    tracing::info!("Building candidate: {}", invocation.command_line());

    let out = invocation.run_captured()?;
    if !out.status.success() {
        if !out.stderr.is_empty() {
            tracing::error!("{}", out.stderr);
        }
        return Err(Error::Setup(format!(
            "build failed: `{}` exited with {}",
            invocation.command_line(),
            out.status
        )));
    }
    tracing::info!("Build successful");
    Ok(())
}
