//! pixbench CLI - codec benchmark harness
//!
//! Compares a candidate image codec against a reference codec, or profiles
//! the candidate's encoder on its own.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use pixbench::corpus::{Pattern, DEFAULT_SEED};
use pixbench::harness::{self, Preset, ProfileOptions, SweepOptions};
use pixbench::Config;

/// Benchmark a candidate image codec against a reference codec.
#[derive(Parser, Debug)]
#[command(name = "pixbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML configuration file (labels, tool names, report thresholds)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show per-trial timings and tool output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Benchmark candidate and reference encode/decode and write comparison reports
    Compare {
        #[command(flatten)]
        sweep: SweepArgs,

        /// Output directory
        #[arg(short, long, default_value = "./benchmark_results")]
        output: PathBuf,

        /// Reference encoder command (overrides config)
        #[arg(long, value_name = "CMD")]
        reference_encoder: Option<String>,

        /// Reference decoder command (overrides config)
        #[arg(long, value_name = "CMD")]
        reference_decoder: Option<String>,

        /// Skip a size that fails instead of stopping the sweep
        #[arg(long)]
        keep_going: bool,
    },

    /// Profile the candidate encoder and write a narrative report
    Profile {
        #[command(flatten)]
        sweep: SweepArgs,

        /// Output directory
        #[arg(short, long, default_value = "./profile_results")]
        output: PathBuf,

        /// Encoding preset passed to the candidate
        #[arg(short, long, value_enum, default_value = "balanced")]
        preset: PresetArg,

        /// Skip building the candidate (use the existing binary)
        #[arg(long)]
        skip_build: bool,
    },
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Comma-separated image sizes
    #[arg(short, long, default_value = "256,512,1024")]
    sizes: String,

    /// Number of benchmark runs per size
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,

    /// Path to the candidate tool (searched for when omitted)
    #[arg(long, value_name = "PATH")]
    candidate: Option<PathBuf>,

    /// Test image content
    #[arg(long, value_enum, default_value = "noise")]
    pattern: PatternArg,

    /// Seed for noise test images
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatternArg {
    /// Seeded random samples (hard to compress)
    Noise,
    /// Diagonal gradient (easy to compress)
    Gradient,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Fast,
    Balanced,
    Quality,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Fast => Preset::Fast,
            PresetArg::Balanced => Preset::Balanced,
            PresetArg::Quality => Preset::Quality,
        }
    }
}

impl SweepArgs {
    fn into_options(self, output: PathBuf, keep_going: bool) -> pixbench::Result<SweepOptions> {
        let pattern = match self.pattern {
            PatternArg::Noise => Pattern::Noise { seed: self.seed },
            PatternArg::Gradient => Pattern::Gradient,
        };
        Ok(SweepOptions {
            sizes: harness::parse_sizes(&self.sizes)?,
            runs: self.runs,
            output_dir: output,
            candidate: self.candidate,
            pattern,
            keep_going,
        })
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> pixbench::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let report = match cli.command {
        Command::Compare {
            sweep,
            output,
            reference_encoder,
            reference_decoder,
            keep_going,
        } => {
            if let Some(encoder) = reference_encoder {
                config.reference.encoder = encoder;
            }
            if let Some(decoder) = reference_decoder {
                config.reference.decoder = decoder;
            }
            let opts = sweep.into_options(output, keep_going)?;
            harness::run_compare(&opts, &config)?
        }
        Command::Profile {
            sweep,
            output,
            preset,
            skip_build,
        } => {
            let opts = sweep.into_options(output, true)?;
            let profile = ProfileOptions {
                preset: preset.into(),
                skip_build,
            };
            harness::run_profile(&opts, &profile, &config)?
        }
    };

    for (size, reason) in &report.failed_sizes {
        println!("Skipped {size}×{size}: {reason}");
    }
    for path in &report.reports {
        println!("{}", path.display());
    }
    println!("Benchmark complete!");
    Ok(())
}
