//! stoch - Command Line Sampling and Statistics
//!
//! # Commands
//!
//! - `stoch generators` - List generator kinds
//! - `stoch stats --values 1,2,3` - Describe a sample
//! - `stoch sample --dist gamma --params 2,1` - Draw from a distribution
//! - `stoch cdf --dist gaussian --params 1 --x 1.96` - Evaluate distribution functions
//! - `stoch qrng --method sobol --dim 2` - Print quasirandom points

use clap::{Parser, Subcommand};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stoch_cli::commands::sample::SampleArgs;
use stoch_cli::commands::stats::StatsArgs;
use stoch_cli::commands::{self, OutputFormat};
use stoch_cli::config::{build_config, CliArgs, CliConfig};
use stoch_cli::family::parse_list;
use stoch_cli::stoch_random::distributions::GaussianMethod;
use stoch_cli::stoch_random::qrng::QrngMethod;
use stoch_cli::Result;

/// stoch - random generation, distributions, quasirandom sequences and statistics
#[derive(Parser, Debug)]
#[command(name = "stoch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format); defaults to ./stoch.toml when present
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List generator kinds
    Generators {
        /// Generator kind to mark as selected
        #[arg(short, long)]
        generator: Option<String>,
    },

    /// Moments, order statistics and, with extra files, weighted and two-sample measures
    Stats {
        /// Comma-separated sample values
        #[arg(long, value_name = "LIST", allow_hyphen_values = true)]
        values: Option<String>,

        /// File of sample values (CSV or one per line)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Use every N-th value
        #[arg(short, long, default_value = "1")]
        stride: usize,

        /// File of weights
        #[arg(short, long, value_name = "FILE")]
        weights: Option<PathBuf>,

        /// Use every N-th weight
        #[arg(long, default_value = "1")]
        weight_stride: usize,

        /// File holding a second sample for covariance, correlation and t-test
        #[arg(long, value_name = "FILE")]
        against: Option<PathBuf>,
    },

    /// Draw from a distribution
    Sample {
        /// Distribution family, e.g. gaussian, gamma, flat
        #[arg(short, long)]
        dist: String,

        /// Comma-separated family parameters
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        params: String,

        /// Number of draws
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Gaussian algorithm (polar, ziggurat, ratio)
        #[arg(short, long)]
        method: Option<String>,

        /// Generator kind
        #[arg(short, long)]
        generator: Option<String>,

        /// Seed
        #[arg(long)]
        seed: Option<u64>,

        /// Resume from a saved generator state
        #[arg(long, value_name = "FILE")]
        state_in: Option<PathBuf>,

        /// Save the generator state after the last draw
        #[arg(long, value_name = "FILE")]
        state_out: Option<PathBuf>,
    },

    /// Density, both CDF tails and their inverses at a point
    Cdf {
        /// Distribution family
        #[arg(short, long)]
        dist: String,

        /// Comma-separated family parameters
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        params: String,

        /// Evaluation point
        #[arg(short, long, allow_hyphen_values = true)]
        x: f64,
    },

    /// Print quasirandom points
    Qrng {
        /// Sequence (niederreiter_2, sobol, halton, reversehalton)
        #[arg(short, long, default_value = "sobol")]
        method: String,

        /// Dimension
        #[arg(short, long, default_value = "2")]
        dim: usize,

        /// Number of points
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Points to discard first
        #[arg(long, default_value = "0")]
        skip: usize,
    },
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let (generator, seed) = match &self.command {
            Commands::Generators { generator } => (generator.clone(), None),
            Commands::Sample {
                generator, seed, ..
            } => (generator.clone(), *seed),
            _ => (None, None),
        };
        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            generator,
            seed,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn dispatch<W: Write>(out: &mut W, cli: Cli, config: &CliConfig) -> Result<()> {
    let format = cli.format;
    match cli.command {
        Commands::Generators { .. } => commands::generators::run(out, config.generator, format),
        Commands::Stats {
            values,
            input,
            stride,
            weights,
            weight_stride,
            against,
        } => {
            let args = StatsArgs {
                values: values.as_deref().map(parse_list).transpose()?,
                input,
                stride,
                weights,
                weight_stride,
                against,
            };
            commands::stats::run(out, &args, format)
        }
        Commands::Sample {
            dist,
            params,
            count,
            method,
            state_in,
            state_out,
            ..
        } => {
            let method = method
                .as_deref()
                .map(str::parse::<GaussianMethod>)
                .transpose()?;
            let args = SampleArgs {
                dist,
                params: parse_list(&params)?,
                count,
                method,
                state_in,
                state_out,
            };
            commands::sample::run(out, &args, config, format)
        }
        Commands::Cdf { dist, params, x } => {
            commands::cdf::run(out, &dist, &parse_list(&params)?, x, format)
        }
        Commands::Qrng {
            method,
            dim,
            count,
            skip,
        } => {
            let method: QrngMethod = method.parse()?;
            commands::qrng::run(out, method, dim, skip, count, format)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match build_config(&cli.config_args()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_level.as_filter_str());
    tracing::info!(
        version = stoch_cli::VERSION,
        generator = %config.generator,
        seed = config.seed,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = dispatch(&mut out, cli, &config).and_then(|()| out.flush().map_err(Into::into));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
