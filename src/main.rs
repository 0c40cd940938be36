//! Tuple Entropy CLI
//!
//! Reads a raw sample file (one symbol per byte) and reports the t-Tuple
//! and LRS min-entropy estimates.

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tuple_entropy::{
    config::{FileConfig, OutputFormat},
    estimators::assess_with,
    report,
    sample::SymbolSample,
};

/// t-Tuple and LRS min-entropy estimates for a sample file.
#[derive(Debug, Parser)]
#[command(name = "tuple-entropy", version, about)]
struct Cli {
    /// Raw sample file, one symbol per byte.
    sample: PathBuf,

    /// Bits per symbol (1-8). Inferred from the data when omitted.
    #[arg(short, long)]
    bits: Option<u8>,

    /// Read at most this many symbols.
    #[arg(long)]
    max_symbols: Option<usize>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start the LRS estimate at tuple length 1 instead of the t-Tuple `u`.
    #[arg(long)]
    no_hint: bool,

    /// Log intermediate values.
    #[arg(short, long)]
    verbose: bool,

    /// Report format.
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn merge_into(&self, mut config: FileConfig) -> FileConfig {
        if self.bits.is_some() {
            config.sample.bits_per_symbol = self.bits;
        }
        if self.max_symbols.is_some() {
            config.sample.max_symbols = self.max_symbols;
        }
        if self.no_hint {
            config.assessment.seed_lrs_from_t_tuple = false;
        }
        if self.verbose {
            config.output.verbose = true;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(2);
            }
        },
        None => FileConfig::default(),
    };
    let config = cli.merge_into(file_config);

    // Initialize logging
    let level = if config.output.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = config.sample.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    info!("Tuple Entropy v{}", tuple_entropy::VERSION);

    let sample = match SymbolSample::from_file(
        &cli.sample,
        config.sample.bits_per_symbol,
        config.sample.max_symbols,
    ) {
        Ok(sample) => sample,
        Err(e) => {
            error!("Failed to load sample {}: {}", cli.sample.display(), e);
            std::process::exit(1);
        }
    };

    info!(
        symbols = sample.len(),
        bits = sample.bits_per_symbol(),
        "Assessing sample"
    );

    let assessment = match assess_with(
        sample.symbols(),
        sample.alphabet_size(),
        config.assessment.seed_lrs_from_t_tuple,
    ) {
        Ok(assessment) => assessment,
        Err(e) => {
            error!("Estimation failed: {}", e);
            std::process::exit(1);
        }
    };

    match report::render(&assessment, config.output.format) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
