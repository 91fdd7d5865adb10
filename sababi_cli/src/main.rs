use sababi_core::annotate::annotate_from_metadata_file;
use sababi_core::config::SababiConfig;
use sababi_core::corpus::generate_corpus;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_FILE: &str = "sababi.toml";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[clap(long, global = true, default_value = "info")]
    log_level: String,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a labeled corpus of C programs.
    Generate(GenerateArgs),
    /// Write inline-labeled copies of a generated corpus.
    Annotate {
        /// Metadata file written by `generate`.
        metadata_file: PathBuf,
        /// Existing directory for the labeled copies.
        out_dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Existing directory the programs are written to.
    out_dir: Option<PathBuf>,
    #[clap(short, long, value_parser)]
    config_file: Option<PathBuf>,
    #[clap(short, long)]
    num_instances: Option<usize>,
    /// Random seed, or -1 to seed from the OS.
    #[clap(short, long, allow_hyphen_values = true)]
    seed: Option<i64>,
    #[clap(short, long)]
    metadata_file: Option<PathBuf>,
    /// Write bare programs without trailing label comments.
    #[clap(long)]
    no_inline_labels: bool,
}

fn load_config(config_file: Option<&Path>) -> anyhow::Result<SababiConfig> {
    match config_file {
        Some(config_path) => {
            info!(path = ?config_path, "Loading configuration");
            SababiConfig::load_from_file(config_path)
                .with_context(|| format!("Could not load config file {config_path:?}"))
        }
        None => {
            let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_config_path.exists() {
                info!(path = ?default_config_path, "No config file given, loading default");
                SababiConfig::load_from_file(&default_config_path)
                    .with_context(|| format!("Could not load config file {default_config_path:?}"))
            } else {
                debug!("No config file found, using built-in defaults");
                Ok(SababiConfig::default())
            }
        }
    }
}

fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config_file.as_deref())?;

    let settings = &mut config.generator;
    if let Some(out_dir) = args.out_dir {
        settings.out_dir = Some(out_dir);
    }
    if let Some(num_instances) = args.num_instances {
        settings.num_instances = num_instances;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(metadata_file) = args.metadata_file {
        settings.metadata_file = Some(metadata_file);
    }
    if args.no_inline_labels {
        settings.inline_labels = false;
    }
    debug!(?config, "Effective configuration");

    let start_time = Instant::now();
    let summary = generate_corpus(&config).context("Corpus generation failed")?;
    info!(
        accepted = summary.accepted,
        duplicates = summary.duplicates,
        collisions = summary.collisions,
        elapsed = ?start_time.elapsed(),
        "Done"
    );
    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Annotate {
            metadata_file,
            out_dir,
        } => {
            let written = annotate_from_metadata_file(&metadata_file, &out_dir)
                .with_context(|| format!("Could not annotate corpus from {metadata_file:?}"))?;
            info!(written, "Annotated corpus written to {out_dir:?}");
            Ok(())
        }
    }
}
