//! SVG Icon Components CLI
//!
//! Usage:
//!   svg-icon-components [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>  Configuration file [default: react-svg-icon-components.json]
//!   -v, --verbose        Log debug output (including generated sources)
//!   -n, --dry-run        Generate in memory and report, but write nothing
//!   -h, --help           Print help

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use svg_icon_components::{
    ConfigError, GenerateError, IconConfig, IconPipeline, NativeTransform, CONFIG_FILE,
};

#[derive(Parser)]
#[command(name = "svg-icon-components")]
#[command(about = "Generate React components from a folder of SVG icons")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Log debug output, including every generated component
    #[arg(short, long)]
    verbose: bool,

    /// Generate in memory and report, but write nothing
    #[arg(short = 'n', long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match IconConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e @ ConfigError::NotFound { .. }) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading config '{}': {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };

    let pipeline = IconPipeline::new(&config, NativeTransform);
    let result = if cli.dry_run {
        pipeline.stage()
    } else {
        pipeline.run()
    };

    match result {
        Ok(output) => {
            for file in &output.components {
                println!("{}", file.path.display());
            }
            println!("{}", output.index.path.display());
            if cli.dry_run {
                eprintln!(
                    "Dry run: {} component(s) generated, nothing written",
                    output.export_count()
                );
            }
        }
        Err(e @ GenerateError::MissingIconsDir(_)) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(GenerateError::Icons(errors)) => {
            for error in &errors {
                eprintln!("{}", error.report());
            }
            eprintln!("Error: {} icon(s) failed, nothing written", errors.len());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
