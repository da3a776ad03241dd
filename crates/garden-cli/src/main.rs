//! Garden CLI - Command-line interface for the sound garden content service

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate, prompt, providers, serve, validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "garden")]
#[command(about = "AI content generation and validation for the sound garden", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Read configuration from this file instead of the layered defaults
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (defaults to [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (defaults to [server] port or PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Serve every kind from this provider (openai, gemini, mock)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Generate content and print it as JSON
    Generate {
        /// Content kind: plant, rainbow, weather, aurora
        kind: String,

        /// Number of plants to generate (plants only)
        #[arg(long, short)]
        quantity: Option<i64>,

        /// Provider to use (openai, gemini, mock)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Decode and validate a saved model response
    Validate {
        /// Content kind (built-in or loaded from schemas_dir)
        kind: String,

        /// File holding the raw response text
        file: String,
    },

    /// Show the prompt sent for a kind
    Prompt {
        /// Content kind: plant, rainbow, weather, aurora
        kind: String,
    },

    /// List providers and their status
    Providers,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Serve {
            host,
            port,
            provider,
        } => serve::run(serve::ServeArgs {
            config,
            host,
            port,
            provider,
        }),
        Commands::Generate {
            kind,
            quantity,
            provider,
        } => generate::run(config, &kind, quantity, provider.as_deref()),
        Commands::Validate { kind, file } => validate::run(config, &kind, &file),
        Commands::Prompt { kind } => prompt::run(config, &kind),
        Commands::Providers => providers::run(config),
    }
}
