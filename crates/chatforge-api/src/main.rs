//! ChatForge REST API entry point.
//!
//! Binary name: `chatforge`
//!
//! Parses CLI arguments, loads configuration, seeds reference data,
//! wires services, then starts the HTTP server.

mod http;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chatforge_infra::config::{self, AppConfig};
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "chatforge", about = "Multi-tenant chat-widget platform API")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server (the default when no command is given)
    Serve {
        /// Bind address, e.g. 0.0.0.0:8080 (overrides config and env)
        #[arg(long)]
        bind: Option<String>,

        /// Path to the config file
        #[arg(long, default_value = "chatforge.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,chatforge_api=debug,chatforge_core=debug,chatforge_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let (bind_override, config_path) = match cli.command {
        Some(Commands::Serve { bind, config }) => (bind, config),
        None => (None, PathBuf::from("chatforge.toml")),
    };

    let mut config: AppConfig =
        config::apply_env_overrides(config::load_config(&config_path).await);
    if let Some(bind) = bind_override {
        config.server.bind_addr = bind;
    }

    if config.provider.api_key.is_none() {
        tracing::warn!(
            "no provider API key configured; chatbot responses will fail until \
             OPENAI_API_KEY is set"
        );
    }

    let state = AppState::init(&config);
    let router = http::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!(addr = %config.server.bind_addr, "chatforge listening");

    axum::serve(listener, router).await?;
    Ok(())
}
