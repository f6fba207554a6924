//! Approval Trends
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Settings come from a TOML file (`--config`, or the default locations),
//! then environment variables, then command-line flags:
//! - `DEBUG`: Verbose logging (default: off)
//! - `APP_PATH`: Path prefix when served behind a reverse proxy
//! - `TRENDS_DATA_URL`: Poll CSV URL
//! - `TRENDS_HOST` / `TRENDS_PORT`: Bind address (default: 0.0.0.0:8050)
//! - `TRENDS_LOG_LEVEL` / `TRENDS_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full tracing filter, overrides the level

use anyhow::Context;
use approval_trends::api::{serve, ApiConfig, AppState};
use approval_trends::config::{generate_default_config, Config, LoggingConfig};
use approval_trends::polls::Dataset;
use approval_trends::web::format_significant;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "approval-trends")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Issue polling dashboard aggregated by category and date")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: user config dir, /etc, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Poll CSV URL
    #[arg(long, global = true)]
    pub data_url: Option<String>,

    /// Verbose logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard (default)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Path prefix when served behind a reverse proxy
        #[arg(long)]
        path_prefix: Option<String>,
    },

    /// Print the category summary
    Summary {
        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Config { output }) => write_default_config(output.as_deref())?,
        Some(Commands::Summary { format }) => {
            let config = resolve_config(&cli)?;
            init_tracing(&config.logging, config.server.debug);
            let dataset = load_dataset(&config).await?;
            print_summary(&dataset, format)?;
        }
        Some(Commands::Serve {
            host,
            port,
            path_prefix,
        }) => {
            let mut config = resolve_config(&cli)?;
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(prefix) = path_prefix {
                config.server.path_prefix = prefix.clone();
            }
            init_tracing(&config.logging, config.server.debug);
            run_server(config).await?;
        }
        None => {
            let config = resolve_config(&cli)?;
            init_tracing(&config.logging, config.server.debug);
            run_server(config).await?;
        }
    }

    Ok(())
}

/// File, then environment, then global flags
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.data_url {
        config.source.data_url = url.clone();
    }
    if cli.debug {
        config.server.debug = true;
    }
    Ok(config)
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing config to {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig, debug: bool) {
    let default_filter = if debug {
        "approval_trends=debug,tower_http=debug".to_string()
    } else {
        format!("approval_trends={},tower_http=info", logging.level)
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn load_dataset(config: &Config) -> anyhow::Result<Dataset> {
    let timeout = Duration::from_secs(config.source.request_timeout_secs);
    Dataset::load(&config.source.data_url, timeout)
        .await
        .with_context(|| format!("loading poll data from {}", config.source.data_url))
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Approval Trends v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Debug mode: {}", config.server.debug);

    let dataset = Arc::new(load_dataset(&config).await?);
    let api_config = ApiConfig::from_config(&config);

    let state = AppState::new(dataset, api_config.clone());
    serve(state, &api_config).await?;

    tracing::info!("Approval Trends stopped");
    Ok(())
}

fn print_summary(dataset: &Dataset, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&dataset.summary_table())?);
        }
        "csv" => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["category", "yes", "no", "net"])?;
            for row in dataset.summary() {
                writer.write_record([
                    row.category.clone(),
                    row.yes.to_string(),
                    row.no.to_string(),
                    row.net.to_string(),
                ])?;
            }
            writer.flush()?;
        }
        "table" => {
            println!("{:<30} {:>8} {:>8} {:>8}", "Category", "Yes %", "No %", "Net %");
            println!("{}", "-".repeat(57));
            for row in dataset.summary() {
                println!(
                    "{:<30} {:>8} {:>8} {:>8}",
                    row.category,
                    format_significant(row.yes),
                    format_significant(row.no),
                    format_significant(row.net),
                );
            }
        }
        other => anyhow::bail!("unknown format {:?} (expected table, json or csv)", other),
    }
    Ok(())
}
