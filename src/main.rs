use clap::{Parser, Subcommand};
use news_translate::{Config, NewsPipeline, Result, api, export, shutdown_signal};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "news-translate")]
#[command(version)]
#[command(about = "Translates the TechCrunch feed into Korean and serves it as a dashboard")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Dashboard listen address (overrides config file)
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the dashboard (default)
    Serve,
    /// Run once and write the CSV export to disk
    Export {
        /// Output path (defaults to the configured file name)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("news_translate={},tower_http=trace", cli.log_level)
    } else {
        format!("news_translate={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting news-translate v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::from_toml_file(path)?;
            info!("Configuration loaded from: {}", path.display());
            config
        }
        None => Config::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.api.bind_address = bind;
    }

    let pipeline = Arc::new(NewsPipeline::new(&config)?);
    info!(feed = %pipeline.source_url(), "Pipeline ready");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            api::start_api_server(pipeline, Arc::new(config), shutdown_signal()).await?;
        }
        Command::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
            let digest = pipeline.run().await?;
            for warning in &digest.warnings {
                tracing::warn!("{}", warning);
            }
            export::write_csv_file(&digest.items, &path)?;
            info!(
                rows = digest.items.len(),
                path = %path.display(),
                "CSV export written"
            );
        }
    }

    Ok(())
}
