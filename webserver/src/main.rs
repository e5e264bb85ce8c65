//! WebServer entry point

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;

use classifier::{ClassificationPipeline, HttpRecognizer, ImageArchive, ImageLimits};
use orchestrator::GameConfig;
use shared::logging;
use webserver::{AppState, ServerConfig, WebServer};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Drawing game server: draw the category before the recognizer gives up")]
struct Args {
    /// Port for HTTP server (browser connections)
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Base URL of the recognition model server
    #[arg(long, env = "MODEL_SERVER", default_value = "http://127.0.0.1:8000")]
    model_server: String,

    /// Static files directory
    #[arg(long, default_value = "./static")]
    static_dir: PathBuf,

    /// Where submitted drawings are archived
    #[arg(long, default_value = "./images")]
    archive_dir: PathBuf,

    /// Largest accepted drawing width in pixels
    #[arg(long, default_value_t = ImageLimits::DEFAULT_MAX_WIDTH)]
    max_width: u32,

    /// Largest accepted drawing height in pixels
    #[arg(long, default_value_t = ImageLimits::DEFAULT_MAX_HEIGHT)]
    max_height: u32,

    /// Rounds per game
    #[arg(long, default_value_t = GameConfig::DEFAULT_ROUNDS)]
    rounds: usize,

    /// Seconds per round
    #[arg(long, default_value = "30")]
    round_seconds: u64,

    /// Timeout for each recognizer request
    #[arg(long, default_value = "10")]
    recognizer_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment from .env first, so clap's env fallbacks can see it
    let _ = dotenv::dotenv();
    let args = Args::parse();

    logging::init_tracing(Some(&args.log_level));
    logging::log_startup(&format!("webserver on port {}", args.port));

    let game = GameConfig::new(args.rounds, Duration::from_secs(args.round_seconds))
        .context("invalid game configuration")?;
    let limits = ImageLimits::new(args.max_width, args.max_height);

    let recognizer = HttpRecognizer::new(&args.model_server, Duration::from_secs(args.recognizer_timeout_secs))
        .context("failed to create recognizer client")?;
    let catalog = recognizer
        .fetch_catalog()
        .await
        .with_context(|| format!("failed to load categories from {}", args.model_server))?;
    if catalog.len() < game.rounds {
        anyhow::bail!(
            "model server knows {} categories, {} rounds need at least as many",
            catalog.len(),
            game.rounds
        );
    }
    let catalog = Arc::new(catalog);

    let pipeline = ClassificationPipeline::new(recognizer, Arc::clone(&catalog), limits)
        .with_archive(ImageArchive::new(&args.archive_dir));

    let config = ServerConfig {
        bind_address: SocketAddr::from(([0, 0, 0, 0], args.port)),
        static_dir: args.static_dir,
        game,
        limits,
    };
    let server = WebServer::new(AppState::new(config, catalog, Arc::new(pipeline)));

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => logging::log_shutdown("Received Ctrl+C signal"),
            Err(err) => logging::log_error("Signal handling", &err),
        }
    };

    server.run(shutdown).await.context("webserver stopped unexpectedly")?;

    logging::log_success("WebServer stopped gracefully");
    Ok(())
}
