use anyhow::Result;
use clap::Parser;
use storysketch::{create_router, AppState, Config};
use tracing::info;

#[derive(Parser)]
#[command(name = "storysketch", about = "Story-creation chat proxy service")]
struct Args {
    /// Configuration file path (without extension)
    #[arg(long, default_value = "config/storysketch")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("StorySketch v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);
    info!("Chat upstream: {}", cfg.upstream.chat_url);
    info!("Transcription upstream: {}", cfg.upstream.transcribe_url);
    info!(
        "Transcription failure masking: {}",
        cfg.transcription.mask_upstream_failures
    );

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let app = create_router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("storysketch stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
