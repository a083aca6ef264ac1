//! Chess Clock - A two-player chess clock served over HTTP
//!
//! This is the main entry point for the chess-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use chess_clock::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::tick_timer_task,
    utils::{format_clock, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("chess_clock={},tower_http=info", config.log_level()))
        .init();

    let duration = config.initial_duration();
    info!("Starting chess-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}",
          config.host, config.port, format_clock(duration));

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), duration));

    // Start the clock tick background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_timer_task(tick_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /clock/:player/tap        - Tap player 1 or 2's clock");
    info!("  POST /pause                    - Pause or resume the game");
    info!("  POST /reset                    - Reset both clocks");
    info!("  POST /duration                 - Set the starting time");
    info!("  GET  /picker                   - Duration dialog draft");
    info!("  POST /picker/:field/:direction - Step minutes or seconds up/down");
    info!("  POST /picker/confirm           - Apply the duration dialog");
    info!("  GET  /clock                    - Clock faces");
    info!("  GET  /status                   - Clock faces and server status");
    info!("  GET  /health                   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
