//! Pomodoro Timer - A countdown timer daemon controlled over HTTP
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::display_log_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    let settings = config.timer_settings()?;

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, duration={}ms, tick={}ms",
        config.host,
        config.port,
        settings.total_ms(),
        settings.tick_ms()
    );

    let state = Arc::new(AppState::new(settings, config.host.clone(), config.port));

    // Render display notifications as log lines
    tokio::spawn(display_log_task(state.subscribe_display()));

    if config.auto_start {
        state.countdown.start()?;
        state.record_action("start");
    }

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start or resume the countdown");
    info!("  POST /pause  - Pause the countdown");
    info!("  POST /toggle - Start when stopped, pause when running");
    info!("  POST /reset  - Reset to the full duration");
    info!("  GET  /status - Current countdown and server status");
    info!("  GET  /health - Health check");

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

    // Cancel any pending tick before the runtime goes away
    state.countdown.reset()?;

    info!("Server shutdown complete");
    Ok(())
}
