//! Geeksonator - chat moderation relay bot
//!
//! Long-polls the Bot API for messages and answers admin commands.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geeksonator::api::{create_router, AppState};
use geeksonator::bot::{BotProvider, Observer, TelegramClient};
use geeksonator::{spawn_polling_task, Config};

/// Main entry point for the relay bot.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Authorize against the Bot API
/// 4. Create the administrator cache
/// 5. Start the update polling task
/// 6. Serve the admin API on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Defaults to "info" ("debug" in debug mode), can be overridden with RUST_LOG
    let default_filter = if config.debug_mode {
        "geeksonator=debug,cacher=debug,tower_http=debug"
    } else {
        "geeksonator=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Geeksonator");
    config.validate().context("invalid configuration")?;
    info!(
        debug_mode = config.debug_mode,
        poll_timeout = config.poll_timeout,
        cache_capacity = config.cache_capacity,
        cache_ttl_secs = config.cache_ttl_secs,
        port = config.server_port,
        "Configuration loaded"
    );
    if config.debug_mode {
        warn!("Debug mode running: admin check is disabled");
    }

    let client = TelegramClient::new(
        &config.api_url,
        config.active_token(),
        Duration::from_secs(config.poll_timeout),
    )
    .context("failed to build bot api client")?;

    let me = client.get_me().await.context("failed to authorize bot")?;
    info!(
        account = me.username.as_deref().unwrap_or(&me.first_name),
        "Authorized on account"
    );

    let state = AppState::from_config(&config).context("failed to create admin cache")?;
    info!("Administrator cache initialized");

    let provider: Arc<dyn BotProvider> = Arc::new(client);
    let observer = Observer::new(provider.clone(), Box::new(state.cache.clone()))
        .skip_admin_check(config.debug_mode);
    let polling_handle = spawn_polling_task(provider, observer, config.poll_timeout);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Admin API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(polling_handle))
        .await
        .context("admin API server failed")?;

    info!("Application stopped");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the polling task and allows graceful shutdown.
async fn shutdown_signal(polling_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    polling_handle.abort();
    warn!("Polling task aborted");
}
