//! # DueTask API Server
//!
//! This is the main server binary for DueTask. It serves the browser-facing
//! task management endpoints and runs the daily SMS reminder service
//! in-process next to the HTTP listener.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p duetask-api
//! ```

use std::sync::Arc;

use duetask_api::app::{build_router, AppState};
use duetask_api::config::Config;
use duetask_reminder::service::{ReminderConfig, ReminderService};
use duetask_reminder::sms::{HttpSmsSender, SmsConfig, SmsSender};
use duetask_shared::db::migrations::{ensure_database_exists, run_migrations};
use duetask_shared::db::pool::{close_pool, create_pool, DatabaseConfig as PoolConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duetask_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "DueTask API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    // Database: create if missing, connect, migrate
    ensure_database_exists(&config.database.url).await?;
    let pool = create_pool(PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    run_migrations(&pool).await?;

    // Reminder service runs in-process next to the listener
    let sender: Arc<dyn SmsSender> = Arc::new(HttpSmsSender::new(SmsConfig {
        api_url: config.sms.api_url.clone(),
        api_token: config.sms.api_token.clone(),
        from_number: config.sms.from_number.clone(),
    })?);

    let reminder = ReminderService::new(
        pool.clone(),
        sender,
        ReminderConfig {
            hour: config.reminder.hour,
            minute: config.reminder.minute,
            country_prefix: config.sms.country_prefix.clone(),
        },
    );
    let reminder_shutdown = reminder.shutdown_token();
    let reminder_handle = reminder.spawn();

    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, stopping reminder service...");
    reminder_shutdown.cancel();
    let _ = reminder_handle.await;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {}
        Err(e) => {
            // Without a signal handler the server runs until killed
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
