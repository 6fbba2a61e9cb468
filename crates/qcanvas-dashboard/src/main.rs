//! qcanvas Dashboard binary entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qcanvas_dashboard::{AppState, DashboardConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qcanvas_dashboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env()?;
    let bind_addr = config.bind_address;
    tracing::info!(
        total_epochs = config.total_epochs,
        interval_ms = config.epoch_interval.as_millis() as u64,
        "Demo producer configured"
    );

    let state = Arc::new(AppState::with_config(config));
    let app = create_router(state);

    tracing::info!("Starting qcanvas dashboard at http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
