use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::app::build_router;
use api::modules::{self, Store};
use api::state::{AppState, ServerConfig};
use bundle::BundleOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let options = BundleOptions::from_env();
    let config = ServerConfig::from_env()?;
    tracing::info!(
        query = %options.root_keys.query,
        combine = options.combine,
        "Bundling schema modules"
    );

    let state = AppState::new(&modules::all(), &options, Store::seeded(), config)?;
    let port = state.config().port;

    let app = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
