use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use filmscout::FilmScout;
use state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=debug,filmscout=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::Settings::from_env();

    // A missing or unlaunchable browser is fatal; there is no degraded mode.
    let scout = FilmScout::launch(settings.scout_config()?).await?;
    let state = AppState {
        scout: Arc::new(scout),
        settings: settings.clone(),
    };

    let app = Router::new()
        .route("/check_movie", get(routes::movies::check_movie))
        .route("/get_movie_link", get(routes::movies::get_movie_link))
        .route("/heartbeat", get(routes::system::heartbeat))
        .route("/settings", get(routes::system::get_settings))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
