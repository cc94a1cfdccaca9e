//! HTTP layer exposing the tuner discovery documents.

pub mod api;
pub mod dashboard;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use iptvhr_lineup::ViewBuilder;
use state::WebState;

/// Build the router serving the discovery endpoints.
pub fn router(views: ViewBuilder) -> Router {
    let web_state = Arc::new(WebState::new(views));

    Router::new()
        .route("/discover.json", get(api::discover))
        .route("/lineup.json", get(api::lineup))
        .route("/lineup_status.json", get(api::lineup_status))
        .route("/", get(dashboard::index))
        .with_state(web_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Bind `listen_addr` and serve until the server fails.
pub async fn start_web_server(
    listen_addr: SocketAddr,
    views: ViewBuilder,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(views);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    log::info!("Tuner API listening on http://{}", listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
