//! HDHomeRun discovery endpoints.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::web::state::WebState;

/// `GET /discover.json`
pub async fn discover(State(web_state): State<Arc<WebState>>) -> impl IntoResponse {
    Json(web_state.views.device_descriptor())
}

/// `GET /lineup.json`
pub async fn lineup(State(web_state): State<Arc<WebState>>) -> impl IntoResponse {
    let lineup = web_state.views.lineup();
    log::debug!("Serving lineup with {} channels", lineup.len());
    Json(lineup)
}

/// `GET /lineup_status.json`
pub async fn lineup_status(State(web_state): State<Arc<WebState>>) -> impl IntoResponse {
    Json(web_state.views.lineup_status())
}
