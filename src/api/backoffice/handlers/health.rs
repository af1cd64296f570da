/*
 * Responsibility
 * - GET /health (疎通用, 認証なし)
 * - runtime level を返す: Run 以外ならまだコンテンツは配信されない
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::services::routing::RuntimeState;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let level = state.runtime.level();
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "runtime_level": level.as_str()})),
    )
}
