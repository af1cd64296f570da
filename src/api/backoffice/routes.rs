/*
 * Responsibility
 * - back office API の URL 構造を定義 ({BACKOFFICE_PATH}/api 配下に nest される)
 * - /health は公開、それ以外は access middleware を通す
 */
use axum::{Router, routing::get};

use crate::api::backoffice::handlers::{
    current_user::{current_user, remaining_timeout_seconds},
    health::health,
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/current-user", get(current_user))
        .route("/remaining-timeout-seconds", get(remaining_timeout_seconds));
    let protected = middleware::auth::access::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}
