use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::security::BackOfficeIdentity;
use crate::state::AppState;

/// Handler で、検証済み back office identity を受け取るための extractor
/// access middleware が `Arc<BackOfficeIdentity>` を extensions に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定）
pub struct BackOfficeUser(pub Arc<BackOfficeIdentity>);

impl FromRequestParts<AppState> for BackOfficeUser
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Arc<BackOfficeIdentity>>()
            .cloned()
            .map(BackOfficeUser)
            .ok_or(AppError::Unauthorized)
    }
}
