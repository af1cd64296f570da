/*
 * Responsibility
 * - GET /current-user: 認証済み back office user の profile
 * - GET /remaining-timeout-seconds: 認証 ticket の残り秒数 (期限切れなら負数)
 */
use axum::{Extension, Json};
use chrono::Utc;

use crate::api::backoffice::dto::{CurrentUserResponse, RemainingTimeoutResponse};
use crate::api::backoffice::extractors::BackOfficeUser;
use crate::error::AppError;
use crate::services::security::{Principal, remaining_auth_seconds};

pub async fn current_user(BackOfficeUser(identity): BackOfficeUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse::from(identity.as_ref()))
}

pub async fn remaining_timeout_seconds(
    Extension(principal): Extension<Principal>,
) -> Result<Json<RemainingTimeoutResponse>, AppError> {
    let remaining_seconds = remaining_auth_seconds(&principal, Utc::now())?;
    Ok(Json(RemainingTimeoutResponse { remaining_seconds }))
}
