/*
 * Responsibility
 * - back office API の response DTO
 */
use serde::Serialize;

use crate::services::security::BackOfficeIdentity;

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub real_name: String,
    pub culture: String,
    pub start_content_nodes: Vec<i64>,
    pub start_media_nodes: Vec<i64>,
    pub roles: Vec<String>,
    pub allowed_applications: Vec<String>,
    pub session_id: Option<String>,
    pub authentication_type: String,
}

impl From<&BackOfficeIdentity> for CurrentUserResponse {
    fn from(identity: &BackOfficeIdentity) -> Self {
        Self {
            id: identity.id().to_string(),
            username: identity.username().to_string(),
            real_name: identity.real_name().to_string(),
            culture: identity.culture().to_string(),
            start_content_nodes: identity.start_content_nodes(),
            start_media_nodes: identity.start_media_nodes(),
            roles: identity.roles().into_iter().map(str::to_string).collect(),
            allowed_applications: identity
                .allowed_applications()
                .into_iter()
                .map(str::to_string)
                .collect(),
            session_id: identity.session_id().map(str::to_string),
            authentication_type: identity.authentication_type().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RemainingTimeoutResponse {
    pub remaining_seconds: f64,
}
