/*
 * Responsibility
 * - Render a website request from its route values
 *   - empty values: not ours → 404
 *   - RenderNoContent: nothing published yet → 200 notice
 *   - resolved: page with the status chosen by the engine (e.g. 404 for RenderNotFound)
 */
use axum::{
    Extension, Json,
    response::{IntoResponse, Response},
};

use crate::api::website::dto::{NoContentNotice, RenderedPage};
use crate::error::AppError;
use crate::services::routing::handlers::RENDER_NO_CONTENT_CONTROLLER;
use crate::services::routing::route_values::CONTROLLER_KEY;
use crate::services::routing::{RouteValueDictionary, RouteValues};

pub async fn render(
    values: Option<Extension<RouteValueDictionary>>,
    resolved: Option<Extension<RouteValues>>,
) -> Result<Response, AppError> {
    let values = values.map(|Extension(v)| v).unwrap_or_default();
    if values.is_empty() {
        return Err(AppError::not_found("content"));
    }

    if let Some(Extension(route_values)) = resolved {
        let published = route_values.published_request();
        let page = RenderedPage {
            controller: route_values.controller_name().to_string(),
            action: route_values.action_name().to_string(),
            template: route_values.template_name().map(str::to_string),
            culture: published.culture().map(str::to_string),
            url: published.uri().to_string(),
            content: published.published_content().cloned(),
        };
        return Ok((published.response_status(), Json(page)).into_response());
    }

    if values.get(CONTROLLER_KEY).map(String::as_str) == Some(RENDER_NO_CONTENT_CONTROLLER) {
        let notice = NoContentNotice {
            status: "no_content",
            message: "nothing has been published yet",
        };
        return Ok(Json(notice).into_response());
    }

    tracing::error!(?values, "route values without a resolved request");
    Err(AppError::Internal)
}
