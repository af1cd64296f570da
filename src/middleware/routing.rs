//! Runs the route value transformer for website requests.
//!
//! The resulting `RouteValueDictionary` is always inserted (possibly empty); resolved
//! requests additionally carry `RouteValues`. Must sit inside the content context
//! middleware.

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, routing_middleware))
}

async fn routing_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let values = state
        .transformer
        .transform_request(req.extensions_mut(), original_uri.path())
        .await?;

    req.extensions_mut().insert(values);

    Ok(next.run(req).await)
}
