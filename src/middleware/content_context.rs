//! Opens a ContentContext for each website request and stores it in extensions as
//! `Arc<ContentContext>`. Routing and handlers read it from there.

use std::sync::Arc;

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
    router.layer(middleware::from_fn_with_state(state, content_context_middleware))
}

async fn content_context_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let target = original_uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let ctx = match state.content_contexts.create(target) {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::warn!(error = %err, target = %target, "cannot build request url");
            return Err(AppError::bad_request("INVALID_URL", "invalid request url"));
        }
    };

    req.extensions_mut().insert(Arc::new(ctx));

    Ok(next.run(req).await)
}
