//! Back office access guard.
//!
//! `Authorization: Bearer <jwt>` → Authenticator → Principal → back office identity.
//! Requests whose principal does not carry a complete back office identity get 401.
//!
//! On success:
//! - the typed identity is attached to the principal (later lookups reuse it)
//! - `Principal` and `Arc<BackOfficeIdentity>` are inserted into extensions

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::security::{PrincipalIdentity, resolve_back_office_identity};
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let mut principal = match state.auth.authenticate(token).await {
        Ok(principal) => principal,
        Err(err) => {
            tracing::warn!(error = ?err, "access token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    let Some(identity) = resolve_back_office_identity(&principal) else {
        tracing::warn!("principal does not carry a back office identity");
        return Err(AppError::Unauthorized);
    };

    if let Some(claims) = principal.as_claims_mut() {
        let attached = claims
            .identities()
            .iter()
            .any(|i| i.as_back_office().is_some());
        if !attached {
            claims.add_identity(PrincipalIdentity::BackOffice(Arc::clone(&identity)));
        }
    }

    tracing::debug!(user_id = %identity.id(), "back office user authenticated");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
