/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - runtime status, authenticator, content context factory, route value transformer
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::fmt;
use std::sync::Arc;

use crate::services::auth::Authenticator;
use crate::services::routing::{ContentContextFactory, RouteValueTransformer, RuntimeStatus};

#[derive(Clone)]
pub struct AppState {
    pub runtime: RuntimeStatus,
    pub auth: Arc<dyn Authenticator>,
    pub content_contexts: ContentContextFactory,
    pub transformer: Arc<RouteValueTransformer>,
}

impl AppState {
    pub fn new(
        runtime: RuntimeStatus,
        auth: Arc<dyn Authenticator>,
        content_contexts: ContentContextFactory,
        transformer: Arc<RouteValueTransformer>,
    ) -> Self {
        Self {
            runtime,
            auth,
            content_contexts,
            transformer,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("runtime", &self.runtime)
            .field("content_contexts", &self.content_contexts)
            .finish_non_exhaustive()
    }
}
