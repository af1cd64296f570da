/*
 * Responsibility
 * - PublishedRouter: the content resolution engine seam (async)
 * - route(): build a request from the context's cleaned url and ask the engine
 * - ContentFinderRouter: engine backed by the content cache + handler registry
 *
 * Notes
 * - No retries here. "Nothing found" is a valid PublishedRequest, not an error
 */
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use super::{
    ContentContext, HandlerRegistry, PublishedContentCache, PublishedRequest,
    PublishedRequestBuilder, RoutingResult,
};

#[async_trait]
pub trait PublishedRouter: Send + Sync {
    async fn route_request(
        &self,
        builder: PublishedRequestBuilder,
    ) -> RoutingResult<PublishedRequest>;
}

/// Resolve the current request, starting from the context's cleaned url.
///
/// Callers route a context once; the result is assigned to it afterwards.
pub async fn route(
    router: &dyn PublishedRouter,
    ctx: &ContentContext,
) -> RoutingResult<PublishedRequest> {
    let builder = PublishedRequestBuilder::new(ctx.cleaned_url().clone());
    router.route_request(builder).await
}

/// Looks content up by route in the cache and picks the handler from the registry.
///
/// Unmatched routes resolve to the not-found handler with a 404 status. The culture
/// of the request is the culture the matched node is published in.
pub struct ContentFinderRouter {
    content: Arc<dyn PublishedContentCache>,
    handlers: HandlerRegistry,
}

impl ContentFinderRouter {
    pub fn new(content: Arc<dyn PublishedContentCache>, handlers: HandlerRegistry) -> Self {
        Self { content, handlers }
    }
}

#[async_trait]
impl PublishedRouter for ContentFinderRouter {
    async fn route_request(
        &self,
        mut builder: PublishedRequestBuilder,
    ) -> RoutingResult<PublishedRequest> {
        let Some(content) = self.content.get_by_route(builder.uri().path()) else {
            tracing::debug!(uri = %builder.uri(), "no content matched route");
            builder
                .set_handler(HandlerRegistry::not_found_handler())
                .set_response_status(StatusCode::NOT_FOUND);
            return Ok(builder.build());
        };

        let handler = self.handlers.resolve(&content);
        tracing::debug!(
            uri = %builder.uri(),
            controller = %handler.controller_name,
            action = %handler.action_name,
            "content found"
        );
        if let Some(culture) = &content.culture {
            builder.set_culture(culture.as_str());
        }
        builder.set_published_content(content).set_handler(handler);

        Ok(builder.build())
    }
}
