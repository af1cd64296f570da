//! Dynamic route value transformer.
//!
//! Runs once per request and decides between three results: no values (the request
//! is not ours), the fixed no-content values, or values for the resolved content.
//!
//! Stages run strictly in order and any of them may end the request:
//!
//! 1. gate: runtime not ready or no active content context -> empty
//! 2. not a document request   -> empty
//! 3. nothing published at all -> no-content values
//! 4. routing (async, the only suspension point); an already routed context fails here
//! 5. build values             -> resolved values, PublishedRequest assigned to the context
//!
//! Request-scoped state is only written in stage 5, after resolution completed, so a
//! request dropped while awaiting the engine leaves its context untouched.

use std::sync::Arc;

use axum::http::Extensions;

use super::{
    ContentContext, PublishedRequest, PublishedRouter, RoutableDocumentFilter,
    RouteValueDictionary, RouteValues, RouteValuesFactory, RoutingError, RoutingResult,
    RuntimeLevel, RuntimeState, gate, router,
};

/// Everything routing needs to know about the current request.
#[derive(Debug, Clone)]
pub struct RoutableRequestContext {
    pub runtime_level: RuntimeLevel,
    pub content_context: Option<Arc<ContentContext>>,
    pub path: String,
}

#[derive(Debug, Clone)]
pub enum RoutingOutcome {
    RuntimeNotReady,
    NoActiveContext,
    NotDocumentRequest,
    NoContent(RouteValueDictionary),
    Resolved(RouteValues),
}

impl RoutingOutcome {
    pub fn route_values(&self) -> RouteValueDictionary {
        match self {
            Self::RuntimeNotReady | Self::NoActiveContext | Self::NotDocumentRequest => {
                RouteValueDictionary::new()
            }
            Self::NoContent(values) => values.clone(),
            Self::Resolved(values) => values.to_dictionary(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuntimeNotReady => "runtime_not_ready",
            Self::NoActiveContext => "no_active_context",
            Self::NotDocumentRequest => "not_document_request",
            Self::NoContent(_) => "no_content",
            Self::Resolved(_) => "resolved",
        }
    }
}

enum Stage<'a> {
    Gate,
    Classify(&'a ContentContext),
    ContentCheck(&'a ContentContext),
    Routing(&'a ContentContext),
    BuildValues(&'a ContentContext, PublishedRequest),
}

enum Step<'a> {
    Next(Stage<'a>),
    Done(RoutingOutcome),
}

pub struct RouteValueTransformer {
    runtime: Arc<dyn RuntimeState>,
    filter: Arc<dyn RoutableDocumentFilter>,
    router: Arc<dyn PublishedRouter>,
    factory: RouteValuesFactory,
}

impl RouteValueTransformer {
    pub fn new(
        runtime: Arc<dyn RuntimeState>,
        filter: Arc<dyn RoutableDocumentFilter>,
        router: Arc<dyn PublishedRouter>,
        factory: RouteValuesFactory,
    ) -> Self {
        Self {
            runtime,
            filter,
            router,
            factory,
        }
    }

    /// Snapshot the runtime level and pick up the content context attached upstream.
    pub fn capture(&self, extensions: &Extensions, path: &str) -> RoutableRequestContext {
        RoutableRequestContext {
            runtime_level: self.runtime.level(),
            content_context: extensions.get::<Arc<ContentContext>>().cloned(),
            path: path.to_string(),
        }
    }

    pub async fn transform(
        &self,
        request: &RoutableRequestContext,
    ) -> RoutingResult<RoutingOutcome> {
        let mut stage = Stage::Gate;

        let outcome = loop {
            let step = match stage {
                Stage::Gate => {
                    let ctx = request.content_context.as_deref();
                    let attempt =
                        gate::should_attempt_routing(request.runtime_level, ctx.is_some());
                    match (attempt, ctx) {
                        (true, Some(ctx)) => Step::Next(Stage::Classify(ctx)),
                        _ if !request.runtime_level.is_running() => {
                            Step::Done(RoutingOutcome::RuntimeNotReady)
                        }
                        _ => Step::Done(RoutingOutcome::NoActiveContext),
                    }
                }
                Stage::Classify(ctx) => {
                    if self.filter.is_document_request(&request.path) {
                        Step::Next(Stage::ContentCheck(ctx))
                    } else {
                        Step::Done(RoutingOutcome::NotDocumentRequest)
                    }
                }
                Stage::ContentCheck(ctx) => {
                    if ctx.content().has_content() {
                        Step::Next(Stage::Routing(ctx))
                    } else {
                        Step::Done(RoutingOutcome::NoContent(self.factory.no_content()))
                    }
                }
                Stage::Routing(ctx) => {
                    if ctx.published_request().is_some() {
                        return Err(RoutingError::AlreadyRouted);
                    }
                    match router::route(self.router.as_ref(), ctx).await {
                        Ok(published) => Step::Next(Stage::BuildValues(ctx, published)),
                        Err(err) => {
                            tracing::error!(
                                error = %err,
                                path = %request.path,
                                "content routing failed"
                            );
                            return Err(err);
                        }
                    }
                }
                Stage::BuildValues(ctx, published) => {
                    let published = Arc::new(published);
                    let values = self.factory.create(Arc::clone(&published));
                    ctx.set_published_request(published)?;
                    Step::Done(RoutingOutcome::Resolved(values))
                }
            };

            match step {
                Step::Next(next) => stage = next,
                Step::Done(outcome) => break outcome,
            }
        };

        tracing::debug!(
            path = %request.path,
            runtime_level = %request.runtime_level,
            outcome = outcome.as_str(),
            "route values transformed"
        );

        Ok(outcome)
    }

    /// Transform the request whose extensions are given.
    ///
    /// Resolved values are also stored in the extensions as [`RouteValues`] so handlers
    /// can read the resolution result without routing again.
    pub async fn transform_request(
        &self,
        extensions: &mut Extensions,
        path: &str,
    ) -> RoutingResult<RouteValueDictionary> {
        let request = self.capture(extensions, path);
        let outcome = self.transform(&request).await?;
        let values = outcome.route_values();

        if let RoutingOutcome::Resolved(route_values) = outcome {
            extensions.insert(route_values);
        }

        Ok(values)
    }
}
