/*
 * Responsibility
 * - Content routing for website requests
 *   - runtime gate, document classification, engine, route values, transformer
 * - Request-scoped ContentContext that carries the resolved PublishedRequest
 */
pub mod content_cache;
pub mod content_context;
pub mod document_filter;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod published_request;
pub mod route_values;
pub mod router;
pub mod runtime;
pub mod transformer;

pub use content_cache::{
    ContentCacheError, InMemoryContentCache, PublishedContent, PublishedContentCache,
};
pub use content_context::{ContentContext, ContentContextFactory, clean_path, clean_url};
pub use document_filter::{ReservedPathFilter, RoutableDocumentFilter};
pub use error::{RoutingError, RoutingResult};
pub use handlers::{ControllerRegistration, HandlerRegistry};
pub use published_request::{HandlerDescriptor, PublishedRequest, PublishedRequestBuilder};
pub use route_values::{RouteValueDictionary, RouteValues, RouteValuesFactory};
pub use router::{ContentFinderRouter, PublishedRouter};
pub use runtime::{RuntimeLevel, RuntimeState, RuntimeStatus};
pub use transformer::{RoutableRequestContext, RouteValueTransformer, RoutingOutcome};
