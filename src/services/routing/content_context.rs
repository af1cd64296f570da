/*
 * Responsibility
 * - Request-scoped content serving context (ContentContext)
 *   - original / cleaned request url, the content cache, the resolved PublishedRequest
 * - Factory that opens one context per request
 *
 * Notes
 * - Middleware stores it in request extensions as Arc<ContentContext>; it is never
 *   shared between requests
 * - The PublishedRequest slot is write-once
 */
use std::fmt;
use std::sync::{Arc, OnceLock};

use url::Url;

use super::{PublishedContentCache, PublishedRequest, RoutingError};

pub struct ContentContext {
    original_request_url: Url,
    cleaned_url: Url,
    content: Arc<dyn PublishedContentCache>,
    published_request: OnceLock<Arc<PublishedRequest>>,
}

impl ContentContext {
    pub fn new(original_request_url: Url, content: Arc<dyn PublishedContentCache>) -> Self {
        let cleaned_url = clean_url(&original_request_url);
        Self {
            original_request_url,
            cleaned_url,
            content,
            published_request: OnceLock::new(),
        }
    }

    pub fn original_request_url(&self) -> &Url {
        &self.original_request_url
    }

    pub fn cleaned_url(&self) -> &Url {
        &self.cleaned_url
    }

    pub fn content(&self) -> &dyn PublishedContentCache {
        self.content.as_ref()
    }

    pub fn published_request(&self) -> Option<&Arc<PublishedRequest>> {
        self.published_request.get()
    }

    /// Assign the resolved request. Fails if one was already assigned for this request.
    pub fn set_published_request(
        &self,
        request: Arc<PublishedRequest>,
    ) -> Result<(), RoutingError> {
        self.published_request
            .set(request)
            .map_err(|_| RoutingError::AlreadyRouted)
    }
}

impl fmt::Debug for ContentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentContext")
            .field("original_request_url", &self.original_request_url.as_str())
            .field("cleaned_url", &self.cleaned_url.as_str())
            .field("published_request", &self.published_request.get())
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ContentContextFactory {
    base_url: Url,
    content: Arc<dyn PublishedContentCache>,
}

impl ContentContextFactory {
    pub fn new(base_url: Url, content: Arc<dyn PublishedContentCache>) -> Self {
        Self { base_url, content }
    }

    /// Open a context for a request target such as `/blog/post?page=2`.
    pub fn create(&self, path_and_query: &str) -> Result<ContentContext, url::ParseError> {
        let url = self.base_url.join(path_and_query)?;
        Ok(ContentContext::new(url, Arc::clone(&self.content)))
    }
}

impl fmt::Debug for ContentContextFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentContextFactory")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Lower-case path without trailing slash; the root stays `/`.
pub fn clean_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/').to_lowercase();
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed
    } else {
        format!("/{trimmed}")
    }
}

/// Url used for content lookups: cleaned path, query kept, fragment dropped.
pub fn clean_url(url: &Url) -> Url {
    let mut cleaned = url.clone();
    cleaned.set_path(&clean_path(url.path()));
    cleaned.set_fragment(None);
    cleaned
}
