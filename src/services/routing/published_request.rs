use std::collections::BTreeMap;

use axum::http::StatusCode;
use url::Url;

use super::PublishedContent;

/// Controller/action pair the dispatch layer should hand the request to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerDescriptor {
    pub controller_name: String,
    pub action_name: String,
}

impl HandlerDescriptor {
    pub fn new(controller_name: impl Into<String>, action_name: impl Into<String>) -> Self {
        Self {
            controller_name: controller_name.into(),
            action_name: action_name.into(),
        }
    }
}

/// Mutable request under resolution; the engine fills it in and calls [`build`].
///
/// [`build`]: PublishedRequestBuilder::build
#[derive(Debug, Clone)]
pub struct PublishedRequestBuilder {
    uri: Url,
    published_content: Option<PublishedContent>,
    handler: Option<HandlerDescriptor>,
    template_alias: Option<String>,
    culture: Option<String>,
    response_status: StatusCode,
    extra: BTreeMap<String, String>,
}

impl PublishedRequestBuilder {
    pub fn new(uri: Url) -> Self {
        Self {
            uri,
            published_content: None,
            handler: None,
            template_alias: None,
            culture: None,
            response_status: StatusCode::OK,
            extra: BTreeMap::new(),
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn published_content(&self) -> Option<&PublishedContent> {
        self.published_content.as_ref()
    }

    pub fn set_published_content(&mut self, content: PublishedContent) -> &mut Self {
        self.template_alias = content.template_alias.clone();
        self.published_content = Some(content);
        self
    }

    pub fn set_handler(&mut self, handler: HandlerDescriptor) -> &mut Self {
        self.handler = Some(handler);
        self
    }

    pub fn set_template_alias(&mut self, alias: Option<String>) -> &mut Self {
        self.template_alias = alias;
        self
    }

    pub fn set_culture(&mut self, culture: impl Into<String>) -> &mut Self {
        self.culture = Some(culture.into());
        self
    }

    pub fn set_response_status(&mut self, status: StatusCode) -> &mut Self {
        self.response_status = status;
        self
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> PublishedRequest {
        PublishedRequest {
            uri: self.uri,
            published_content: self.published_content,
            handler: self.handler,
            template_alias: self.template_alias,
            culture: self.culture,
            response_status: self.response_status,
            extra: self.extra,
        }
    }
}

/// Outcome of resolving a request against the content tree. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRequest {
    uri: Url,
    published_content: Option<PublishedContent>,
    handler: Option<HandlerDescriptor>,
    template_alias: Option<String>,
    culture: Option<String>,
    response_status: StatusCode,
    extra: BTreeMap<String, String>,
}

impl PublishedRequest {
    /// A resolved request with no content and a 404 status.
    pub fn not_found(uri: Url) -> Self {
        let mut builder = PublishedRequestBuilder::new(uri);
        builder.set_response_status(StatusCode::NOT_FOUND);
        builder.build()
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn published_content(&self) -> Option<&PublishedContent> {
        self.published_content.as_ref()
    }

    pub fn has_published_content(&self) -> bool {
        self.published_content.is_some()
    }

    pub fn handler(&self) -> Option<&HandlerDescriptor> {
        self.handler.as_ref()
    }

    pub fn template_alias(&self) -> Option<&str> {
        self.template_alias.as_deref()
    }

    pub fn culture(&self) -> Option<&str> {
        self.culture.as_deref()
    }

    pub fn response_status(&self) -> StatusCode {
        self.response_status
    }

    /// Auxiliary values the engine wants forwarded to the handler.
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}
