/*
 * Responsibility
 * - RouteValues: handler selection for a resolved request (+ the PublishedRequest itself)
 * - RouteValueDictionary: flat key/value view handed to the dispatch layer
 * - RouteValuesFactory: derive values from a PublishedRequest / the fixed no-content values
 */
use std::collections::BTreeMap;
use std::sync::Arc;

use super::handlers::{DEFAULT_ACTION, RENDER_NO_CONTENT_CONTROLLER};
use super::{HandlerDescriptor, HandlerRegistry, PublishedRequest};

pub const CONTROLLER_KEY: &str = "controller";
pub const ACTION_KEY: &str = "action";
pub const TEMPLATE_KEY: &str = "template";

/// Empty means "not ours": the request falls through to normal endpoint handling.
pub type RouteValueDictionary = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct RouteValues {
    published_request: Arc<PublishedRequest>,
    handler: HandlerDescriptor,
    template_name: Option<String>,
    extra: BTreeMap<String, String>,
}

impl RouteValues {
    pub fn published_request(&self) -> &Arc<PublishedRequest> {
        &self.published_request
    }

    pub fn controller_name(&self) -> &str {
        &self.handler.controller_name
    }

    pub fn action_name(&self) -> &str {
        &self.handler.action_name
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }

    pub fn to_dictionary(&self) -> RouteValueDictionary {
        let mut values = self.extra.clone();
        if let Some(template) = &self.template_name {
            values.insert(TEMPLATE_KEY.to_string(), template.clone());
        }
        values.insert(CONTROLLER_KEY.to_string(), self.controller_name().to_string());
        values.insert(ACTION_KEY.to_string(), self.action_name().to_string());
        values
    }
}

#[derive(Debug, Clone)]
pub struct RouteValuesFactory {
    default_handler: HandlerDescriptor,
    no_content_handler: HandlerDescriptor,
}

impl Default for RouteValuesFactory {
    fn default() -> Self {
        Self {
            default_handler: HandlerRegistry::default_handler(),
            no_content_handler: HandlerDescriptor::new(
                RENDER_NO_CONTENT_CONTROLLER,
                DEFAULT_ACTION,
            ),
        }
    }
}

impl RouteValuesFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values used when nothing at all is published: exactly controller + action.
    pub fn no_content(&self) -> RouteValueDictionary {
        RouteValueDictionary::from([
            (
                CONTROLLER_KEY.to_string(),
                self.no_content_handler.controller_name.clone(),
            ),
            (
                ACTION_KEY.to_string(),
                self.no_content_handler.action_name.clone(),
            ),
        ])
    }

    /// Values for a resolved request. Requests without a handler get the default one.
    pub fn create(&self, published_request: Arc<PublishedRequest>) -> RouteValues {
        let handler = published_request
            .handler()
            .cloned()
            .unwrap_or_else(|| self.default_handler.clone());
        let template_name = published_request.template_alias().map(str::to_string);
        let extra = published_request.extra().clone();

        RouteValues {
            published_request,
            handler,
            template_name,
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::services::routing::PublishedRequestBuilder;

    fn url() -> Url {
        Url::parse("http://example.com/").unwrap()
    }

    #[test]
    fn no_content_has_exactly_two_entries() {
        let values = RouteValuesFactory::new().no_content();

        assert_eq!(values.len(), 2);
        assert_eq!(values[CONTROLLER_KEY], "RenderNoContent");
        assert_eq!(values[ACTION_KEY], "Index");
    }

    #[test]
    fn handler_from_request_wins_over_default() {
        let mut builder = PublishedRequestBuilder::new(url());
        builder
            .set_handler(HandlerDescriptor::new("BlogPost", "Amp"))
            .set_template_alias(Some("Amp".into()))
            .set_value("culture", "en-US");
        let request = Arc::new(builder.build());

        let values = RouteValuesFactory::new().create(Arc::clone(&request));

        assert!(Arc::ptr_eq(values.published_request(), &request));
        let dict = values.to_dictionary();
        assert_eq!(dict[CONTROLLER_KEY], "BlogPost");
        assert_eq!(dict[ACTION_KEY], "Amp");
        assert_eq!(dict[TEMPLATE_KEY], "Amp");
        assert_eq!(dict["culture"], "en-US");
    }

    #[test]
    fn request_without_handler_uses_default() {
        let published = PublishedRequestBuilder::new(url()).build();
        let values = RouteValuesFactory::new().create(Arc::new(published));

        assert_eq!(values.controller_name(), "Render");
        assert_eq!(values.action_name(), "Index");
        assert_eq!(values.to_dictionary().len(), 2);
    }
}
