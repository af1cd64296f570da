/*
 * Responsibility
 * - Well-known handler names (default render, no content, not found)
 * - Registry of content-type specific controllers ("route hijacking")
 *   - content type alias -> controller, template alias -> action when declared
 */
use std::collections::HashMap;
use std::str::FromStr;

use super::{HandlerDescriptor, PublishedContent};

pub const RENDER_CONTROLLER: &str = "Render";
pub const RENDER_NO_CONTENT_CONTROLLER: &str = "RenderNoContent";
pub const RENDER_NOT_FOUND_CONTROLLER: &str = "RenderNotFound";
pub const DEFAULT_ACTION: &str = "Index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerRegistration {
    pub content_type_alias: String,
    pub controller_name: String,
    pub actions: Vec<String>,
}

impl FromStr for ControllerRegistration {
    type Err = String;

    /// `alias=Controller` or `alias=Controller:ActionA|ActionB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (alias, target) = s
            .split_once('=')
            .ok_or_else(|| format!("expected alias=Controller, got {s:?}"))?;
        let (controller, actions) = match target.split_once(':') {
            Some((controller, actions)) => (controller, actions),
            None => (target, ""),
        };

        let alias = alias.trim();
        let controller = controller.trim();
        if alias.is_empty() || controller.is_empty() {
            return Err(format!("expected alias=Controller, got {s:?}"));
        }

        Ok(Self {
            content_type_alias: alias.to_string(),
            controller_name: controller.to_string(),
            actions: actions
                .split('|')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    by_alias: HashMap<String, ControllerRegistration>,
}

impl HandlerRegistry {
    pub fn new(registrations: impl IntoIterator<Item = ControllerRegistration>) -> Self {
        let by_alias = registrations
            .into_iter()
            .map(|r| (r.content_type_alias.to_ascii_lowercase(), r))
            .collect();
        Self { by_alias }
    }

    pub fn default_handler() -> HandlerDescriptor {
        HandlerDescriptor::new(RENDER_CONTROLLER, DEFAULT_ACTION)
    }

    pub fn not_found_handler() -> HandlerDescriptor {
        HandlerDescriptor::new(RENDER_NOT_FOUND_CONTROLLER, DEFAULT_ACTION)
    }

    pub fn resolve(&self, content: &PublishedContent) -> HandlerDescriptor {
        let Some(registration) = self
            .by_alias
            .get(&content.content_type_alias.to_ascii_lowercase())
        else {
            return Self::default_handler();
        };

        let action = content
            .template_alias
            .as_deref()
            .and_then(|template| {
                registration
                    .actions
                    .iter()
                    .find(|a| a.eq_ignore_ascii_case(template))
            })
            .map(String::as_str)
            .unwrap_or(DEFAULT_ACTION);

        HandlerDescriptor::new(&registration.controller_name, action)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn content(alias: &str, template: Option<&str>) -> PublishedContent {
        PublishedContent {
            id: 1,
            key: Uuid::new_v4(),
            name: "n".into(),
            route: "/n".into(),
            content_type_alias: alias.into(),
            template_alias: template.map(str::to_string),
            culture: None,
        }
    }

    #[test]
    fn parses_registrations() {
        let r: ControllerRegistration = "blogPost=BlogPost:Index|Amp".parse().unwrap();
        assert_eq!(r.content_type_alias, "blogPost");
        assert_eq!(r.controller_name, "BlogPost");
        assert_eq!(r.actions, vec!["Index", "Amp"]);

        let r: ControllerRegistration = " home = Home ".parse().unwrap();
        assert!(r.actions.is_empty());

        assert!("home".parse::<ControllerRegistration>().is_err());
        assert!("=Home".parse::<ControllerRegistration>().is_err());
    }

    #[test]
    fn resolves_hijacked_controller_and_template_action() {
        let registration: ControllerRegistration = "blogPost=BlogPost:Amp".parse().unwrap();
        let registry = HandlerRegistry::new([registration]);

        assert_eq!(
            registry.resolve(&content("BlogPost", Some("amp"))),
            HandlerDescriptor::new("BlogPost", "Amp")
        );
        assert_eq!(
            registry.resolve(&content("blogPost", Some("Print"))),
            HandlerDescriptor::new("BlogPost", DEFAULT_ACTION)
        );
        assert_eq!(
            registry.resolve(&content("textPage", Some("Amp"))),
            HandlerRegistry::default_handler()
        );
    }
}
