use serde::Serialize;

use crate::services::routing::PublishedContent;

#[derive(Debug, Serialize)]
pub struct RenderedPage {
    pub controller: String,
    pub action: String,
    pub template: Option<String>,
    pub culture: Option<String>,
    pub url: String,
    pub content: Option<PublishedContent>,
}

#[derive(Debug, Serialize)]
pub struct NoContentNotice {
    pub status: &'static str,
    pub message: &'static str,
}
