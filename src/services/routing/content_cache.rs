/*
 * Responsibility
 * - Read-only view of the published content cache used by routing
 * - In-memory implementation, optionally seeded from a JSON snapshot
 *
 * Notes
 * - Building the content tree is someone else's job; this only serves lookups
 */
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::content_context::clean_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedContent {
    pub id: i64,
    pub key: Uuid,
    pub name: String,
    /// Url path of the node, e.g. `/blog/hello-world`.
    pub route: String,
    pub content_type_alias: String,
    #[serde(default)]
    pub template_alias: Option<String>,
    /// Culture the node is published in, when the site is multilingual.
    #[serde(default)]
    pub culture: Option<String>,
}

pub trait PublishedContentCache: Send + Sync {
    /// `false` when nothing at all is published (fresh install / empty cache).
    fn has_content(&self) -> bool;

    fn get_by_route(&self, route: &str) -> Option<PublishedContent>;
}

#[derive(Debug, Error)]
pub enum ContentCacheError {
    #[error("failed to read content snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid content snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate content route: {route}")]
    DuplicateRoute { route: String },
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryContentCache {
    by_route: HashMap<String, PublishedContent>,
}

impl InMemoryContentCache {
    pub fn new(
        items: impl IntoIterator<Item = PublishedContent>,
    ) -> Result<Self, ContentCacheError> {
        let mut by_route = HashMap::new();
        for item in items {
            let route = clean_path(&item.route);
            if by_route.contains_key(&route) {
                return Err(ContentCacheError::DuplicateRoute { route });
            }
            by_route.insert(route, item);
        }

        Ok(Self { by_route })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a JSON array of [`PublishedContent`].
    pub fn from_json_file(path: &Path) -> Result<Self, ContentCacheError> {
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<PublishedContent> = serde_json::from_str(&raw)?;
        Self::new(items)
    }

    pub fn content_count(&self) -> usize {
        self.by_route.len()
    }
}

impl PublishedContentCache for InMemoryContentCache {
    fn has_content(&self) -> bool {
        !self.by_route.is_empty()
    }

    fn get_by_route(&self, route: &str) -> Option<PublishedContent> {
        self.by_route.get(&clean_path(route)).cloned()
    }
}
