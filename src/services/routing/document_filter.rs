/*
 * Responsibility
 * - Decide whether a request path may be resolved against the content tree
 * - Routing only consumes the boolean; the policy lives in the implementation
 */

pub trait RoutableDocumentFilter: Send + Sync {
    fn is_document_request(&self, path: &str) -> bool;
}

/// Excludes the back office, reserved prefixes (APIs, static assets, ...) and anything
/// that looks like a file (last segment has an extension).
///
/// Prefix matching is case-insensitive and segment-aware: `/api` excludes `/api` and
/// `/api/users` but not `/apiary`.
#[derive(Debug, Clone)]
pub struct ReservedPathFilter {
    reserved: Vec<String>,
}

impl ReservedPathFilter {
    pub fn new<I, S>(back_office_path: &str, reserved_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reserved = std::iter::once(back_office_path.to_string())
            .chain(reserved_paths.into_iter().map(|p| p.as_ref().to_string()))
            .map(|p| normalize_prefix(&p))
            .filter(|p| p != "/")
            .collect();

        Self { reserved }
    }

    fn is_reserved(&self, path: &str) -> bool {
        self.reserved.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

impl RoutableDocumentFilter for ReservedPathFilter {
    fn is_document_request(&self, path: &str) -> bool {
        let path = normalize_prefix(path);

        if self.is_reserved(&path) {
            return false;
        }

        let last_segment = path.rsplit('/').next().unwrap_or_default();
        !has_extension(last_segment)
    }
}

fn normalize_prefix(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/').to_ascii_lowercase();
    if trimmed.starts_with('/') {
        trimmed
    } else {
        format!("/{trimmed}")
    }
}

fn has_extension(segment: &str) -> bool {
    segment
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
}
