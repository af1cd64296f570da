use thiserror::Error;

/// Failures surfaced by routing. Terminal routing outcomes (runtime not ready, not a
/// document, no content) are not errors.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("content resolution failed: {0}")]
    Resolution(String),

    #[error("a published request was already assigned to this request")]
    AlreadyRouted,
}

pub type RoutingResult<T> = Result<T, RoutingError>;
