use super::RuntimeLevel;

/// Whether a request may be routed against the content tree at all.
///
/// Routing only happens while the runtime is in its normal operating level and an
/// active content context was attached to the request upstream.
pub fn should_attempt_routing(runtime_level: RuntimeLevel, has_active_context: bool) -> bool {
    runtime_level.is_running() && has_active_context
}
