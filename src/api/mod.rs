/*
 * Responsibility
 * - HTTP surface
 *   - website: content rendering behind the routing pipeline
 *   - backoffice: back office API (health, current user, session timeout)
 */
pub mod backoffice;
pub mod website;
