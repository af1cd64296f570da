/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http: transport concerns for every route
 * - content_context / routing: website pipeline
 * - auth: back office access guard
 */
pub mod auth;
pub mod content_context;
pub mod http;
pub mod routing;
