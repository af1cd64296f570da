pub mod auth;
pub mod routing;
pub mod security;
