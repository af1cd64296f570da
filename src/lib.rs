//! Content gateway: routes website requests to published content and guards the
//! back office API with verified back office identities.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
