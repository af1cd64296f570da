/*
 * Responsibility
 * - website (content) endpoints: every request that is not back office
 */
pub mod dto;
pub mod render;

pub use render::render;
