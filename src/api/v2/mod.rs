/*
 * Responsibility
 * - public surface of the v2 write API (routes() re-export)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
