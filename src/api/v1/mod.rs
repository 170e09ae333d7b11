/*
 * Responsibility
 * - public entry point of v1 (re-exports routes())
 */
mod dto;
mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
