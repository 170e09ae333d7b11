/*
 * Responsibility
 * - middleware applied to the whole Router (HTTP layers, CORS)
 */
pub mod cors;
pub mod http;
