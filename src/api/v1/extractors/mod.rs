/**
 * Responsibility
 *  - extractor types handed to the handlers
 */
mod view_params;

pub use view_params::ViewParams;
