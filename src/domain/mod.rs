/*
 * Responsibility
 * - canonical types shared by services and the HTTP layer
 */
pub mod post;
pub mod view;

pub use post::Post;
pub use view::{SortKey, TagFilter, ViewParameters};
