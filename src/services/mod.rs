pub mod fallback;
pub mod listing;
pub mod normalizer;
pub mod post_service;

pub use fallback::FallbackPosts;
pub use post_service::PostService;
