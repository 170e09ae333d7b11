/*
 * Responsibility
 * - public surface of the data access layer (row sources)
 */
pub mod error;
pub mod post_repo;

pub use error::{RepoError, RepoResult};
pub use post_repo::{PgPostSource, PostRow, PostSource, RawTags, RowQuery, UnavailableSource};
