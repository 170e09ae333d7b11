/**
 * Responsibility
 * - what a row source failure means to the layers above
 * - PostService recovers from every variant with the fallback set (never surfaced)
 */
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("row source timed out after {0:?}")]
    Timeout(Duration),
    #[error("row source unavailable: {0}")]
    Unavailable(&'static str),
}

pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_keep_the_driver_message() {
        let err = RepoError::from(sqlx::Error::RowNotFound);
        let driver = sqlx::Error::RowNotFound.to_string();
        assert_eq!(err.to_string(), format!("db error: {driver}"));
    }
}
