use thiserror::Error;

use estore_db::error::DbError;

/// Repository layer failures. `NotFound` and `InvalidReference` are
/// recoverable, caller-visible outcomes the HTTP layer maps to statuses;
/// `Db` wraps store failures that surface as server errors.
#[derive(Error, Debug)]
pub enum RepoError {
    /// The update target does not exist. Carries the entity type name for
    /// the "{Entity} not found." diagnostic.
    #[error("{0} not found.")]
    NotFound(&'static str),

    /// A foreign key does not resolve, or a required collection is empty.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A required field is missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

pub type RepoResult<T> = std::result::Result<T, RepoError>;

impl From<diesel::result::Error> for RepoError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(DbError::DatabaseError(err))
    }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for RepoError {
    fn from(err: diesel_async::pooled_connection::bb8::RunError) -> Self {
        Self::Db(DbError::PoolError(err))
    }
}

#[cfg(test)]
mod tests {
    use super::RepoError;

    #[test]
    fn not_found_display_names_the_entity() {
        assert_eq!(
            RepoError::NotFound("Device").to_string(),
            "Device not found."
        );
    }
}
