use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    RepoError(#[from] estore_service::error::RepoError),

    #[error(transparent)]
    DatabaseError(#[from] estore_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] estore_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
