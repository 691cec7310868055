use thiserror::Error;

use crate::import::RecognitionError;
use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("recognition failed: {0}")]
    Recognition(#[from] RecognitionError),

    #[error("session has no card left to rate")]
    SessionFinished,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
