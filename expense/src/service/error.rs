use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// User-correctable input problem, reported before anything is written.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
