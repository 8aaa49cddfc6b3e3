use crate::service::error::AppError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Service error tagged with the message shown when it is an internal failure.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    failure: &'static str,
}

impl ApiError {
    pub fn new(error: AppError, failure: &'static str) -> ApiError {
        ApiError { error, failure }
    }

    pub fn bad_request(message: impl Into<String>) -> ApiError {
        ApiError::new(AppError::validation(message), "Bad request")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            AppError::Internal(_) => f.write_str(self.failure),
            other => write!(f, "{other}"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.error {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(err) = &self.error {
            log::error!(err:? = err; "{}", self.failure);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

pub trait OrFail<T> {
    /// Attaches the message reported to the caller if this is an internal failure.
    fn or_fail(self, failure: &'static str) -> Result<T, ApiError>;
}

impl<T> OrFail<T> for Result<T, AppError> {
    fn or_fail(self, failure: &'static str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::new(error, failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let err = ApiError::new(anyhow::anyhow!("/data/expenses.json: EACCES").into(), "Failed to add expense");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "Failed to add expense");
    }

    #[test]
    fn test_status_codes() {
        let validation: Result<(), AppError> = Err(AppError::validation("Place/Restaurant is required"));
        let err = validation.or_fail("Failed to add expense").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Place/Restaurant is required");

        let missing = ApiError::new(AppError::not_found("Expense not found"), "Failed to delete expense");
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "Expense not found");
    }
}
