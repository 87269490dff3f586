use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::{accounts::AccountError, db::StoreError, forecast::ForecastError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Credential store unavailable")]
    StoreUnavailable(#[from] StoreError),

    #[error("Internal error")]
    InternalError(String),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Store(source) => AppError::StoreUnavailable(source),
            AccountError::Hash(reason) => AppError::InternalError(reason),
        }
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        AppError::InvalidQuery(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::StoreUnavailable(source) => {
                error!(error = %source, "Credential store unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::InternalError(reason) => {
                error!(%reason, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}
