use crate::auth::credentials::CredentialsError;
use crate::auth::guard::LOGIN_PATH;
use crate::mail::MailError;
use actix_web::error::BlockingError;
use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::field::FieldError;
use log::error;
use serde_json::json;
use thiserror::Error;

/// Failures of the CSV-backed record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no record with key '{key}'")]
    NotFound { key: String },

    #[error("record file changed since it was read")]
    Conflict,

    #[error("a record with key '{key}' already exists")]
    DuplicateKey { key: String },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("malformed record file: {0}")]
    Parse(String),

    #[error("record file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => StoreError::Io(io),
            _ => StoreError::Parse(message),
        }
    }
}

/// Request-level error, rendered by actix through [`ResponseError`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid form data")]
    Validation(Vec<FieldError>),

    #[error("login required")]
    Unauthorized,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("e-mail delivery failed: {0}")]
    ExternalService(#[from] MailError),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<BlockingError> for AppError {
    fn from(e: BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::SEE_OTHER,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Conflict | StoreError::DuplicateKey { .. }) => {
                StatusCode::CONFLICT
            }
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) | AppError::Credentials(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Unauthorized => HttpResponse::SeeOther()
                .insert_header((LOCATION, LOGIN_PATH))
                .finish(),
            AppError::Validation(errors) => HttpResponse::build(status).json(json!({
                "status": "error",
                "message": "Invalid form data.",
                "errors": errors,
            })),
            AppError::ExternalService(e) => {
                error!("E-mail delivery failed: {}", e);
                HttpResponse::build(status).json(json!({
                    "status": "error",
                    "message": "Failed to send the e-mail, please try again later.",
                }))
            }
            _ if status.is_server_error() => {
                // Details stay in the log, callers get a generic message.
                error!("Request failed: {}", self);
                HttpResponse::build(status).json(json!({
                    "status": "error",
                    "message": "An unexpected error occurred.",
                }))
            }
            _ => HttpResponse::build(status).json(json!({
                "status": "error",
                "message": self.to_string(),
            })),
        }
    }
}
