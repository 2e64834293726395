use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Model call failed: {0}")]
    ModelCallFailed(String),

    #[error("Model returned no usable text: {0}")]
    EmptyModelResponse(String),

    #[error("Malformed AI output: {0}")]
    MalformedAiOutput(String),

    #[error("Incomplete AI result: {0}")]
    IncompleteAiResult(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ModelCallFailed(_) => "MODEL_CALL_FAILED",
            AppError::EmptyModelResponse(_) => "EMPTY_MODEL_RESPONSE",
            AppError::MalformedAiOutput(_) => "MALFORMED_AI_OUTPUT",
            AppError::IncompleteAiResult(_) => "INCOMPLETE_AI_RESULT",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to clients for server-side failures, where the internal
    /// detail is only echoed in development.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(_) | AppError::ValidationError(_) => self.to_string(),
            AppError::ModelCallFailed(_) | AppError::EmptyModelResponse(_) => {
                "AI service error".to_string()
            }
            AppError::MalformedAiOutput(_) => "AI returned malformed output".to_string(),
            AppError::IncompleteAiResult(_) => "AI returned an incomplete result".to_string(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
        }
    }

    fn render(&self, expose_details: bool) -> HttpResponse {
        let status = self.status_code();
        let details = (expose_details && status.is_server_error()).then(|| self.to_string());

        HttpResponse::build(status).json(ErrorResponse {
            error: self.public_message(),
            code: status.as_u16(),
            error_code: self.error_code(),
            details,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub error_code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ModelCallFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::EmptyModelResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedAiOutput(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::IncompleteAiResult(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.render(false)
    }
}

/// An [`AppError`] paired with the environment's policy for echoing
/// internal detail back to the client.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ApiError {
    error: AppError,
    expose_details: bool,
}

impl ApiError {
    pub fn new(error: AppError, expose_details: bool) -> Self {
        Self {
            error,
            expose_details,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.error.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        self.error.render(self.expose_details)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
