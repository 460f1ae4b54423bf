use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::dto::ErrorBody;

pub const GENERIC_ERROR: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// The provider answered with a non-200 status.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// The provider could not be reached. Display never includes the cause.
    #[error("Internal server error")]
    Transport(#[source] reqwest::Error),

    #[error("Internal server error")]
    InvalidProviderResponse(#[source] serde_json::Error),

    /// Filesystem failures are reported to the caller verbatim.
    #[error("{0}")]
    Storage(#[from] std::io::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Transport(_)
            | ApiError::InvalidProviderResponse(_)
            | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
