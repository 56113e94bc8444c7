use axum::{
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
    Json,
};
use darkstar_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Where validated input comes from; only request bodies are validated
const PAYLOAD_SOURCE: &str = "payload";

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationDetails>,
}

#[derive(Debug, Serialize)]
pub struct ValidationDetails {
    pub source: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not Found")]
    NotFound,

    #[error("Invalid request payload JSON format")]
    MalformedJson,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedJson => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            Self::Validation(err) => ApiError {
                message: err.message,
                validation: Some(ValidationDetails {
                    source: PAYLOAD_SOURCE.to_string(),
                    keys: err.keys,
                }),
            },
            other => ApiError {
                message: other.to_string(),
                validation: None,
            },
        };

        tracing::debug!(status = status.as_u16(), message = %error.message, "Request rejected");

        (status, Json(error)).into_response()
    }
}

pub type ApiResult<T> = Result<T, AppError>;
