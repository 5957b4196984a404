use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::error::Error;

const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Wrapper around the crate [`Error`] that implements
/// `actix_web::ResponseError`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            // 400 - relay side failures and rejected input, message passed on
            Error::Relay { .. }
            | Error::RelayClosed { .. }
            | Error::WS(_)
            | Error::TokioElapsedError(_)
            | Error::PayloadParse { .. }
            | Error::InvalidOption { .. } => StatusCode::BAD_REQUEST,

            // 500 - everything else
            Error::Io(_)
            | Error::URL(_)
            | Error::TokioJoinError(_)
            | Error::JsonError(_)
            | Error::SetGlobalDefaultError(_)
            | Error::ConfigurationError(_)
            | Error::TaskError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        error!("Request failed ({}): {}", status.as_u16(), self.0);

        let message = if status == StatusCode::BAD_REQUEST {
            self.0.to_string()
        } else {
            String::from(UNEXPECTED_ERROR)
        };
        HttpResponse::build(status).json(serde_json::json!({ "error": message }))
    }
}
