use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use thiserror::Error;

use crate::llm::CompletionError;
use crate::models::forecast::ErrorResponse;
use crate::output_parser::OutputParseError;
use crate::prompt::PromptError;

pub const MISSING_LOCATION_MESSAGE: &str = "Please provide a location in the request body.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("request body has no location")]
    MissingLocation,
    #[error("failed to render prompt: {0}")]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Parse(#[from] OutputParseError),
}

impl ForecastError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForecastError::MissingLocation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ForecastError::MissingLocation => MISSING_LOCATION_MESSAGE,
            cause => {
                // The cause stays in the log, callers only get the generic message.
                error!("Error encountered while processing request: {cause}");
                INTERNAL_ERROR_MESSAGE
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
