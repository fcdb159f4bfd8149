use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

#[derive(Deserialize, Debug, Default)]
pub struct ForecastRequest {
    pub location: Option<String>,
}

impl ForecastRequest {
    pub fn location(&self) -> Result<&str, ForecastError> {
        match self.location.as_deref() {
            Some(location) if !location.is_empty() => Ok(location),
            _ => Err(ForecastError::MissingLocation),
        }
    }
}

/// The answer the model is asked to give.
#[derive(Serialize, Deserialize, JsonSchema, PartialEq, Debug, Clone)]
pub struct ForecastResult {
    /// Current temperature at the location.
    pub temperature: f64,
    /// Short description of the current weather, e.g. "Cloudy".
    pub weather: String,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct ForecastResponse {
    pub result: ForecastResult,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
