use axum::{
    Router,
    extract::{Json, State, rejection::JsonRejection},
    routing::post,
};
use log::debug;

use crate::app::AppState;
use crate::error::ForecastError;
use crate::models::forecast::{ForecastRequest, ForecastResponse};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(post_forecast))
        .with_state(state)
}

async fn post_forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<ForecastResponse>, ForecastError> {
    // A body we can't read as JSON has no location either.
    let request = payload.map(|Json(request)| request).unwrap_or_else(|rejection| {
        debug!("Rejected forecast request body: {rejection}");
        ForecastRequest::default()
    });
    let location = request.location()?;
    let result = state.forecaster.forecast(location).await?;
    Ok(Json(ForecastResponse { result }))
}
