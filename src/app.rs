use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::forecaster::Forecaster;
use crate::llm::{CompletionModel, OpenAiCompletionModel};
use crate::prompt::PromptError;
use crate::routes;

// Anything that goes in here must be a handle or pointer that can be cloned.
// Nothing behind these handles is mutated while serving.
#[derive(Clone)]
pub struct AppState {
    pub forecaster: Arc<Forecaster>,
}

impl AppState {
    pub fn new(model: Arc<dyn CompletionModel>) -> Result<AppState, PromptError> {
        Ok(AppState {
            forecaster: Arc::new(Forecaster::new(model)?),
        })
    }

    pub fn from_config(config: &Config) -> Result<AppState, PromptError> {
        AppState::new(Arc::new(OpenAiCompletionModel::new(config)))
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .nest("/forecast", routes::forecast::routes(state))
        .layer(TraceLayer::new_for_http())
}
