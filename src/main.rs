use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;

use crate::app::{AppState, create_app};
use crate::config::{Args, Config};

mod app;
mod config;
mod error;
mod forecaster;
mod llm;
mod models;
mod output_parser;
mod prompt;
mod routes;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args(Args::parse()) {
        Ok(config) => config,
        Err(err) => {
            // Fatal before serving, so it must show even with logging filtered out.
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("Failed to prepare forecast prompt: {err}");
            return ExitCode::FAILURE;
        }
    };
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!("Server is running on http://localhost:{}", config.port);
    if let Err(err) = axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
    {
        log::error!("Server on {addr} stopped: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
