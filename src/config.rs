use clap::Parser;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Completion model to request forecasts from.
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base url of the completion API, without the trailing `/completions`.
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not defined. Exiting...")]
    MissingApiKey,
}

/// Process wide settings. Built once in `main` and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Config, ConfigError> {
        let api_key = args
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(Config {
            port: args.port,
            api_key,
            model: args.model,
            api_base: args.api_base.trim_end_matches('/').to_string(),
        })
    }
}
