//! Marginalia HTTP server entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use marginalia::{AppState, MarginaliaConfig, ServiceError, serve};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServiceError> {
    let config = load_config()?;
    init_tracing(&config.log_filter)?;

    let settings = config.settings()?;
    let address = settings.bind_address;
    let state = AppState::from_settings(settings)?;
    serve(state, address).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ServiceError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<MarginaliaConfig, ServiceError> {
    MarginaliaConfig::load().map_err(|error| ServiceError::Configuration {
        message: error.to_string(),
    })
}

fn init_tracing(filter: &str) -> Result<(), ServiceError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|error| ServiceError::Configuration {
        message: format!("invalid log_filter {filter}: {error}"),
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|error| ServiceError::Configuration {
            message: format!("failed to install tracing subscriber: {error}"),
        })
}
