//! Penguin species predictor. Loads the fitted artifacts, then serves the
//! form page and WebSocket IPC bridge.

use std::process::ExitCode;

use penguin_app::config::AppConfig;
use penguin_app::ws_bridge;
use penguin_core::Predictor;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::default();

    // No listener is bound until all four artifacts have loaded.
    let predictor = match Predictor::from_dir(&config.artifact_dir) {
        Ok(predictor) => predictor,
        Err(e) => {
            tracing::error!(
                artifact_dir = %config.artifact_dir.display(),
                "{e}; run the training pipeline to produce the model artifacts"
            );
            return ExitCode::FAILURE;
        }
    };

    match ws_bridge::run(&config, predictor) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
