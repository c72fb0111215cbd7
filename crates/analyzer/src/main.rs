mod config;
mod session;
mod wiring;

use std::error::Error;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, RunMode};

const DEFAULT_LOG_FILTER: &str = "analyzer=info,api=info,trigger=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    init_tracing();

    let config = Config::from_env()?;
    config.color.apply(config.no_color);
    info!(
        base_url = %config.base_url,
        layout = config.layout.as_str(),
        locale = config.locale.as_str(),
        run_mode = config.run_mode.as_str(),
        "analyzer starting"
    );

    let mut trigger = wiring::build_trigger(&config)?;

    match config.run_mode {
        RunMode::Interactive => {
            let activations = session::run_interactive(&mut trigger).await?;
            info!(activations, "analyzer stopped");
            Ok(ExitCode::SUCCESS)
        }
        RunMode::Once => {
            let report = session::run_once(&mut trigger).await;
            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

// Diagnostics go to stderr so they never interleave with the rendered view.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
