use mysh::conf::{self, ConfigurationModel};
use mysh::control;
use std::error::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "MYSH_LOG";

/// Entry point that starts the control loop.
fn main() -> Result<(), Box<dyn Error>> {
    let config = conf::load();
    init_tracing(&config);
    match config.source_path() {
        Some(path) => debug!(path = %path.display(), "loaded configuration"),
        None => debug!("using default configuration"),
    }
    control::control_loop(&config)
}

fn init_tracing(config: &ConfigurationModel) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(config.log.level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
