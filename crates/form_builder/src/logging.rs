use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config;

/// File logging into `<data_dir>/form-builder.log`.
///
/// The level comes from `FORM_BUILDER_LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// Nothing is written to the terminal so the TUI stays intact.
pub fn init() -> Result<()> {
    let directory = config::get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(config::LOG_FILE.clone());
    let log_file = std::fs::File::create(log_path)?;

    let builder = EnvFilter::builder().with_default_directive(tracing::Level::INFO.into());
    let env_filter = builder
        .clone()
        .with_env_var(config::LOG_ENV.clone())
        .try_from_env()
        .or_else(|_| builder.try_from_env())
        .unwrap_or_else(|_| builder.parse_lossy(""));

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}
