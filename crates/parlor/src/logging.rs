use std::env;

use color_eyre::Result;
use lazy_static::lazy_static;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

lazy_static! {
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", paths::APP_ID.to_uppercase());
}

/// Writes tracing output into a timestamped file under the data directory.
/// The filter comes from `PARLOR_LOG_LEVEL`, falling back to `RUST_LOG`,
/// falling back to info for this crate.
pub fn init() -> Result<()> {
    let directory = paths::logs_dir();
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(paths::log_file_now())?;

    let filter = env::var(LOG_ENV.clone())
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")));

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();
    Ok(())
}
