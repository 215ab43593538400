//! Logging setup
//!
//! Logs go to stderr so tables on stdout stay machine-readable.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `mileage=warn`)
//! - `MILEAGE_LOG_FORMAT`: `pretty` (default) or `json`

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "mileage=warn";

pub fn init() {
    let log_format = std::env::var("MILEAGE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match log_format.as_str() {
        "json" => {
            // Structured logging for scripted use
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
