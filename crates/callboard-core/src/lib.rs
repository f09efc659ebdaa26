//! Record store, filtering, presentation and usage metrics for the callboard
//! call and messaging dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod metrics;
pub mod presenter;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use filter::{SearchQuery, ViewFilter};
pub use metrics::{StatusBreakdown, UsageMeter, UsageSummary};
pub use presenter::{Badge, DisplayOptions, TablePresenter};
pub use store::{Dataset, DatasetSeed, RecordStore};
pub use types::{CallRecord, Channel, InvoiceRecord, MessageRecord, MessageTemplate};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter directive or a global
/// subscriber is already installed.
pub fn init_logging(logging: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| Error::Configuration {
            message: format!("invalid log level {:?}: {e}", logging.level),
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| Error::Other(format!("failed to install log subscriber: {e}")))
}
