//! Shared application state

use callboard_core::{Config, Dataset, DisplayOptions, TablePresenter};
use std::sync::Arc;

/// Read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,

    /// Record sets, loaded once at startup
    pub dataset: Arc<Dataset>,

    /// Row renderer configured from `config.display`
    pub presenter: TablePresenter,
}

impl AppState {
    /// Create application state
    #[must_use]
    pub fn new(config: Config, dataset: Dataset) -> Self {
        let presenter = TablePresenter::new(DisplayOptions::from(&config.display));
        Self {
            config,
            dataset: Arc::new(dataset),
            presenter,
        }
    }

    /// Usage percentage above which billing shows a warning
    #[must_use]
    pub const fn warning_threshold(&self) -> f64 {
        self.config.billing.warning_threshold_percent
    }
}
