use std::sync::Arc;

use common::config::Settings;
use common::storage::DataFile;

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub data_file: DataFile,
    pub config: Arc<Settings>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(config: Settings) -> Self {
        Self {
            data_file: DataFile::new(&config.data.path),
            config: Arc::new(config),
        }
    }
}
