pub mod analytics;
pub mod directory;
pub mod extract;
pub mod health;

use std::sync::Arc;

use crate::repositories::{EntityDirectory, ReadingStore};
use crate::services::{AnalyticsService, DirectoryService};

#[derive(Clone)]
pub struct AppState {
    pub analytics: AnalyticsService,
    pub directory: DirectoryService,
}

impl AppState {
    pub fn new(store: Arc<dyn ReadingStore>, directory: Arc<dyn EntityDirectory>) -> Self {
        Self {
            analytics: AnalyticsService::new(store, directory.clone()),
            directory: DirectoryService::new(directory),
        }
    }
}
