pub mod analytics;
pub mod directory;

pub use analytics::AnalyticsService;
pub use directory::DirectoryService;
