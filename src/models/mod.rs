pub mod analytics;
pub mod entity;
pub mod reading;

pub use analytics::*;
pub use entity::*;
pub use reading::*;
