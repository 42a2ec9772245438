//! Pure computations over fetched reading windows. Nothing in here touches
//! the store.

pub mod daily;
pub mod energy;
pub mod rounding;

pub use daily::{aggregate_by_day, normalize_store_aggregates};
pub use energy::{integrate, integrate_energy_wh, Integration};
pub use rounding::round_fixed;
