pub mod aggregation;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod insights;
pub mod loader;
pub mod parsers;
pub mod record;
pub mod settings;
pub mod view;

pub use dashboard::{compute_snapshot, Dashboard, DashboardSnapshot, FilterEvent};
pub use error::{DashboardError, Result};
pub use filter::{ActiveFilters, BatterySortOrder, Bounds, FilterConfig};
pub use record::{Dataset, DeviceField, DeviceRecord};
pub use settings::Settings;
