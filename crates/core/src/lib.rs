pub mod config;
pub mod error;
pub mod types;

pub use config::InsightsConfig;
pub use error::{InsightsError, InsightsResult};
