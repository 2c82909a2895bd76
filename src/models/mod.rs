pub mod config;

pub use config::{AppConfig, CacheConfig, LimitsConfig};
