//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, AssetsConfig, CacheConfig, LogLevel, NetworkConfig};
pub use args::{ClearArg, CliArgs, Command};
pub use storage::{ConfigError, StorageManager};
