//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infrastructure::image::ImageEngineConfig;

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "blasted-image";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "xerdnu";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit diagnostic events along the resolution path.
    #[serde(default = "default_true")]
    pub verbose: bool,

    /// Bundled asset configuration.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Cache tier configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Network configuration.
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Bundled asset configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding the `blasted-image/` asset tree.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Try bundled assets before the network.
    #[serde(default)]
    pub prefer_local_assets: bool,

    /// Remote prefix mapped onto the bundled asset root.
    #[serde(default)]
    pub cloud_prefix: Option<String>,
}

/// Cache tier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Disk cache directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Memory budget in decoded bytes.
    #[serde(default = "default_memory_cache_bytes")]
    pub memory_cache_bytes: usize,

    /// Disk budget in bytes.
    #[serde(default = "default_disk_cache_bytes")]
    pub disk_cache_bytes: u64,

    /// Cached resources are downscaled to fit this size.
    #[serde(default = "default_max_resource_dimension")]
    pub max_resource_dimension: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            memory_cache_bytes: default_memory_cache_bytes(),
            disk_cache_bytes: default_disk_cache_bytes(),
            max_resource_dimension: default_max_resource_dimension(),
        }
    }
}

/// Network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent for image requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_memory_cache_bytes() -> usize {
    100 * 1024 * 1024
}

fn default_disk_cache_bytes() -> u64 {
    1024 * 1024 * 1024
}

fn default_max_resource_dimension() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION"))
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(verbose) = args.verbose {
            self.verbose = verbose;
        }
        if let Some(root) = &args.assets_dir {
            self.assets.root = Some(root.clone());
        }
        if let Some(dir) = &args.cache_dir {
            self.cache.dir = Some(dir.clone());
        }
    }

    /// Returns default image cache directory.
    #[must_use]
    pub fn default_cache_dir() -> PathBuf {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
            || std::env::temp_dir().join(APP_NAME).join("cache"),
            |dirs| dirs.cache_dir().join("images"),
        )
    }

    /// Returns effective asset root; the working directory when unset.
    #[must_use]
    pub fn effective_assets_root(&self) -> PathBuf {
        self.assets
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Builds the engine configuration.
    #[must_use]
    pub fn engine_config(&self) -> ImageEngineConfig {
        let cache_dir = self.cache.dir.clone().unwrap_or_else(Self::default_cache_dir);
        ImageEngineConfig {
            memory_cache_bytes: self.cache.memory_cache_bytes,
            disk_cache_bytes: self.cache.disk_cache_bytes,
            max_resource_dimension: self.cache.max_resource_dimension,
            timeout_secs: self.network.timeout_secs,
            user_agent: self.network.user_agent.clone(),
            ..ImageEngineConfig::new(cache_dir)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            verbose: true,
            assets: AssetsConfig::default(),
            cache: CacheConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}
