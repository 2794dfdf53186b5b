//! Infrastructure layer with adapters for the engine, assets and contexts.

/// Directory-backed bundled assets.
pub mod assets;
/// Application configuration.
pub mod config;
/// Default fetch/decode/cache engine.
pub mod image;
/// Event notifier adapters.
pub mod notifications;
/// Primary and background execution contexts.
pub mod scheduler;

pub use assets::BundledAssets;
pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use self::image::{ImageEngine, ImageEngineConfig, init_global};
pub use notifications::{ChannelEventNotifier, FanoutEventNotifier, TracingEventNotifier};
pub use scheduler::ThreadScheduler;
