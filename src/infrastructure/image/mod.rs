//! Default image engine.
//!
//! This module provides:
//! - Memory caching with byte-bounded LRU eviction
//! - Disk caching of raw data and decoded resources
//! - The fetch/decode pipeline behind `ImageEnginePort`
//! - A process-wide engine handle

pub mod disk_cache;
pub mod engine;
pub mod global;
pub mod memory_cache;

pub use disk_cache::DiskImageCache;
pub use engine::{ImageEngine, ImageEngineConfig};
pub use global::init_global;
pub use memory_cache::MemoryImageCache;
