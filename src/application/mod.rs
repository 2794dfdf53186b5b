//! Application layer with the resolution and cache orchestration core.

/// Data transfer objects.
pub mod dto;
/// Resolution, orchestration and clearing services.
pub mod services;
/// Caller-facing operations.
pub mod use_cases;

pub use dto::{LoadRequest, PreloadReport};
pub use services::{CacheClearer, CacheOrchestrator, RequestBuilder};
pub use use_cases::BlastedImage;
