//! Resolution and cache orchestration services.

mod cache_clearer;
mod cache_orchestrator;
pub mod path_resolver;
mod request_builder;

pub use cache_clearer::CacheClearer;
pub use cache_orchestrator::{CacheOrchestrator, classify};
pub use request_builder::RequestBuilder;
