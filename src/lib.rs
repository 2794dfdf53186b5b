//! Blasted Image - image source resolution and tiered cache orchestration.
//!
//! Resolves image URLs to bundled assets or remote locations, preloads them
//! through a memory/disk/network cache and reports which tier served each
//! request. Memory and disk tiers can be cleared on the execution contexts
//! they require.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the resolution and cache orchestration core.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for the engine and host.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "blasted-image";
