//! Domain entity definitions.

mod clear;
mod fetch;
mod image_id;
mod tier;

pub use clear::{ClearOutcome, ClearTarget};
pub use fetch::{FetchDescriptor, FetchTarget, Headers, LOCAL_ASSET_SCHEME};
pub use image_id::ImageId;
pub use tier::{CacheTier, EngineSource, LoadOutcome};
