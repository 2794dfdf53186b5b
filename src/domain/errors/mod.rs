//! Domain error types.

mod cache_error;
mod image_error;

pub use cache_error::{CacheError, CacheResult};
pub use image_error::ImageError;
