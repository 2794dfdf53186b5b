//! Data transfer objects for the application layer.

mod load_dto;

pub use load_dto::{LoadRequest, PreloadReport};
