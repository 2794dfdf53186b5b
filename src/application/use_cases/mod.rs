//! Use case implementations.

mod blasted_image;

pub use blasted_image::BlastedImage;
