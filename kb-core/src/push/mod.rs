//! Pushing built images to a registry, with a bounded number of fixed-delay retries.

mod image;
mod retry;

pub use image::*;
pub use retry::*;
