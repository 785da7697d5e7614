#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Image and depth map containers.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Reading images from disk.
pub mod io;

/// Pixel normalization operations.
pub mod normalize;

/// Image resizing operations.
pub mod resize;

pub use crate::error::{ImageError, IoError};
pub use crate::image::{DepthMap, ImageSize, RgbImage};
