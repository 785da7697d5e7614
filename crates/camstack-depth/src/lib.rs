#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Depth Anything V2 backed estimator.
pub mod depth_anything;

/// The depth estimator interface.
pub mod estimator;

/// Model variant selection.
pub mod model;

pub use crate::depth_anything::DepthAnything;
pub use crate::estimator::{DepthError, DepthEstimator};
pub use crate::model::DepthModel;
