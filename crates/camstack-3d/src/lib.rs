#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Multi-camera depth alignment and point cloud fusion.
pub mod align;

/// Pinhole camera models and rigid transforms.
pub mod camera;

/// Linear algebra utilities.
pub mod linalg;

/// Point cloud container.
pub mod pointcloud;

/// Camera rig configuration.
pub mod rig;

/// Depth map back-projection.
pub mod unproject;

mod utils;
