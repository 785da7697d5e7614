#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use camstack_image as image;

#[doc(inline)]
pub use camstack_depth as depth;

#[doc(inline)]
pub use camstack_3d as k3d;

#[doc(inline)]
pub use camstack_viz as viz;

/// The image-to-merged-cloud fusion pipeline.
pub mod pipeline;
