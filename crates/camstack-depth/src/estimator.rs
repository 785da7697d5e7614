use camstack_image::{DepthMap, ImageError, RgbImage};

/// An error type for depth estimation.
#[derive(thiserror::Error, Debug)]
pub enum DepthError {
    /// Failed to preprocess the input image.
    #[error("Failed to preprocess the image. {0}")]
    PreprocessError(#[from] ImageError),

    /// Failure in the inference backend.
    #[error("Inference backend error. {0}")]
    TensorError(#[from] candle_core::Error),

    /// Failed to fetch model weights from the hub.
    #[error("Failed to fetch model weights. {0}")]
    HubError(#[from] hf_hub::api::sync::ApiError),

    /// The requested model name is not known.
    #[error("Unknown depth model: {0}")]
    UnknownModel(String),
}

/// A monocular depth estimator.
///
/// Implementations take an RGB image and return a dense depth map of the
/// same spatial resolution, with depth increasing away from the camera.
/// Failures are fatal to the caller: there is no retry or fallback at this
/// interface.
pub trait DepthEstimator {
    /// Infer a per-pixel depth map for the given image.
    fn infer(&mut self, image: &RgbImage) -> Result<DepthMap, DepthError>;
}
