use std::{path::PathBuf, sync::Arc};

use candle_core::{DType, Device, Module, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::depth_anything_v2::DepthAnythingV2;
use candle_transformers::models::dinov2;

use camstack_image::normalize::{cast_and_scale, normalize_mean_std, normalize_min_max};
use camstack_image::resize::{resize_depth, resize_rgb, InterpolationMode};
use camstack_image::{DepthMap, ImageSize, RgbImage};

use crate::estimator::{DepthError, DepthEstimator};
use crate::model::DepthModel;

// taken from: https://huggingface.co/spaces/depth-anything/Depth-Anything-V2/blob/main/depth_anything_v2/dpt.py#L207
const MAGIC_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const MAGIC_STD: [f32; 3] = [0.229, 0.224, 0.225];

const DINO_IMG_SIZE: usize = 518;

const DINOV2_HUB_REPO: &str = "lmz/candle-dino-v2";
const DEPTH_ANYTHING_HUB_REPO: &str = "jeroenvlek/depth-anything-v2-safetensors";

/// The default metric range the network's relative depth is mapped into.
pub const DEFAULT_MAX_DEPTH: f32 = 10.0;

/// Resize and normalize an image into the NCHW tensor the network expects.
fn preprocess(image: &RgbImage, device: &Device) -> Result<Tensor, DepthError> {
    let new_size = ImageSize {
        width: DINO_IMG_SIZE,
        height: DINO_IMG_SIZE,
    };
    let resized = resize_rgb(image, new_size, InterpolationMode::Bilinear)?;

    // cast to f32 in [0, 1] and apply the ImageNet normalization
    let mut data = cast_and_scale(&resized, 1.0 / 255.0);
    normalize_mean_std(&mut data, &MAGIC_MEAN, &MAGIC_STD);

    let img_t = Tensor::from_slice(&data, &[DINO_IMG_SIZE, DINO_IMG_SIZE, 3], device)?;

    // permute the image to the shape (1, c, h, w)
    let img_t = img_t.permute((2, 0, 1))?.unsqueeze(0)?;

    Ok(img_t)
}

/// Convert the network output back to a depth map at the source resolution.
///
/// The network emits relative inverse depth (larger means closer); the
/// output is min-max normalized, inverted and scaled into `[0, max_depth]`
/// so that depth increases with distance.
fn postprocess(
    depth_t: &Tensor,
    target_size: ImageSize,
    max_depth: f32,
) -> Result<DepthMap, DepthError> {
    let (_, _, rows, cols) = depth_t.dims4()?;

    let mut depth_data = depth_t.flatten_all()?.to_vec1::<f32>()?;
    normalize_min_max(&mut depth_data, 0.0, 1.0);
    for v in depth_data.iter_mut() {
        *v = max_depth * (1.0 - *v);
    }

    let depth = DepthMap::new([cols, rows].into(), depth_data)?;
    Ok(resize_depth(&depth, target_size)?)
}

/// A Depth Anything V2 monocular depth estimator running on candle.
///
/// The model is constructed once per run on whichever device is available;
/// candle inference carries no gradient state, so the network is
/// inference-only by construction.
pub struct DepthAnything {
    #[allow(unused)]
    dinov2: Arc<dinov2::DinoVisionTransformer>,
    depth_anything: DepthAnythingV2,
    device: Device,
    max_depth: f32,
}

impl DepthAnything {
    /// Create a new estimator for the given model variant.
    ///
    /// Weights are loaded from the given safetensors paths when provided,
    /// otherwise fetched from the hub cache.
    pub fn new(
        model: DepthModel,
        dinov2_model: Option<PathBuf>,
        depth_anything_model: Option<PathBuf>,
    ) -> Result<Self, DepthError> {
        // set the device to cuda if available, otherwise use cpu
        let device = match Device::cuda_if_available(0) {
            Ok(device) => device,
            Err(e) => {
                log::warn!("Failed to use CUDA, using CPU instead: {}", e);
                Device::Cpu
            }
        };

        let dinov2_model_file = match dinov2_model {
            None => {
                let api = hf_hub::api::sync::Api::new()?;
                let api = api.model(DINOV2_HUB_REPO.into());
                api.get(model.dinov2_filename())?
            }
            Some(dinov2_model) => dinov2_model,
        };

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[dinov2_model_file], DType::F32, &device)?
        };
        let (depth, embed_dim, num_heads) = model.dinov2_params();
        let dinov2 = Arc::new(dinov2::DinoVisionTransformer::new(
            vb, depth, embed_dim, num_heads,
        )?);

        let depth_anything_model_file = match depth_anything_model {
            None => {
                let api = hf_hub::api::sync::Api::new()?;
                let api = api.model(DEPTH_ANYTHING_HUB_REPO.into());
                api.get(model.depth_filename())?
            }
            Some(depth_anything_model) => depth_anything_model,
        };

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[depth_anything_model_file], DType::F32, &device)?
        };

        let depth_anything = DepthAnythingV2::new(dinov2.clone(), model.config(), vb)?;

        Ok(Self {
            dinov2,
            depth_anything,
            device,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Override the metric range the relative depth is scaled into.
    pub fn with_max_depth(mut self, max_depth: f32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl DepthEstimator for DepthAnything {
    fn infer(&mut self, image: &RgbImage) -> Result<DepthMap, DepthError> {
        let img_t = preprocess(image, &self.device)?;
        let depth_t = self.depth_anything.forward(&img_t)?;
        postprocess(&depth_t, image.size(), self.max_depth)
    }
}
