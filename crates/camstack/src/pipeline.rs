use std::path::PathBuf;

use camstack_3d::align::{
    self, AlignError, CameraCloud, DEFAULT_DEPTH_THRESHOLD, DEFAULT_NEAR_SURFACE_PERCENTILE,
};
use camstack_3d::camera::{CameraIntrinsic, RigidTransform};
use camstack_3d::pointcloud::PointCloud;
use camstack_3d::rig::RigConfig;
use camstack_3d::unproject::depth_to_points;
use camstack_depth::{DepthError, DepthEstimator};
use camstack_image::io::read_image_rgb8;
use camstack_image::resize::downscale_to_fit;
use camstack_image::{ImageError, ImageSize, IoError};

/// An error type for the fusion pipeline.
///
/// There is no local recovery anywhere in the pipeline: any failure in
/// loading, inference or projection aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Failed to read an input image.
    #[error(transparent)]
    IoError(#[from] IoError),

    /// Failed to process an image buffer.
    #[error(transparent)]
    ImageError(#[from] ImageError),

    /// Depth inference failed.
    #[error(transparent)]
    DepthError(#[from] DepthError),

    /// The alignment engine rejected its inputs.
    #[error(transparent)]
    AlignError(#[from] AlignError),

    /// The number of images does not match the rig.
    #[error("Rig has {0} cameras but {1} images were provided")]
    CameraCountMismatch(usize, usize),

    /// The rig does not describe any camera.
    #[error("Rig has no cameras")]
    EmptyRig,

    /// The reference camera produced no points to anchor the alignment.
    #[error("Reference camera produced no points")]
    DegenerateReferenceCamera,
}

/// Tuning knobs for the fusion pipeline.
#[derive(Debug, Clone)]
pub struct FusionConfig {
    /// Input images larger than this are downscaled, preserving aspect ratio.
    pub max_image_size: ImageSize,
    /// Camera-local depth cutoff; points at or beyond it are discarded.
    pub depth_threshold: f64,
    /// Percentile of the depth distribution used as the near-surface anchor.
    pub near_surface_percentile: f64,
    /// Horizontal field of view assumed for the back-projection, in degrees.
    pub fov_deg: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            max_image_size: ImageSize {
                width: 1024,
                height: 1024,
            },
            depth_threshold: DEFAULT_DEPTH_THRESHOLD,
            near_surface_percentile: DEFAULT_NEAR_SURFACE_PERCENTILE,
            fov_deg: 55.0,
        }
    }
}

/// The output of a fusion run.
#[derive(Debug, Clone)]
pub struct FusionResult {
    /// The merged world-frame point cloud.
    pub cloud: PointCloud,
    /// The effective (drift-corrected) transform of each camera.
    pub transforms: Vec<RigidTransform>,
    /// The measured depth drift of each camera relative to the reference.
    pub depth_drifts: Vec<f64>,
    /// How many points each camera contributed to the merged cloud.
    pub camera_point_counts: Vec<usize>,
}

/// Run the full fusion pipeline: load each image, infer its depth,
/// back-project to a camera-local cloud, align all clouds against the
/// reference camera and merge them into one world-frame point cloud.
///
/// The estimator is initialized by the caller, once per run. Cameras whose
/// filtered cloud comes out empty contribute nothing but do not abort the
/// run; an empty reference camera is an error because the alignment has no
/// anchor without it.
pub fn run_fusion(
    image_paths: &[PathBuf],
    rig: &RigConfig,
    estimator: &mut dyn DepthEstimator,
    config: &FusionConfig,
) -> Result<FusionResult, PipelineError> {
    if rig.is_empty() {
        return Err(PipelineError::EmptyRig);
    }
    if image_paths.len() != rig.len() {
        return Err(PipelineError::CameraCountMismatch(
            rig.len(),
            image_paths.len(),
        ));
    }

    // load, infer and back-project each camera independently
    let mut clouds = Vec::with_capacity(image_paths.len());
    for (i, path) in image_paths.iter().enumerate() {
        let image = read_image_rgb8(path)?;
        let image = downscale_to_fit(&image, config.max_image_size)?;
        log::info!(
            "camera {}: {} ({})",
            i,
            path.display(),
            image.size()
        );

        let depth = estimator.infer(&image)?;
        let intrinsic = CameraIntrinsic::from_fov(config.fov_deg, image.size());

        clouds.push(CameraCloud {
            points: depth_to_points(&depth, &intrinsic),
            colors: image.to_pixel_vec(),
        });
    }

    // robust near-surface estimate per camera; the reference anchors the rest
    let reference_near = align::near_surface_depth(
        &clouds[0].points,
        config.near_surface_percentile,
    )
    .ok_or(PipelineError::DegenerateReferenceCamera)?;

    let near_surfaces = clouds
        .iter()
        .enumerate()
        .map(|(i, cloud)| {
            match align::near_surface_depth(&cloud.points, config.near_surface_percentile) {
                Some(near) => near,
                None => {
                    log::warn!("camera {} has no points, skipping drift correction", i);
                    reference_near
                }
            }
        })
        .collect::<Vec<_>>();

    let depth_drifts = align::depth_drifts(&near_surfaces);
    log::info!(
        "near surfaces: {:?}, drifts: {:?}",
        near_surfaces,
        depth_drifts
    );

    let transforms = align::effective_transforms(rig, &depth_drifts)?;

    // filter, transform and merge in camera order
    let world_clouds = clouds
        .iter()
        .zip(transforms.iter())
        .map(|(cloud, transform)| {
            align::filter_and_transform(cloud, transform, config.depth_threshold)
        })
        .collect::<Vec<_>>();

    let camera_point_counts = world_clouds.iter().map(|c| c.len()).collect::<Vec<_>>();
    let cloud = PointCloud::merge(world_clouds.iter());

    Ok(FusionResult {
        cloud,
        transforms,
        depth_drifts,
        camera_point_counts,
    })
}
