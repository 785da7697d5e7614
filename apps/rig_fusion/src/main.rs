use argh::FromArgs;
use std::path::PathBuf;

use camstack::depth::{DepthAnything, DepthModel};
use camstack::k3d::rig::RigConfig;
use camstack::pipeline::{run_fusion, FusionConfig};
use camstack::viz::{RendererOptions, RerunRenderer, SceneRenderer};

#[derive(FromArgs)]
/// Fuse four vertically stacked camera images into one point cloud and view it
struct Args {
    /// image of camera 0 (alignment reference)
    #[argh(option)]
    image1: PathBuf,

    /// image of camera 1
    #[argh(option)]
    image2: PathBuf,

    /// image of camera 2
    #[argh(option)]
    image3: PathBuf,

    /// image of camera 3
    #[argh(option)]
    image4: PathBuf,

    /// depth model variant to use (vits, vitb)
    #[argh(option, default = "String::from(\"vits\")")]
    model: String,

    /// maximum camera-local depth to keep, in meters
    #[argh(option, default = "2.0")]
    threshold: f64,

    /// path to a JSON rig config; defaults to the built-in vertical stack
    #[argh(option)]
    rig: Option<PathBuf>,

    /// path to local DINOv2 safetensors weights
    #[argh(option)]
    dinov2_model: Option<PathBuf>,

    /// path to local Depth Anything V2 safetensors weights
    #[argh(option)]
    depth_model: Option<PathBuf>,

    /// on-screen point size, in UI points
    #[argh(option, default = "1.0")]
    point_size: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();

    env_logger::init();

    let rig = match &args.rig {
        Some(path) => RigConfig::from_json_file(path)?,
        None => RigConfig::vertical_stack(),
    };

    // the model is built once per run, before any image is touched
    let model: DepthModel = args.model.parse()?;
    let mut estimator = DepthAnything::new(model, args.dinov2_model, args.depth_model)?;

    let config = FusionConfig {
        depth_threshold: args.threshold,
        ..FusionConfig::default()
    };

    let image_paths = vec![args.image1, args.image2, args.image3, args.image4];
    let result = run_fusion(&image_paths, &rig, &mut estimator, &config)?;

    log::info!(
        "fused {} points from {} cameras",
        result.cloud.len(),
        result.camera_point_counts.len()
    );

    let mut renderer = RerunRenderer::spawn(
        "rig_fusion",
        RendererOptions {
            point_size: args.point_size,
            ..RendererOptions::default()
        },
    )?;

    renderer.log_cloud("world/points", &result.cloud)?;
    for (i, transform) in result.transforms.iter().enumerate() {
        renderer.log_camera(&format!("world/camera_{i}"), transform)?;
    }

    Ok(())
}
