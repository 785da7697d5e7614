#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

use camstack_3d::camera::RigidTransform;
use camstack_3d::pointcloud::PointCloud;

/// An error type for scene rendering.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// Failure in the rerun recording stream.
    #[error("Failed to log to the recording stream. {0}")]
    RecordingError(#[from] rerun::RecordingStreamError),
}

/// Display options for a scene renderer.
#[derive(Debug, Clone, Copy)]
pub struct RendererOptions {
    /// The on-screen point size, in UI points.
    pub point_size: f32,
    /// The background color, for backends that support it.
    pub background: [u8; 3],
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            background: [0, 0, 0],
        }
    }
}

/// A sink for colored point clouds and camera poses.
///
/// The alignment pipeline only ever talks to this interface, so it can be
/// exercised in tests without a display.
pub trait SceneRenderer {
    /// Display a point cloud under the given entity name.
    fn log_cloud(&mut self, name: &str, cloud: &PointCloud) -> Result<(), VizError>;

    /// Display a camera coordinate frame at the given pose.
    fn log_camera(&mut self, name: &str, pose: &RigidTransform) -> Result<(), VizError>;
}

/// A renderer backed by a spawned rerun viewer.
///
/// The recording stream flushes when the renderer is dropped, including on
/// error paths.
pub struct RerunRenderer {
    rec: rerun::RecordingStream,
    options: RendererOptions,
}

impl RerunRenderer {
    /// Spawn a rerun viewer and connect a recording stream to it.
    pub fn spawn(application_id: &str, options: RendererOptions) -> Result<Self, VizError> {
        let rec = rerun::RecordingStreamBuilder::new(application_id.to_string()).spawn()?;
        rec.log("/", &rerun::ViewCoordinates::RIGHT_HAND_Y_DOWN())?;
        Ok(Self { rec, options })
    }
}

impl SceneRenderer for RerunRenderer {
    fn log_cloud(&mut self, name: &str, cloud: &PointCloud) -> Result<(), VizError> {
        let positions = cloud
            .points()
            .iter()
            .map(|p| rerun::Position3D::new(p[0] as f32, p[1] as f32, p[2] as f32))
            .collect::<Vec<_>>();

        let colors = cloud.colors().map_or(vec![], |colors| {
            colors
                .iter()
                .map(|c| rerun::Color::from_rgb(c[0], c[1], c[2]))
                .collect()
        });

        self.rec.log(
            name.to_string(),
            &rerun::Points3D::new(positions)
                .with_colors(colors)
                .with_radii([rerun::Radius::new_ui_points(self.options.point_size)]),
        )?;

        Ok(())
    }

    fn log_camera(&mut self, name: &str, pose: &RigidTransform) -> Result<(), VizError> {
        let translation = pose.translation.map(|x| x as f32);
        // rerun matrices are column major
        let rotation_cols: [[f32; 3]; 3] = std::array::from_fn(|col| {
            std::array::from_fn(|row| pose.rotation[row][col] as f32)
        });

        self.rec.log(
            name.to_string(),
            &rerun::Transform3D::from_translation_mat3x3(translation, rotation_cols),
        )?;
        self.rec.log(name.to_string(), &rerun::ViewCoordinates::RDF())?;

        Ok(())
    }
}
