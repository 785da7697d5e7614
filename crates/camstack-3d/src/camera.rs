use camstack_image::ImageSize;

/// Represents the intrinsic parameters of a pinhole camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraIntrinsic {
    /// The focal length in the x direction
    pub fx: f64,
    /// The focal length in the y direction
    pub fy: f64,
    /// The x coordinate of the principal point
    pub cx: f64,
    /// The y coordinate of the principal point
    pub cy: f64,
}

impl CameraIntrinsic {
    /// Build intrinsics for an image from a horizontal field of view.
    ///
    /// The focal length is `0.5 * width / tan(0.5 * fov)` and the principal
    /// point is the image center. This is the default pinhole assumed when
    /// no calibration is available.
    pub fn from_fov(fov_deg: f64, size: ImageSize) -> Self {
        let focal = 0.5 * size.width as f64 / (0.5 * fov_deg.to_radians()).tan();
        Self {
            fx: focal,
            fy: focal,
            cx: size.width as f64 / 2.0,
            cy: size.height as f64 / 2.0,
        }
    }
}

/// A rigid-body transform mapping camera-local coordinates to world
/// coordinates, expressed as a 3x3 rotation and a translation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RigidTransform {
    /// The rotation matrix, row major.
    #[serde(default = "identity_rotation")]
    pub rotation: [[f64; 3]; 3],
    /// The translation vector.
    #[serde(default)]
    pub translation: [f64; 3],
}

fn identity_rotation() -> [[f64; 3]; 3] {
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
}

impl RigidTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            rotation: identity_rotation(),
            translation: [0.0; 3],
        }
    }

    /// A pure translation transform.
    pub fn from_translation(translation: [f64; 3]) -> Self {
        Self {
            rotation: identity_rotation(),
            translation,
        }
    }

    /// The transform as a homogeneous 4x4 matrix, row major.
    pub fn matrix4(&self) -> [[f64; 4]; 4] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            [r[0][0], r[0][1], r[0][2], t[0]],
            [r[1][0], r[1][1], r[1][2], t[1]],
            [r[2][0], r[2][1], r[2][2], t[2]],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    /// The inverse transform: `R' = R^T`, `t' = -R^T * t`.
    pub fn inverse(&self) -> Self {
        let r = &self.rotation;
        let t = &self.translation;
        let rotation = [
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ];
        let translation = [
            -(rotation[0][0] * t[0] + rotation[0][1] * t[1] + rotation[0][2] * t[2]),
            -(rotation[1][0] * t[0] + rotation[1][1] * t[1] + rotation[1][2] * t[2]),
            -(rotation[2][0] * t[0] + rotation[2][1] * t[1] + rotation[2][2] * t[2]),
        ];
        Self {
            rotation,
            translation,
        }
    }

    /// A copy of the transform with the translation's depth-axis (z)
    /// component shifted by `dz`. The rotation is untouched.
    pub fn with_depth_offset(&self, dz: f64) -> Self {
        let mut transform = self.clone();
        transform.translation[2] += dz;
        transform
    }

    /// Apply the transform to a single point.
    pub fn transform_point(&self, point: &[f64; 3]) -> [f64; 3] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            r[0][0] * point[0] + r[0][1] * point[1] + r[0][2] * point[2] + t[0],
            r[1][0] * point[0] + r[1][1] * point[1] + r[1][2] * point[2] + t[1],
            r[2][0] * point[0] + r[2][1] * point[1] + r[2][2] * point[2] + t[2],
        ]
    }
}
