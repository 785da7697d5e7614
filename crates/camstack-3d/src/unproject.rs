use camstack_image::DepthMap;

use crate::camera::CameraIntrinsic;

/// Back-project a depth map to 3D points in the camera frame.
///
/// Produces one point per pixel in row-major order, using the pinhole model:
/// `x = (u - cx) * z / fx`, `y = (v - cy) * z / fy`, `z = depth(u, v)`.
/// The z axis increases with distance from the camera.
///
/// # Arguments
///
/// * `depth` - The depth map to back-project.
/// * `intrinsic` - The pinhole intrinsics of the source camera.
///
/// # Returns
///
/// A vector of 3D points, one per pixel.
pub fn depth_to_points(depth: &DepthMap, intrinsic: &CameraIntrinsic) -> Vec<[f64; 3]> {
    let (cols, rows) = (depth.width(), depth.height());
    let mut points = Vec::with_capacity(cols * rows);

    for v in 0..rows {
        for u in 0..cols {
            let z = depth.get_depth(u, v) as f64;
            points.push([
                (u as f64 - intrinsic.cx) * z / intrinsic.fx,
                (v as f64 - intrinsic.cy) * z / intrinsic.fy,
                z,
            ]);
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_point_per_pixel() {
        let depth = DepthMap::from_size_val([5, 4].into(), 1.0);
        let intrinsic = CameraIntrinsic {
            fx: 10.0,
            fy: 10.0,
            cx: 2.5,
            cy: 2.0,
        };
        let points = depth_to_points(&depth, &intrinsic);
        assert_eq!(points.len(), 20);
    }

    #[test]
    fn principal_point_projects_to_axis() {
        let depth = DepthMap::from_size_val([5, 5].into(), 2.0);
        let intrinsic = CameraIntrinsic {
            fx: 100.0,
            fy: 100.0,
            cx: 2.0,
            cy: 2.0,
        };
        let points = depth_to_points(&depth, &intrinsic);
        // the pixel at the principal point lies on the optical axis
        let center = points[2 * 5 + 2];
        assert_relative_eq!(center[0], 0.0);
        assert_relative_eq!(center[1], 0.0);
        assert_relative_eq!(center[2], 2.0);
    }

    #[test]
    fn flat_plane_keeps_depth() {
        let depth = DepthMap::from_size_val([8, 8].into(), 1.25);
        let intrinsic = CameraIntrinsic::from_fov(55.0, depth.size());
        let points = depth_to_points(&depth, &intrinsic);
        assert!(points.iter().all(|p| (p[2] - 1.25).abs() < 1e-9));
    }

    #[test]
    fn pinhole_geometry() {
        let mut depth = DepthMap::from_size_val([4, 4].into(), 0.0);
        depth.as_slice_mut()[7] = 2.0; // pixel (3, 1)
        let intrinsic = CameraIntrinsic {
            fx: 2.0,
            fy: 4.0,
            cx: 1.0,
            cy: 3.0,
        };
        let points = depth_to_points(&depth, &intrinsic);
        let p = points[7];
        assert_relative_eq!(p[0], (3.0 - 1.0) * 2.0 / 2.0);
        assert_relative_eq!(p[1], (1.0 - 3.0) * 2.0 / 4.0);
        assert_relative_eq!(p[2], 2.0);
    }
}
