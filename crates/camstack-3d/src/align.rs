use crate::camera::RigidTransform;
use crate::linalg::transform_points;
use crate::pointcloud::PointCloud;
use crate::rig::RigConfig;

/// The percentile of the depth distribution used as the near-surface anchor.
pub const DEFAULT_NEAR_SURFACE_PERCENTILE: f64 = 5.0;

/// The default camera-local depth cutoff in meters.
pub const DEFAULT_DEPTH_THRESHOLD: f64 = 2.0;

/// An error type for the alignment engine.
#[derive(thiserror::Error, Debug)]
pub enum AlignError {
    /// The number of per-camera inputs does not match the rig.
    #[error("Expected {0} per-camera entries, got {1}")]
    CameraCountMismatch(usize, usize),
}

/// A camera-local point cloud with one color per point, prior to alignment.
#[derive(Debug, Clone, Default)]
pub struct CameraCloud {
    /// The points in the camera frame, z increasing with distance.
    pub points: Vec<[f64; 3]>,
    /// The source-pixel color of each point.
    pub colors: Vec<[u8; 3]>,
}

/// Compute a percentile of a sample by linear interpolation between the
/// closest order statistics (rank `pct / 100 * (n - 1)`).
///
/// Returns `None` for an empty sample.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Estimate the depth of the closest real surface seen by a camera.
///
/// Uses a low percentile of the z coordinates rather than the minimum: a
/// single spurious near-zero depth pixel would corrupt the estimate, while
/// the percentile tolerates a small fraction of outliers.
///
/// Returns `None` when the cloud is empty.
pub fn near_surface_depth(points: &[[f64; 3]], pct: f64) -> Option<f64> {
    let depths = points.iter().map(|p| p[2]).collect::<Vec<_>>();
    percentile(&depths, pct)
}

/// Compute each camera's depth drift relative to the reference camera:
/// `drift[i] = near_surface[i] - near_surface[0]`.
///
/// The reference camera's drift is zero by construction. A positive drift
/// means the camera sees its near surface farther away than the reference
/// does, so the correction applied downstream is the negated drift:
/// [`effective_transforms`] shifts translation z by `-drift[i]`. This is a
/// heuristic correction for scale/shift drift across independent monocular
/// depth inferences; it does not correct rotational or horizontal
/// misalignment.
pub fn depth_drifts(near_surfaces: &[f64]) -> Vec<f64> {
    let Some(&base) = near_surfaces.first() else {
        return Vec::new();
    };
    near_surfaces.iter().map(|&near| near - base).collect()
}

/// Compose each rig camera's extrinsic transform with its depth-drift
/// correction.
///
/// The correction cancels the measured drift: the translation's depth-axis
/// component is shifted by `-drift[i]`, so each camera's near surface lands
/// at the reference camera's near-surface depth. Rotations are untouched,
/// and the reference camera's transform comes back unchanged.
pub fn effective_transforms(
    rig: &RigConfig,
    drifts: &[f64],
) -> Result<Vec<RigidTransform>, AlignError> {
    if rig.len() != drifts.len() {
        return Err(AlignError::CameraCountMismatch(rig.len(), drifts.len()));
    }
    Ok(rig
        .cameras
        .iter()
        .zip(drifts.iter())
        .map(|(camera, &drift)| camera.extrinsic.with_depth_offset(-drift))
        .collect())
}

/// Filter a camera cloud by depth and transform the survivors to world
/// coordinates.
///
/// Points with camera-local depth `z >= depth_threshold` are discarded along
/// with their colors. A cloud whose points are all beyond the threshold
/// yields an empty result rather than an error.
pub fn filter_and_transform(
    cloud: &CameraCloud,
    world_from_cam: &RigidTransform,
    depth_threshold: f64,
) -> PointCloud {
    assert_eq!(cloud.points.len(), cloud.colors.len());

    let (local_points, colors): (Vec<_>, Vec<_>) = cloud
        .points
        .iter()
        .zip(cloud.colors.iter())
        .filter(|(point, _)| point[2] < depth_threshold)
        .map(|(point, color)| (*point, *color))
        .unzip();

    let mut world_points = vec![[0.0; 3]; local_points.len()];
    transform_points(&local_points, world_from_cam, &mut world_points);

    PointCloud::new(world_points, Some(colors))
}

/// Fuse several camera clouds into a single world-frame point cloud.
///
/// Each cloud is depth-filtered, transformed by its effective transform and
/// concatenated in camera order. No deduplication or outlier removal is
/// performed beyond the threshold filter.
pub fn fuse_clouds(
    clouds: &[CameraCloud],
    transforms: &[RigidTransform],
    depth_threshold: f64,
) -> Result<PointCloud, AlignError> {
    if clouds.len() != transforms.len() {
        return Err(AlignError::CameraCountMismatch(transforms.len(), clouds.len()));
    }

    let world_clouds = clouds
        .iter()
        .zip(transforms.iter())
        .map(|(cloud, transform)| filter_and_transform(cloud, transform, depth_threshold))
        .collect::<Vec<_>>();

    Ok(PointCloud::merge(world_clouds.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_cloud(depth: f64, count: usize) -> CameraCloud {
        CameraCloud {
            points: (0..count)
                .map(|i| [i as f64 * 0.01, i as f64 * -0.01, depth])
                .collect(),
            colors: vec![[200, 100, 50]; count],
        }
    }

    #[test]
    fn percentile_uniform_distribution() {
        // 1000 points uniformly spaced over [0, 10]
        let values = (0..1000).map(|i| i as f64 * 10.0 / 999.0).collect::<Vec<_>>();
        let p5 = percentile(&values, 5.0).unwrap();
        assert_relative_eq!(p5, 0.5, epsilon = 1e-9);

        let p0 = percentile(&values, 0.0).unwrap();
        assert_relative_eq!(p0, 0.0, epsilon = 1e-9);

        let p100 = percentile(&values, 100.0).unwrap();
        assert_relative_eq!(p100, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn percentile_empty() {
        assert!(percentile(&[], 5.0).is_none());
        assert!(near_surface_depth(&[], 5.0).is_none());
    }

    #[test]
    fn percentile_of_noisy_plane_is_stable() {
        use rand::Rng;

        let mut rng = rand::rng();
        let points = (0..2000)
            .map(|_| [0.0, 0.0, 2.0 + rng.random_range(-0.05..0.05)])
            .collect::<Vec<_>>();

        let near = near_surface_depth(&points, DEFAULT_NEAR_SURFACE_PERCENTILE).unwrap();
        assert!((near - 2.0).abs() < 0.06, "unexpected near surface {near}");
    }

    #[test]
    fn near_surface_ignores_outliers() {
        // one bogus near-zero depth among a flat plane at 2.0
        let mut points = vec![[0.0, 0.0, 2.0]; 99];
        points.push([0.0, 0.0, 1e-6]);
        let near = near_surface_depth(&points, DEFAULT_NEAR_SURFACE_PERCENTILE).unwrap();
        assert!(near > 1.9, "near surface {near} corrupted by outlier");
    }

    #[test]
    fn reference_drift_is_zero() {
        let drifts = depth_drifts(&[1.0, 1.4, 1.78, 2.13]);
        assert_eq!(drifts[0], 0.0);
        assert_relative_eq!(drifts[1], 0.4, epsilon = 1e-12);
        assert_relative_eq!(drifts[2], 0.78, epsilon = 1e-12);
        assert_relative_eq!(drifts[3], 1.13, epsilon = 1e-12);
    }

    #[test]
    fn effective_transform_only_shifts_z() {
        let rig = RigConfig::vertical_stack();
        let drifts = vec![0.0, 0.4, 0.78, 1.13];
        let transforms = effective_transforms(&rig, &drifts).unwrap();

        assert_eq!(transforms[0], rig.cameras[0].extrinsic);
        for (i, transform) in transforms.iter().enumerate() {
            let base = &rig.cameras[i].extrinsic;
            assert_eq!(transform.rotation, base.rotation);
            assert_eq!(transform.translation[0], base.translation[0]);
            assert_eq!(transform.translation[1], base.translation[1]);
            assert_relative_eq!(
                transform.translation[2],
                base.translation[2] - drifts[i],
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn effective_transform_count_mismatch() {
        let rig = RigConfig::vertical_stack();
        let result = effective_transforms(&rig, &[0.0, 0.1]);
        assert!(matches!(result, Err(AlignError::CameraCountMismatch(4, 2))));
    }

    #[test]
    fn filtering_is_monotonic_in_threshold() {
        let cloud = CameraCloud {
            points: (0..100).map(|i| [0.0, 0.0, i as f64 * 0.05]).collect(),
            colors: vec![[0, 0, 0]; 100],
        };
        let transform = RigidTransform::identity();

        let mut previous = 0;
        for threshold in [0.5, 1.0, 2.0, 4.0, 10.0] {
            let kept = filter_and_transform(&cloud, &transform, threshold).len();
            assert!(kept >= previous, "threshold {threshold} dropped points");
            previous = kept;
        }
    }

    #[test]
    fn degenerate_camera_contributes_nothing() {
        let cloud = flat_cloud(5.0, 50);
        let filtered =
            filter_and_transform(&cloud, &RigidTransform::identity(), DEFAULT_DEPTH_THRESHOLD);
        assert!(filtered.is_empty());
    }

    #[test]
    fn transform_roundtrip_within_tolerance() {
        let cloud = flat_cloud(1.2, 32);
        let transform = RigidTransform::from_translation([0.0, -0.78, 0.0]).with_depth_offset(-0.35);

        let world = filter_and_transform(&cloud, &transform, 10.0);
        let mut local_again = vec![[0.0; 3]; world.len()];
        transform_points(world.points(), &transform.inverse(), &mut local_again);

        for (original, roundtrip) in cloud.points.iter().zip(local_again.iter()) {
            for i in 0..3 {
                assert_relative_eq!(roundtrip[i], original[i], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn merged_size_is_sum_of_survivors() {
        let clouds = vec![flat_cloud(1.0, 10), flat_cloud(1.5, 20), flat_cloud(5.0, 30)];
        let transforms = vec![RigidTransform::identity(); 3];

        let merged = fuse_clouds(&clouds, &transforms, 2.0).unwrap();
        assert_eq!(merged.len(), 10 + 20);
        assert_eq!(merged.colors().map(|c| c.len()), Some(30));
    }

    #[test]
    fn alignment_cancels_synthetic_depth_drift() {
        // four flat planes whose depths drift away from the reference
        let depths = [1.0, 1.4, 1.78, 2.13];
        let clouds = depths.iter().map(|&d| flat_cloud(d, 100)).collect::<Vec<_>>();

        let near = clouds
            .iter()
            .map(|cloud| {
                near_surface_depth(&cloud.points, DEFAULT_NEAR_SURFACE_PERCENTILE).unwrap()
            })
            .collect::<Vec<_>>();
        let drifts = depth_drifts(&near);
        assert_relative_eq!(drifts[3], 1.13, epsilon = 1e-9);

        let rig = RigConfig::vertical_stack();
        let transforms = effective_transforms(&rig, &drifts).unwrap();

        // a threshold above the deepest plane keeps all cameras in play
        let merged = fuse_clouds(&clouds, &transforms, 3.0).unwrap();
        assert_eq!(merged.len(), 400);

        for point in merged.points() {
            assert_relative_eq!(point[2], 1.0, epsilon = 1e-9);
        }
    }
}
