use crate::camera::RigidTransform;
use crate::utils;

/// Transform a set of points by a rigid transform.
///
/// Equivalent to applying the homogeneous 4x4 form of the transform to each
/// point and keeping the first three components, but batched as one matrix
/// multiplication over all points.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `world_from_cam` - The rigid transform to apply.
/// * `dst_points` - A pre-allocated vector to store the transformed points.
///
/// PRECONDITION: dst_points is a pre-allocated vector of the same size as source.
///
/// Example:
///
/// ```
/// use camstack_3d::camera::RigidTransform;
/// use camstack_3d::linalg::transform_points;
///
/// let src_points = vec![[2.0, 2.0, 2.0], [3.0, 4.0, 5.0]];
/// let transform = RigidTransform::from_translation([0.0, 0.0, 1.0]);
/// let mut dst_points = vec![[0.0; 3]; src_points.len()];
/// transform_points(&src_points, &transform, &mut dst_points);
/// assert_eq!(dst_points[0], [2.0, 2.0, 3.0]);
/// ```
pub fn transform_points(
    src_points: &[[f64; 3]],
    world_from_cam: &RigidTransform,
    dst_points: &mut [[f64; 3]],
) {
    assert_eq!(src_points.len(), dst_points.len());

    // create views of the rotation and translation
    let rotation_mat = utils::array33_to_faer_mat33(&world_from_cam.rotation);
    let translation_col = utils::array3_to_faer_col(&world_from_cam.translation);

    // create view of the source points
    let points_in_src = {
        let src_points_slice = unsafe {
            std::slice::from_raw_parts(src_points.as_ptr() as *const f64, src_points.len() * 3)
        };
        faer::mat::from_row_major_slice(src_points_slice, src_points.len(), 3)
    };

    // create a mutable view of the destination points
    let mut points_in_dst = {
        let dst_points_slice = unsafe {
            std::slice::from_raw_parts_mut(
                dst_points.as_mut_ptr() as *mut f64,
                dst_points.len() * 3,
            )
        };
        // SAFETY: dst_points_slice is a 3xN matrix where each column represents a 3D point
        faer::mat::from_column_major_slice_mut(dst_points_slice, 3, dst_points.len())
    };

    // rotate all points at once
    faer::linalg::matmul::matmul(
        &mut points_in_dst,
        rotation_mat,
        points_in_src.transpose(),
        None,
        1.0,
        faer::Parallelism::None,
    );

    let (tx, ty, tz) = (
        translation_col.read(0),
        translation_col.read(1),
        translation_col.read(2),
    );

    // add the translation to each column
    for mut col in points_in_dst.col_iter_mut() {
        col.write(0, col.read(0) + tx);
        col.write(1, col.read(1) + ty);
        col.write(2, col.read(2) + tz);
    }
}
