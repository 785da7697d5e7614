/// A point cloud with points and optional per-point colors.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    // The points in the point cloud.
    points: Vec<[f64; 3]>,
    // The colors of the points.
    colors: Option<Vec<[u8; 3]>>,
}

impl PointCloud {
    /// Create a new point cloud from points and colors (optional).
    pub fn new(points: Vec<[f64; 3]>, colors: Option<Vec<[u8; 3]>>) -> Self {
        Self { points, colors }
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point cloud.
    pub fn points(&self) -> &Vec<[f64; 3]> {
        &self.points
    }

    /// Get as reference the colors of the points in the point cloud.
    pub fn colors(&self) -> Option<&Vec<[u8; 3]>> {
        self.colors.as_ref()
    }

    /// Concatenate several point clouds into one, preserving cloud order.
    ///
    /// No deduplication is performed. Colors are kept only when every input
    /// cloud carries them.
    pub fn merge<'a>(clouds: impl IntoIterator<Item = &'a PointCloud>) -> Self {
        let mut points = Vec::new();
        let mut colors = Some(Vec::new());

        for cloud in clouds {
            points.extend_from_slice(&cloud.points);
            match (&mut colors, cloud.colors()) {
                (Some(acc), Some(cloud_colors)) => acc.extend_from_slice(cloud_colors),
                (acc, None) if !cloud.is_empty() => *acc = None,
                _ => {}
            }
        }

        Self { points, colors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointcloud() {
        let pointcloud = PointCloud::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            Some(vec![[255, 0, 0], [0, 255, 0]]),
        );

        assert_eq!(pointcloud.len(), 2);
        assert_eq!(pointcloud.points().len(), 2);

        if let Some(colors) = pointcloud.colors() {
            assert_eq!(colors.len(), 2);
        }

        if let Some(p1) = pointcloud.points().last() {
            assert_eq!(p1[0], 1.0);
            assert_eq!(p1[1], 0.0);
            assert_eq!(p1[2], 0.0);
        }
    }

    #[test]
    fn test_merge_counts() {
        let a = PointCloud::new(vec![[0.0; 3]; 3], Some(vec![[1, 2, 3]; 3]));
        let b = PointCloud::new(vec![], Some(vec![]));
        let c = PointCloud::new(vec![[1.0; 3]; 2], Some(vec![[4, 5, 6]; 2]));

        let merged = PointCloud::merge([&a, &b, &c]);
        assert_eq!(merged.len(), a.len() + b.len() + c.len());
        assert_eq!(merged.colors().map(|c| c.len()), Some(5));
        // order is preserved across clouds
        assert_eq!(merged.points()[3], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_merge_drops_colors_when_missing() {
        let a = PointCloud::new(vec![[0.0; 3]], Some(vec![[1, 2, 3]]));
        let b = PointCloud::new(vec![[1.0; 3]], None);

        let merged = PointCloud::merge([&a, &b]);
        assert_eq!(merged.len(), 2);
        assert!(merged.colors().is_none());
    }
}
