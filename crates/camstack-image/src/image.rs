use crate::error::ImageError;

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use camstack_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl ImageSize {
    /// The total number of pixels.
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// An 8-bit RGB image with interleaved (H, W, 3) pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    size: ImageSize,
    data: Vec<u8>,
}

impl RgbImage {
    /// Create a new image from its size and interleaved RGB data.
    ///
    /// The data length must equal `width * height * 3`.
    pub fn new(size: ImageSize, data: Vec<u8>) -> Result<Self, ImageError> {
        if data.len() != size.area() * 3 {
            return Err(ImageError::InvalidPixelDataLength(
                data.len(),
                size.area() * 3,
                size.height,
                size.width,
                3,
            ));
        }
        Ok(Self { size, data })
    }

    /// Create a new image filled with a constant value.
    pub fn from_size_val(size: ImageSize, val: u8) -> Self {
        Self {
            size,
            data: vec![val; size.area() * 3],
        }
    }

    /// The size of the image in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the image in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the image in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The interleaved RGB pixel data.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the RGB value at a specific pixel.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.size.width + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// The pixels as a vector of RGB triples, in row-major order.
    pub fn to_pixel_vec(&self) -> Vec<[u8; 3]> {
        self.data
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}

/// A dense per-pixel depth map with (H, W) scalar data.
///
/// Depth values increase with distance from the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    size: ImageSize,
    data: Vec<f32>,
}

impl DepthMap {
    /// Create a new depth map from its size and row-major depth data.
    pub fn new(size: ImageSize, data: Vec<f32>) -> Result<Self, ImageError> {
        if data.len() != size.area() {
            return Err(ImageError::InvalidPixelDataLength(
                data.len(),
                size.area(),
                size.height,
                size.width,
                1,
            ));
        }
        Ok(Self { size, data })
    }

    /// Create a new depth map filled with a constant value.
    pub fn from_size_val(size: ImageSize, val: f32) -> Self {
        Self {
            size,
            data: vec![val; size.area()],
        }
    }

    /// The size of the depth map in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the depth map in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the depth map in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The depth values in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the depth values.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get the depth value at a specific pixel.
    #[inline]
    pub fn get_depth(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.size.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size() {
        let size = ImageSize::from([4, 3]);
        assert_eq!(size.width, 4);
        assert_eq!(size.height, 3);
        assert_eq!(size.area(), 12);
    }

    #[test]
    fn rgb_image_smoke() -> Result<(), ImageError> {
        let image = RgbImage::new([2, 2].into(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11])?;
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(image.get_pixel(1, 0), [3, 4, 5]);
        assert_eq!(image.get_pixel(0, 1), [6, 7, 8]);
        assert_eq!(image.to_pixel_vec().len(), 4);
        Ok(())
    }

    #[test]
    fn rgb_image_wrong_length() {
        let image = RgbImage::new([2, 2].into(), vec![0u8; 5]);
        assert!(image.is_err());
    }

    #[test]
    fn depth_map_smoke() -> Result<(), ImageError> {
        let depth = DepthMap::new([3, 2].into(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])?;
        assert_eq!(depth.get_depth(2, 0), 2.0);
        assert_eq!(depth.get_depth(0, 1), 3.0);
        Ok(())
    }

    #[test]
    fn depth_map_wrong_length() {
        let depth = DepthMap::new([3, 2].into(), vec![0.0; 7]);
        assert!(depth.is_err());
    }
}
