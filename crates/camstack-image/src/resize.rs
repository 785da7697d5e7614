use crate::error::ImageError;
use crate::image::{DepthMap, ImageSize, RgbImage};

/// Interpolation mode used by the resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Bilinear interpolation.
    Bilinear,
    /// Nearest neighbor interpolation.
    Nearest,
}

/// Map an output coordinate to the matching input coordinate.
///
/// Follows the linspace convention: output index 0 maps to input 0 and the
/// last output index maps to the last input index.
#[inline]
fn src_coord(dst_idx: usize, dst_len: usize, src_len: usize) -> f32 {
    if dst_len <= 1 {
        0.0
    } else {
        dst_idx as f32 * (src_len - 1) as f32 / (dst_len - 1) as f32
    }
}

/// Sample the four neighbors of (u, v) and blend them with bilinear weights.
#[inline]
fn bilinear_weights(u: f32, v: f32, cols: usize, rows: usize) -> ([usize; 2], [usize; 2], [f32; 4]) {
    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);
    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let frac_u = u.fract();
    let frac_v = v.fract();
    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    (
        [iu0, iu1],
        [iv0, iv1],
        [
            frac_uu * frac_vv,
            frac_u * frac_vv,
            frac_uu * frac_v,
            frac_u * frac_v,
        ],
    )
}

/// Resize an RGB image to a new size.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `new_size` - The size of the output image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use camstack_image::RgbImage;
/// use camstack_image::resize::{resize_rgb, InterpolationMode};
///
/// let image = RgbImage::from_size_val([4, 4].into(), 128);
/// let resized = resize_rgb(&image, [2, 2].into(), InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(resized.size().width, 2);
/// assert_eq!(resized.size().height, 2);
/// ```
pub fn resize_rgb(
    src: &RgbImage,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<RgbImage, ImageError> {
    if new_size.width == 0 || new_size.height == 0 {
        return Err(ImageError::InvalidImageSize(new_size.width, new_size.height));
    }
    if new_size == src.size() {
        return Ok(src.clone());
    }
    if src.size().area() == 0 {
        return Err(ImageError::InvalidImageSize(src.width(), src.height()));
    }

    let (cols, rows) = (src.width(), src.height());
    let src_data = src.as_slice();
    let mut dst_data = Vec::with_capacity(new_size.area() * 3);

    for y in 0..new_size.height {
        let v = src_coord(y, new_size.height, rows);
        for x in 0..new_size.width {
            let u = src_coord(x, new_size.width, cols);
            match interpolation {
                InterpolationMode::Nearest => {
                    let iu = (u.round() as usize).min(cols - 1);
                    let iv = (v.round() as usize).min(rows - 1);
                    let base = (iv * cols + iu) * 3;
                    dst_data.extend_from_slice(&src_data[base..base + 3]);
                }
                InterpolationMode::Bilinear => {
                    let ([iu0, iu1], [iv0, iv1], w) = bilinear_weights(u, v, cols, rows);
                    let p00 = (iv0 * cols + iu0) * 3;
                    let p01 = (iv0 * cols + iu1) * 3;
                    let p10 = (iv1 * cols + iu0) * 3;
                    let p11 = (iv1 * cols + iu1) * 3;
                    for k in 0..3 {
                        let val = src_data[p00 + k] as f32 * w[0]
                            + src_data[p01 + k] as f32 * w[1]
                            + src_data[p10 + k] as f32 * w[2]
                            + src_data[p11 + k] as f32 * w[3];
                        dst_data.push(val.round().clamp(0.0, 255.0) as u8);
                    }
                }
            }
        }
    }

    RgbImage::new(new_size, dst_data)
}

/// Resize a depth map to a new size with bilinear interpolation.
pub fn resize_depth(src: &DepthMap, new_size: ImageSize) -> Result<DepthMap, ImageError> {
    if new_size.width == 0 || new_size.height == 0 {
        return Err(ImageError::InvalidImageSize(new_size.width, new_size.height));
    }
    if new_size == src.size() {
        return Ok(src.clone());
    }
    if src.size().area() == 0 {
        return Err(ImageError::InvalidImageSize(src.width(), src.height()));
    }

    let (cols, rows) = (src.width(), src.height());
    let src_data = src.as_slice();
    let mut dst_data = Vec::with_capacity(new_size.area());

    for y in 0..new_size.height {
        let v = src_coord(y, new_size.height, rows);
        for x in 0..new_size.width {
            let u = src_coord(x, new_size.width, cols);
            let ([iu0, iu1], [iv0, iv1], w) = bilinear_weights(u, v, cols, rows);
            let val = src_data[iv0 * cols + iu0] * w[0]
                + src_data[iv0 * cols + iu1] * w[1]
                + src_data[iv1 * cols + iu0] * w[2]
                + src_data[iv1 * cols + iu1] * w[3];
            dst_data.push(val);
        }
    }

    DepthMap::new(new_size, dst_data)
}

/// Downscale an image so that neither dimension exceeds the given bounds,
/// preserving the aspect ratio.
///
/// Images that already fit are returned unchanged. The image is never
/// upscaled.
pub fn downscale_to_fit(src: &RgbImage, max_size: ImageSize) -> Result<RgbImage, ImageError> {
    if max_size.width == 0 || max_size.height == 0 {
        return Err(ImageError::InvalidImageSize(max_size.width, max_size.height));
    }
    let (width, height) = (src.width(), src.height());
    if width <= max_size.width && height <= max_size.height {
        return Ok(src.clone());
    }

    let scale = (max_size.width as f64 / width as f64).min(max_size.height as f64 / height as f64);
    let new_size = ImageSize {
        width: ((width as f64 * scale).round() as usize).max(1),
        height: ((height as f64 * scale).round() as usize).max(1),
    };

    resize_rgb(src, new_size, InterpolationMode::Bilinear)
}
