use crate::image::RgbImage;

/// Cast an RGB image to f32 and scale each value.
///
/// The usual scale factor is `1.0 / 255.0` to bring pixels into `[0, 1]`.
pub fn cast_and_scale(src: &RgbImage, scale: f32) -> Vec<f32> {
    src.as_slice().iter().map(|&px| px as f32 * scale).collect()
}

/// Normalize interleaved (H, W, 3) data with per-channel mean and standard
/// deviation: `(pixel - mean) / std`.
pub fn normalize_mean_std(data: &mut [f32], mean: &[f32; 3], std: &[f32; 3]) {
    for px in data.chunks_exact_mut(3) {
        for k in 0..3 {
            px[k] = (px[k] - mean[k]) / std[k];
        }
    }
}

/// Normalize scalar data to the range `[min, max]`.
///
/// A constant input maps to `min` everywhere.
pub fn normalize_min_max(data: &mut [f32], min: f32, max: f32) {
    let (lo, hi) = data.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |acc, &v| {
        (acc.0.min(v), acc.1.max(v))
    });
    let range = hi - lo;
    if range <= f32::EPSILON {
        data.fill(min);
        return;
    }
    for v in data.iter_mut() {
        *v = min + (*v - lo) / range * (max - min);
    }
}
