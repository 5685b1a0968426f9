//! Skin texture proxy from Laplacian variance of the whole image.
//!
//! This is a coarse microcontrast measure: it rises with visible texture but
//! also with sensor noise, sharpening and JPEG artifacts, and it depends on
//! resolution and lighting. No correction is attempted.

use ndarray::Array2;

use crate::shared::frame::Frame;

pub const MAX_SCORE: f64 = 10.0;

/// Laplacian variance that maps to one score point.
const VARIANCE_PER_POINT: f64 = 50.0;

/// `min(V / 50, 10)` where `V` is the Laplacian variance of the frame's
/// intensity plane. Not floored: a flat image scores 0.
pub fn score(frame: &Frame) -> f64 {
    let variance = laplacian_variance(&frame.to_luma());
    let score = (variance / VARIANCE_PER_POINT).min(MAX_SCORE);
    log::debug!("skin laplacian_variance={variance:.2} score={score:.4}");
    score
}

/// Population variance of the 4-neighbour Laplacian `[0,1,0; 1,-4,1; 0,1,0]`
/// evaluated at every pixel, with borders mirrored without repeating the
/// edge pixel (`dcb|abcd|cba`).
pub fn laplacian_variance(gray: &Array2<f64>) -> f64 {
    let (h, w) = gray.dim();
    if h == 0 || w == 0 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for y in 0..h {
        let up = reflect_101(y as isize - 1, h);
        let down = reflect_101(y as isize + 1, h);
        for x in 0..w {
            let left = reflect_101(x as isize - 1, w);
            let right = reflect_101(x as isize + 1, w);
            let lap = gray[[up, x]] + gray[[down, x]] + gray[[y, left]] + gray[[y, right]]
                - 4.0 * gray[[y, x]];
            sum += lap;
            sum_sq += lap * lap;
        }
    }

    let n = (h * w) as f64;
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}

fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = i;
    while i < 0 || i > last {
        i = if i < 0 { -i } else { 2 * last - i };
    }
    i as usize
}
