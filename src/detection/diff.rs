use image::GrayImage;

use crate::error::{DetectError, Result};

/// Per-pixel absolute intensity difference of two equal-sized grayscale
/// images. Handwriting ink produces large localized deltas against a
/// near-identical background scan.
pub fn abs_diff(a: &GrayImage, b: &GrayImage) -> Result<GrayImage> {
    if a.dimensions() != b.dimensions() {
        return Err(DetectError::DimensionMismatch {
            expected: a.dimensions(),
            actual: b.dimensions(),
        });
    }

    let mut out = GrayImage::new(a.width(), a.height());
    for (dst, (pa, pb)) in out.pixels_mut().zip(a.pixels().zip(b.pixels())) {
        dst[0] = pa[0].abs_diff(pb[0]);
    }
    Ok(out)
}

/// Binarize a difference map with a global threshold: strictly above becomes
/// foreground (255), everything else background (0).
pub fn binarize(diff: &GrayImage, threshold: u8) -> GrayImage {
    let mut mask = GrayImage::new(diff.width(), diff.height());
    for (dst, src) in mask.pixels_mut().zip(diff.pixels()) {
        dst[0] = if src[0] > threshold { 255 } else { 0 };
    }
    mask
}
