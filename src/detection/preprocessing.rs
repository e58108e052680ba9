use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageReader, RgbImage};
use imageproc::filter::gaussian_blur_f32;

/// Decode an image from disk
pub fn load_image(path: &Path) -> std::result::Result<DynamicImage, image::ImageError> {
    Ok(ImageReader::open(path)?.decode()?)
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Apply Gaussian blur to suppress scan-sensor and compression noise
pub fn smooth(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Resize the candidate to the reference dimensions so pixel-wise comparison
/// is meaningful. The image is scaled, not cropped or warped.
pub fn normalize_size(img: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let rgb = img.to_rgb8();
    if rgb.dimensions() == (width, height) {
        return rgb;
    }
    imageops::resize(&rgb, width, height, FilterType::Triangle)
}
