use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};

/// A blank white sheet, stand-in for an empty exam template.
pub fn blank_sheet(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([255u8, 255u8, 255u8]))
}

/// Paint a dark rectangle onto a sheet, simulating a block of handwriting.
pub fn with_ink(mut sheet: RgbImage, x: u32, y: u32, width: u32, height: u32) -> RgbImage {
    for yy in y..(y + height).min(sheet.height()) {
        for xx in x..(x + width).min(sheet.width()) {
            sheet.put_pixel(xx, yy, Rgb([10u8, 10u8, 10u8]));
        }
    }
    sheet
}

pub fn as_dynamic(sheet: RgbImage) -> DynamicImage {
    DynamicImage::ImageRgb8(sheet)
}

/// Save a sheet as PNG (lossless, so pixel diffs in tests are exact).
pub fn save_png(sheet: &RgbImage, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    sheet.save(&path).expect("failed to save test image");
    path
}
