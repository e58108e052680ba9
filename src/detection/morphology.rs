//! Binary morphology over rectangular structuring elements.
//!
//! Dilation and erosion are separable for rectangular elements, so both are
//! implemented as a horizontal sliding-window pass followed by a vertical
//! one, giving O(w*h) cost independent of kernel size. Windows are clipped
//! at the image border: outside pixels count as background for dilation and
//! as foreground for erosion.

use image::GrayImage;

use crate::config::KernelSize;

/// Grow foreground regions by a rectangular structuring element, anchored at
/// its center. A wide, short kernel bridges the gaps between words on the
/// same line.
pub fn dilate(mask: &GrayImage, kernel: KernelSize) -> GrayImage {
    let (w, h) = mask.dimensions();
    let (w_us, h_us) = (w as usize, h as usize);

    let mut rows = vec![0u8; w_us * h_us];
    dilate_rows(mask.as_raw(), &mut rows, w_us, h_us, kernel.width as usize);
    let mut out = vec![0u8; w_us * h_us];
    dilate_cols(&rows, &mut out, w_us, h_us, kernel.height as usize);

    GrayImage::from_raw(w, h, out).expect("output buffer sized to input dimensions")
}

/// Shrink foreground regions by a rectangular structuring element; a pixel
/// survives only if the whole window around it is foreground.
pub fn erode(mask: &GrayImage, kernel: KernelSize) -> GrayImage {
    let (w, h) = mask.dimensions();
    let (w_us, h_us) = (w as usize, h as usize);

    let mut rows = vec![0u8; w_us * h_us];
    erode_rows(mask.as_raw(), &mut rows, w_us, h_us, kernel.width as usize);
    let mut out = vec![0u8; w_us * h_us];
    erode_cols(&rows, &mut out, w_us, h_us, kernel.height as usize);

    GrayImage::from_raw(w, h, out).expect("output buffer sized to input dimensions")
}

/// Morphological closing repeated `iterations` times: dilate n times, then
/// erode n times. Fills gaps inside strokes and removes speckles smaller
/// than the element.
pub fn close(mask: &GrayImage, kernel: KernelSize, iterations: u32) -> GrayImage {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = dilate(&current, kernel);
    }
    for _ in 0..iterations {
        current = erode(&current, kernel);
    }
    current
}

/// Horizontal dilation pass: sliding count of foreground pixels in the
/// window `[x - r_left, x + r_right]`.
fn dilate_rows(input: &[u8], output: &mut [u8], w: usize, h: usize, kernel_w: usize) {
    if kernel_w <= 1 {
        output.copy_from_slice(input);
        return;
    }
    let r_left = (kernel_w - 1) / 2;
    let r_right = kernel_w / 2;

    for y in 0..h {
        let row = y * w;
        let mut count = 0usize;

        for x in 0..=r_right.min(w - 1) {
            if input[row + x] > 0 {
                count += 1;
            }
        }

        for x in 0..w {
            output[row + x] = if count > 0 { 255 } else { 0 };

            let enter = x + r_right + 1;
            if enter < w && input[row + enter] > 0 {
                count += 1;
            }
            if x >= r_left && input[row + x - r_left] > 0 {
                count -= 1;
            }
        }
    }
}

/// Vertical dilation pass, same scheme over columns.
fn dilate_cols(input: &[u8], output: &mut [u8], w: usize, h: usize, kernel_h: usize) {
    if kernel_h <= 1 {
        output.copy_from_slice(input);
        return;
    }
    let r_top = (kernel_h - 1) / 2;
    let r_bot = kernel_h / 2;

    for x in 0..w {
        let mut count = 0usize;

        for y in 0..=r_bot.min(h - 1) {
            if input[y * w + x] > 0 {
                count += 1;
            }
        }

        for y in 0..h {
            output[y * w + x] = if count > 0 { 255 } else { 0 };

            let enter = y + r_bot + 1;
            if enter < h && input[enter * w + x] > 0 {
                count += 1;
            }
            if y >= r_top && input[(y - r_top) * w + x] > 0 {
                count -= 1;
            }
        }
    }
}

/// Horizontal erosion pass: sliding count of background pixels; the output
/// is foreground only when the in-bounds window contains none.
fn erode_rows(input: &[u8], output: &mut [u8], w: usize, h: usize, kernel_w: usize) {
    if kernel_w <= 1 {
        output.copy_from_slice(input);
        return;
    }
    let r_left = (kernel_w - 1) / 2;
    let r_right = kernel_w / 2;

    for y in 0..h {
        let row = y * w;
        let mut holes = 0usize;

        for x in 0..=r_right.min(w - 1) {
            if input[row + x] == 0 {
                holes += 1;
            }
        }

        for x in 0..w {
            output[row + x] = if holes == 0 { 255 } else { 0 };

            let enter = x + r_right + 1;
            if enter < w && input[row + enter] == 0 {
                holes += 1;
            }
            if x >= r_left && input[row + x - r_left] == 0 {
                holes -= 1;
            }
        }
    }
}

/// Vertical erosion pass, same scheme over columns.
fn erode_cols(input: &[u8], output: &mut [u8], w: usize, h: usize, kernel_h: usize) {
    if kernel_h <= 1 {
        output.copy_from_slice(input);
        return;
    }
    let r_top = (kernel_h - 1) / 2;
    let r_bot = kernel_h / 2;

    for x in 0..w {
        let mut holes = 0usize;

        for y in 0..=r_bot.min(h - 1) {
            if input[y * w + x] == 0 {
                holes += 1;
            }
        }

        for y in 0..h {
            output[y * w + x] = if holes == 0 { 255 } else { 0 };

            let enter = y + r_bot + 1;
            if enter < h && input[enter * w + x] == 0 {
                holes += 1;
            }
            if y >= r_top && input[(y - r_top) * w + x] == 0 {
                holes -= 1;
            }
        }
    }
}
