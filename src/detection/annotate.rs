use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::Region;

const BOX_COLOR: Rgb<u8> = Rgb([0, 200, 0]);

/// 3x5 digit glyphs, one row per byte, low three bits used.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

const GLYPH_SCALE: u32 = 2;
const GLYPH_ADVANCE: u32 = 4 * GLYPH_SCALE;

/// Draw each region as a hollow rectangle on a copy of the normalized
/// candidate, numbered in detection order. Debugging artifact for human
/// review; nothing downstream reads it.
pub fn draw_regions(img: &RgbImage, regions: &[Region]) -> RgbImage {
    let mut annotated = img.clone();
    for (i, region) in regions.iter().enumerate() {
        draw_box(&mut annotated, region);
        let label_y = region.y.saturating_sub(5 * GLYPH_SCALE + 2);
        stamp_number(&mut annotated, i + 1, region.x, label_y);
    }
    annotated
}

fn draw_box(img: &mut RgbImage, region: &Region) {
    let rect = Rect::at(region.x as i32, region.y as i32).of_size(region.width, region.height);
    draw_hollow_rect_mut(img, rect, BOX_COLOR);
    // Second, inset outline for a 2 px border that survives downscaled viewing.
    if region.width > 2 && region.height > 2 {
        let inset = Rect::at(region.x as i32 + 1, region.y as i32 + 1)
            .of_size(region.width - 2, region.height - 2);
        draw_hollow_rect_mut(img, inset, BOX_COLOR);
    }
}

/// Stamp a decimal number with the built-in glyphs; keeps the preview free of
/// any font dependency.
fn stamp_number(img: &mut RgbImage, number: usize, x: u32, y: u32) {
    for (i, digit) in number.to_string().bytes().enumerate() {
        let glyph = &DIGITS[(digit - b'0') as usize];
        stamp_glyph(img, glyph, x + i as u32 * GLYPH_ADVANCE, y);
    }
}

fn stamp_glyph(img: &mut RgbImage, glyph: &[u8; 5], x: u32, y: u32) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..3u32 {
            if bits & (0b100 >> col) == 0 {
                continue;
            }
            for dy in 0..GLYPH_SCALE {
                for dx in 0..GLYPH_SCALE {
                    let px = x + col * GLYPH_SCALE + dx;
                    let py = y + row as u32 * GLYPH_SCALE + dy;
                    if px < img.width() && py < img.height() {
                        img.put_pixel(px, py, BOX_COLOR);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_does_not_mutate_input() {
        let img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        let regions = vec![Region {
            x: 20,
            y: 30,
            width: 40,
            height: 20,
        }];
        let annotated = draw_regions(&img, &regions);
        assert!(img.pixels().all(|p| *p == Rgb([255, 255, 255])));
        assert_eq!(*annotated.get_pixel(20, 30), BOX_COLOR);
        assert_eq!(*annotated.get_pixel(59, 49), BOX_COLOR);
    }

    #[test]
    fn label_near_top_edge_is_clipped_not_panicking() {
        let img = RgbImage::from_pixel(50, 50, Rgb([255, 255, 255]));
        let regions = vec![Region {
            x: 0,
            y: 0,
            width: 30,
            height: 10,
        }];
        let annotated = draw_regions(&img, &regions);
        assert_eq!(annotated.dimensions(), (50, 50));
    }
}
