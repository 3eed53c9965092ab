//! Filled shapes for banner backgrounds.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

/// Fill a rounded rectangle anchored at the image origin.
///
/// Pixels are written, not blended, so a translucent `color` ends up with
/// exactly its own alpha. `radius` is clamped to half the shorter side.
pub fn fill_rounded_rect(img: &mut RgbaImage, width: u32, height: u32, radius: u32, color: Rgba<u8>) {
    let width = width.min(img.width());
    let height = height.min(img.height());
    if width == 0 || height == 0 {
        return;
    }
    let r = radius.min(width / 2).min(height / 2);

    if width > 2 * r {
        draw_filled_rect_mut(
            img,
            Rect::at(r as i32, 0).of_size(width - 2 * r, height),
            color,
        );
    }
    if height > 2 * r {
        draw_filled_rect_mut(
            img,
            Rect::at(0, r as i32).of_size(width, height - 2 * r),
            color,
        );
    }
    if r == 0 {
        return;
    }

    let left = r as i32;
    let right = (width - 1 - r) as i32;
    let top = r as i32;
    let bottom = (height - 1 - r) as i32;
    for (cx, cy) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
        draw_filled_circle_mut(img, (cx, cy), r as i32, color);
    }
}
