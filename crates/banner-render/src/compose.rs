//! Image composition: alpha-composite banners and icons onto a canvas.

use image::{DynamicImage, Rgba, RgbaImage};

/// Overlay `top` onto `base` at a signed position.
///
/// Uses source-over compositing so translucent pixels keep translucent
/// results on a translucent base. Parts outside `base` are clipped.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx as i64;
        let target_y = y + dy as i64;
        if target_x < 0
            || target_y < 0
            || target_x >= base.width() as i64
            || target_y >= base.height() as i64
        {
            continue;
        }
        let (tx, ty) = (target_x as u32, target_y as u32);
        let alpha = pixel[3] as f32 / 255.0;
        if alpha > 0.99 {
            base.put_pixel(tx, ty, *pixel);
        } else if alpha > 0.01 {
            let bg = *base.get_pixel(tx, ty);
            base.put_pixel(tx, ty, blend_pixel(&bg, pixel, alpha));
        }
    }
}

/// Overlay a decoded image, converting it to RGBA first.
pub fn overlay_image(base: &mut RgbaImage, top: &DynamicImage, x: i64, y: i64) {
    overlay(base, &top.to_rgba8(), x, y);
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let bg_alpha = bg[3] as f32 / 255.0;
    let out_alpha = alpha + bg_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let c = (fg[i] as f32 * alpha + bg[i] as f32 * bg_alpha * (1.0 - alpha)) / out_alpha;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_alpha * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_does_not_panic_on_out_of_bounds() {
        let mut base = RgbaImage::new(100, 100);
        let top = RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 255]));
        overlay(&mut base, &top, 80, 80);
        overlay(&mut base, &top, -30, -30);
        assert_eq!(base.get_pixel(99, 99), &Rgba([255, 0, 0, 255]));
        assert_eq!(base.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(base.get_pixel(50, 50)[3], 0);
    }

    #[test]
    fn translucent_over_transparent_keeps_source_color() {
        let mut base = RgbaImage::new(1, 1);
        let top = RgbaImage::from_pixel(1, 1, Rgba([136, 136, 136, 128]));
        overlay(&mut base, &top, 0, 0);
        assert_eq!(base.get_pixel(0, 0), &Rgba([136, 136, 136, 128]));
    }

    #[test]
    fn translucent_over_opaque_blends() {
        let mut base = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let top = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
        overlay(&mut base, &top, 0, 0);
        let px = base.get_pixel(0, 0);
        assert_eq!(px[3], 255);
        assert!(px[0] > 120 && px[0] < 135);
    }
}
