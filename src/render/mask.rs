use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

const INSIDE: Luma<u8> = Luma([255]);

/// Alpha mask of a `w`x`h` rounded rectangle: 255 inside, 0 outside.
/// The radius is clamped to half the shorter side.
pub fn rounded_mask(w: u32, h: u32, radius: u32) -> GrayImage {
    let r = radius.min(w / 2).min(h / 2);
    if r == 0 {
        return GrayImage::from_pixel(w, h, INSIDE);
    }

    let mut mask = GrayImage::new(w, h);
    let ri = r as i32;

    // Cross of two rects covers everything but the corner squares
    if h > 2 * r {
        draw_filled_rect_mut(&mut mask, Rect::at(0, ri).of_size(w, h - 2 * r), INSIDE);
    }
    if w > 2 * r {
        draw_filled_rect_mut(&mut mask, Rect::at(ri, 0).of_size(w - 2 * r, h), INSIDE);
    }

    let (right, bottom) = (w as i32 - 1 - ri, h as i32 - 1 - ri);
    for center in [(ri, ri), (right, ri), (ri, bottom), (right, bottom)] {
        draw_filled_circle_mut(&mut mask, center, ri, INSIDE);
    }

    mask
}
