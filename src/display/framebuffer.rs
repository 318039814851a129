/*
 *  display/framebuffer.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Full-colour frames and their wire encodings
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use image::{Rgb, RgbImage};

use crate::vframebuf::VarFrameBuf;

/// One composed screen image
pub type Frame = VarFrameBuf<Rgb888>;

pub fn blank_frame(width: u32, height: u32) -> Frame {
    Frame::new(width, height, Rgb888::BLACK)
}

pub fn frame_size(frame: &Frame) -> (u32, u32) {
    (frame.width() as u32, frame.height() as u32)
}

/// RGB565, two bytes per pixel, little-endian (fbtft panels such as the ST7789)
pub fn to_rgb565_le(frame: &Frame) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.as_slice().len() * 2);
    for &px in frame.as_slice() {
        let raw = Rgb565::from(px).into_storage();
        out.extend_from_slice(&raw.to_le_bytes());
    }
    out
}

/// Copy into an `image` buffer for encoding
pub fn to_rgb_image(frame: &Frame) -> RgbImage {
    let (w, h) = frame_size(frame);
    RgbImage::from_fn(w, h, |x, y| {
        let px = frame.pixel(x as usize, y as usize).unwrap_or(Rgb888::BLACK);
        Rgb([px.r(), px.g(), px.b()])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_packing() {
        let mut frame = blank_frame(2, 1);
        frame.set_pixel(0, 0, Rgb888::RED);
        frame.set_pixel(1, 0, Rgb888::WHITE);
        assert_eq!(to_rgb565_le(&frame), vec![0x00, 0xF8, 0xFF, 0xFF]);
    }

    #[test]
    fn test_rgb_image_copy() {
        let mut frame = blank_frame(3, 2);
        frame.set_pixel(2, 1, Rgb888::new(1, 2, 3));
        let img = to_rgb_image(&frame);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1), &Rgb([1, 2, 3]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }
}
