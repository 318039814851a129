/*
 *  display/render.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Turns slides into frames
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

use std::fs;
use std::time::Duration;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_6X10, FONT_9X18},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::Rgb888,
    prelude::*,
    primitives::Rectangle,
};
use embedded_text::{
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::{HeightMode, TextBoxStyleBuilder, VerticalOverdraw},
    TextBox,
};
use image::{imageops, imageops::FilterType, RgbaImage};
use log::debug;
use reqwest::blocking::Client;

use crate::display::error::RenderError;
use crate::display::framebuffer::{blank_frame, Frame};
use crate::slide::{ImageSource, Slide};

/// Amber on black, easy on the eyes at night
pub const TEXT_COLOR: Rgb888 = Rgb888::new(255, 191, 0);
pub const TEXT_MARGIN: i32 = 10;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Composes frames of a fixed size from slides.
pub struct SlideRenderer {
    width: u32,
    height: u32,
    font: MonoFont<'static>,
    client: Client,
}

impl SlideRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        // the 9x18 font fits a 32x12 panel on a 320x240 screen
        let font = if width >= 300 && height >= 230 { FONT_9X18 } else { FONT_6X10 };
        Ok(Self { width, height, font, client })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn blank(&self) -> Frame {
        blank_frame(self.width, self.height)
    }

    pub fn render(&self, slide: &Slide) -> Result<Frame, RenderError> {
        match slide {
            Slide::Text { content } => self.render_text(content),
            Slide::Image { source } => self.render_image(source),
        }
    }

    fn render_text(&self, content: &str) -> Result<Frame, RenderError> {
        let mut frame = self.blank();
        let margin = TEXT_MARGIN as u32;
        let bounds = Rectangle::new(
            Point::new(TEXT_MARGIN, TEXT_MARGIN),
            Size::new(
                self.width.saturating_sub(2 * margin),
                self.height.saturating_sub(2 * margin),
            ),
        );
        let character_style = MonoTextStyle::new(&self.font, TEXT_COLOR);
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Left)
            .vertical_alignment(VerticalAlignment::Top)
            .height_mode(HeightMode::Exact(VerticalOverdraw::Hidden))
            .build();

        TextBox::with_textbox_style(content, bounds, character_style, textbox_style)
            .draw(&mut frame)
            .map_err(|_| RenderError::Text)?;
        Ok(frame)
    }

    fn render_image(&self, source: &ImageSource) -> Result<Frame, RenderError> {
        let img = match source {
            ImageSource::Url(url) => {
                debug!("fetching image {}", url);
                let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
                self.decode(&bytes)?
            }
            ImageSource::Path(path) => {
                let bytes = fs::read(path)?;
                self.decode(&bytes)?
            }
            ImageSource::Bitmap(img) => cover(img, self.width, self.height),
        };

        let mut frame = self.blank();
        blit(&img, &mut frame);
        Ok(frame)
    }

    /// Raster formats are scaled to cover the screen, SVG is fitted inside it.
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, RenderError> {
        if looks_like_svg(bytes) {
            return rasterize_svg(bytes, self.width, self.height);
        }
        let img = image::load_from_memory(bytes)?.to_rgba8();
        Ok(cover(&img, self.width, self.height))
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .find(|&&b| b != 0xEF && b != 0xBB && b != 0xBF && !b.is_ascii_whitespace())
        == Some(&b'<')
}

/// Crop the centre to the aspect of `w`x`h`, then scale to fit exactly.
///
/// Cropping first keeps the intermediate no larger than the source, however
/// extreme its aspect ratio.
pub fn cover(img: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    let (src_w, src_h) = img.dimensions();
    if src_w == 0 || src_h == 0 || w == 0 || h == 0 {
        return RgbaImage::new(w, h);
    }
    if (src_w, src_h) == (w, h) {
        return img.clone();
    }

    let src_ratio = src_w as f64 / src_h as f64;
    let target_ratio = w as f64 / h as f64;

    let (crop_w, crop_h) = if src_ratio > target_ratio {
        // wider: keep the full height, trim the sides
        (((src_h as f64 * target_ratio).round() as u32).clamp(1, src_w), src_h)
    } else {
        // taller: keep the full width, trim top and bottom
        (src_w, ((src_w as f64 / target_ratio).round() as u32).clamp(1, src_h))
    };
    let left = (src_w - crop_w) / 2;
    let top = (src_h - crop_h) / 2;

    let cropped = imageops::crop_imm(img, left, top, crop_w, crop_h).to_image();
    imageops::resize(&cropped, w, h, FilterType::Lanczos3)
}

fn rasterize_svg(data: &[u8], w: u32, h: u32) -> Result<RgbaImage, RenderError> {
    use tiny_skia::{Pixmap, Transform};
    use usvg::{Options, Tree};

    let tree = Tree::from_data(data, &Options::default())
        .map_err(|e| RenderError::Svg(e.to_string()))?;
    let size = tree.size();
    let scale = (w as f32 / size.width()).min(h as f32 / size.height());
    let offset_x = (w as f32 - size.width() * scale) / 2.0;
    let offset_y = (h as f32 - size.height() * scale) / 2.0;

    let mut pixmap = Pixmap::new(w, h).ok_or_else(|| RenderError::Svg("empty pixmap".into()))?;
    let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // premultiplied RGBA equals the image composited over black
    let mut data = pixmap.take();
    for px in data.chunks_exact_mut(4) {
        px[3] = 255;
    }
    RgbaImage::from_raw(w, h, data).ok_or_else(|| RenderError::Svg("pixmap size".into()))
}

/// Copy into the frame, compositing over black.
fn blit(img: &RgbaImage, frame: &mut Frame) {
    for (x, y, px) in img.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let over_black = |c: u8| ((c as u16 * a as u16) / 255) as u8;
        frame.set_pixel(
            x as usize,
            y as usize,
            Rgb888::new(over_black(r), over_black(g), over_black(b)),
        );
    }
}
