/*
 *  display/manager.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Renders slides and pushes them to the sink, never failing
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

use log::{debug, warn};

use crate::display::error::DisplayError;
use crate::display::render::SlideRenderer;
use crate::display::traits::BoxedSink;
use crate::slide::Slide;

/// What ended up on screen for one slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    Slide,
    /// The slide could not be rendered, a blank frame went out instead
    Blank,
}

/// Owns the renderer and the sink.
///
/// From the slideshow's point of view showing a slide cannot fail: render
/// errors turn into a blank frame and sink errors are logged and dropped.
pub struct DisplayManager {
    renderer: SlideRenderer,
    sink: BoxedSink,
}

impl DisplayManager {
    pub fn new(renderer: SlideRenderer, sink: BoxedSink) -> Result<Self, DisplayError> {
        if renderer.dimensions() != sink.dimensions() {
            let (w, h) = renderer.dimensions();
            let (sw, sh) = sink.dimensions();
            return Err(DisplayError::InvalidConfiguration(format!(
                "renderer is {}x{} but sink '{}' is {}x{}",
                w, h, sink.name(), sw, sh
            )));
        }
        Ok(Self { renderer, sink })
    }

    pub fn show(&mut self, slide: &Slide) -> Shown {
        let (frame, shown) = match self.renderer.render(slide) {
            Ok(frame) => (frame, Shown::Slide),
            Err(e) => {
                warn!("Could not render {}: {}", slide.label(), e);
                (self.renderer.blank(), Shown::Blank)
            }
        };
        if let Err(e) = self.sink.render(&frame) {
            warn!("Display '{}' rejected frame: {}", self.sink.name(), e);
        } else {
            debug!("Showing {}", slide.label());
        }
        shown
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.sink.clear() {
            warn!("Failed to clear display '{}': {}", self.sink.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockDisplay;
    use crate::slide::ImageSource;
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::prelude::*;

    fn manager() -> (DisplayManager, MockDisplay) {
        let mock = MockDisplay::new(320, 240);
        let renderer = SlideRenderer::new(320, 240).unwrap();
        (DisplayManager::new(renderer, Box::new(mock.clone())).unwrap(), mock)
    }

    #[test]
    fn test_show_text() {
        let (mut display, mock) = manager();
        assert_eq!(display.show(&Slide::text("hello")), Shown::Slide);
        assert_eq!(mock.frame_count(), 1);
    }

    #[test]
    fn test_broken_image_shows_blank() {
        let (mut display, mock) = manager();
        let slide = Slide::image(ImageSource::Path("/no/such/image.png".into()));
        assert_eq!(display.show(&slide), Shown::Blank);
        let frame = mock.last_frame().unwrap();
        assert!(frame.as_slice().iter().all(|&c| c == Rgb888::BLACK));
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let (mut display, mock) = manager();
        mock.state().lock().unwrap().simulate_render_failure = true;
        assert_eq!(display.show(&Slide::text("hello")), Shown::Slide);
        assert_eq!(mock.frame_count(), 0);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let renderer = SlideRenderer::new(320, 240).unwrap();
        let sink = Box::new(MockDisplay::new(128, 64));
        assert!(DisplayManager::new(renderer, sink).is_err());
    }
}
