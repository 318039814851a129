/*
 *  display/traits.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  The output surface the slideshow draws to
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

use crate::display::error::DisplayError;
use crate::display::framebuffer::{blank_frame, frame_size, Frame};

/// A fixed-size output surface that shows whole frames.
///
/// Implementations push a fully composed frame to wherever pixels go: a
/// Linux framebuffer device, an image file, or a test recorder.
pub trait FrameSink: Send {
    /// Short name for log lines
    fn name(&self) -> &str;

    /// (width, height) in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Prepare the device; called once before the first frame
    fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Show one frame
    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Blank the surface
    fn clear(&mut self) -> Result<(), DisplayError> {
        let (w, h) = self.dimensions();
        self.render(&blank_frame(w, h))
    }

    /// Reject frames that do not match the surface
    fn check_size(&self, frame: &Frame) -> Result<(), DisplayError> {
        let expected = self.dimensions();
        let actual = frame_size(frame);
        if expected != actual {
            return Err(DisplayError::SizeMismatch { expected, actual });
        }
        Ok(())
    }
}

pub type BoxedSink = Box<dyn FrameSink>;
