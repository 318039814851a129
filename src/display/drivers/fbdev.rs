/*
 *  display/drivers/fbdev.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Linux framebuffer device (fbtft panels)
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

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::display::error::DisplayError;
use crate::display::framebuffer::{to_rgb565_le, Frame};
use crate::display::traits::FrameSink;

/// Writes RGB565 frames to a framebuffer device such as `/dev/fb1`.
///
/// The device is opened in `init()`; the panel geometry must match the
/// configured width and height.
pub struct FbdevSink {
    path: PathBuf,
    width: u32,
    height: u32,
    device: Option<File>,
}

impl FbdevSink {
    pub fn new(path: impl AsRef<Path>, width: u32, height: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            width,
            height,
            device: None,
        }
    }
}

impl FrameSink for FbdevSink {
    fn name(&self) -> &str {
        "fbdev"
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let device = OpenOptions::new().write(true).open(&self.path)?;
        info!("Opened framebuffer {} ({}x{})", self.path.display(), self.width, self.height);
        self.device = Some(device);
        Ok(())
    }

    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.check_size(frame)?;
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| DisplayError::Other(format!("{} not initialised", self.path.display())))?;
        device.seek(SeekFrom::Start(0))?;
        device.write_all(&to_rgb565_le(frame))?;
        device.flush()?;
        Ok(())
    }
}
