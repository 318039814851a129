/*
 *  display/drivers/snapshot.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Headless sink writing the current frame to an image file
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

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};

use crate::display::error::DisplayError;
use crate::display::framebuffer::{to_rgb_image, Frame};
use crate::display::traits::FrameSink;

/// Replaces a PPM file with every frame shown; handy on a desktop or over ssh.
pub struct SnapshotSink {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl SnapshotSink {
    pub fn new(path: impl AsRef<Path>, width: u32, height: u32) -> Self {
        Self { path: path.as_ref().to_path_buf(), width, height }
    }
}

impl FrameSink for SnapshotSink {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.check_size(frame)?;
        // write then rename so viewers never see half a file
        let tmp = self.path.with_extension("ppm.tmp");
        let img = to_rgb_image(frame);
        let mut out = BufWriter::new(File::create(&tmp)?);
        PnmEncoder::new(&mut out)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
            .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
            .map_err(|e| DisplayError::Other(format!("PPM encode: {}", e)))?;
        out.flush()?;
        drop(out);
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Discards frames.
pub struct NullSink {
    width: u32,
    height: u32,
}

impl NullSink {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FrameSink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.check_size(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::blank_frame;
    use embedded_graphics::pixelcolor::Rgb888;

    #[test]
    fn test_snapshot_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slide.ppm");
        let mut sink = SnapshotSink::new(&path, 2, 2);
        sink.render(&blank_frame(2, 2)).unwrap();
        let mut frame = blank_frame(2, 2);
        frame.set_pixel(1, 0, Rgb888::new(10, 20, 30));
        sink.render(&frame).unwrap();

        assert!(fs::read(&path).unwrap().starts_with(b"P6"));
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0), &image::Rgb([10, 20, 30]));
        assert!(!dir.path().join("slide.ppm.tmp").exists());
    }

    #[test]
    fn test_null_sink_checks_size() {
        let mut sink = NullSink::new(2, 2);
        assert!(sink.render(&blank_frame(2, 2)).is_ok());
        assert!(sink.render(&blank_frame(3, 2)).is_err());
    }
}
