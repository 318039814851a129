/*
 *  display/error.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Error types for frame sinks and slide rendering
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

use std::error::Error;
use std::fmt;

/// Unified error type for frame sink operations
#[derive(Debug)]
pub enum DisplayError {
    /// Device or file I/O failed
    Io(std::io::Error),

    /// Invalid configuration
    InvalidConfiguration(String),

    /// Frame does not match the sink's geometry
    SizeMismatch { expected: (u32, u32), actual: (u32, u32) },

    /// Generic error with message
    Other(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Io(err) =>
                write!(f, "Display I/O error: {}", err),
            DisplayError::InvalidConfiguration(msg) =>
                write!(f, "Invalid configuration: {}", msg),
            DisplayError::SizeMismatch { expected, actual } =>
                write!(f, "Frame size mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1),
            DisplayError::Other(msg) =>
                write!(f, "{}", msg),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err)
    }
}

/// Why a slide could not be turned into a frame
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("image fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("SVG render failed: {0}")]
    Svg(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("text draw failed")]
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error_messages() {
        let err = DisplayError::SizeMismatch { expected: (320, 240), actual: (128, 64) };
        assert_eq!(err.to_string(), "Frame size mismatch: expected 320x240, got 128x64");

        let io = DisplayError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.source().is_some());
    }
}
