/*
 *  slide.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
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

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

/// Text shown when no provider produced anything.
pub const PLACEHOLDER_TEXT: &str = "No slides available.";

/// Where the pixels of an image slide come from.
#[derive(Clone)]
pub enum ImageSource {
    /// Remote image, fetched at render time
    Url(String),
    /// Already decoded bitmap held by the provider
    Bitmap(Arc<RgbaImage>),
    /// Image file on local storage (raster or .svg)
    Path(PathBuf),
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Url(url) => write!(f, "Url({})", url),
            ImageSource::Bitmap(img) => write!(f, "Bitmap({}x{})", img.width(), img.height()),
            ImageSource::Path(path) => write!(f, "Path({})", path.display()),
        }
    }
}

impl PartialEq for ImageSource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ImageSource::Url(a), ImageSource::Url(b)) => a == b,
            (ImageSource::Bitmap(a), ImageSource::Bitmap(b)) => Arc::ptr_eq(a, b),
            (ImageSource::Path(a), ImageSource::Path(b)) => a == b,
            _ => false,
        }
    }
}

/// One unit of displayable content.
#[derive(Debug, Clone, PartialEq)]
pub enum Slide {
    Text { content: String },
    Image { source: ImageSource },
}

impl Slide {
    pub fn text(content: impl Into<String>) -> Self {
        Slide::Text { content: content.into() }
    }

    pub fn image(source: ImageSource) -> Self {
        Slide::Image { source }
    }

    pub fn placeholder() -> Self {
        Slide::text(PLACEHOLDER_TEXT)
    }

    /// Short description for log lines
    pub fn label(&self) -> String {
        match self {
            Slide::Text { content } => {
                let first = content
                    .lines()
                    .find(|l| l.chars().any(char::is_alphanumeric))
                    .unwrap_or("")
                    .trim_matches(|c: char| !c.is_alphanumeric() && c != ' ')
                    .trim();
                let mut label: String = first.chars().take(24).collect();
                if first.chars().count() > 24 {
                    label.push('…');
                }
                format!("text \"{}\"", label)
            }
            Slide::Image { source } => format!("image {:?}", source),
        }
    }
}
