/*
 *  providers/static_text.rs
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

use super::{ContentProvider, Panel, ProviderError};
use crate::slide::Slide;

/// A fixed message, plain or framed in a panel.
pub struct StaticText {
    name: String,
    slide: Slide,
}

impl StaticText {
    pub fn plain(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), slide: Slide::text(text) }
    }

    pub fn framed(name: impl Into<String>, panel: &Panel, title: &str, body: &str) -> Self {
        Self { name: name.into(), slide: panel.text_slide(title, body) }
    }
}

impl ContentProvider for StaticText {
    fn name(&self) -> &str {
        &self.name
    }

    fn slides(&self) -> Result<Vec<Slide>, ProviderError> {
        match &self.slide {
            Slide::Text { content } if content.trim().is_empty() => Err(ProviderError::Empty),
            slide => Ok(vec![slide.clone()]),
        }
    }
}
