/*
 *  dwell.rs
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

use std::time::Duration;

use crate::slide::Slide;

/// Seconds per content line are scaled by this reading-pace factor.
pub const READING_PACE: f64 = 0.66;

/// A text slide always counts as at least this many lines.
pub const MIN_CONTENT_LINES: usize = 1;

/// Upper bound on any single dwell.
pub const MAX_DWELL: Duration = Duration::from_secs(3600);

/// Derives how long a slide stays on screen.
#[derive(Debug, Clone, Copy)]
pub struct DwellCalculator {
    text_display_time: f64,
    image_display_time: f64,
}

impl DwellCalculator {
    pub fn new(text_display_time: f64, image_display_time: f64) -> Self {
        Self { text_display_time, image_display_time }
    }

    pub fn dwell(&self, slide: &Slide) -> Duration {
        let secs = match slide {
            Slide::Image { .. } => self.image_display_time,
            Slide::Text { content } => {
                self.text_display_time * content_lines(content) as f64 * READING_PACE
            }
        };
        Duration::try_from_secs_f64(secs.max(0.0))
            .unwrap_or(MAX_DWELL)
            .min(MAX_DWELL)
    }
}

/// Lines holding at least one letter or digit, floored at [`MIN_CONTENT_LINES`].
///
/// Box-drawing borders and blank spacer rows do not count.
pub fn content_lines(text: &str) -> usize {
    text.lines()
        .filter(|line| line.chars().any(|c| c.is_ascii_alphanumeric()))
        .count()
        .max(MIN_CONTENT_LINES)
}
