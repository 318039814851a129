/*
 *  providers/panel.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Framed text panels sized in character cells
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

use crate::slide::Slide;

/// Character grid for a 320x240 screen with the 9x18 font
pub const PANEL_COLUMNS: usize = 32;
pub const PANEL_ROWS: usize = 12;

// top border, title, divider, bottom border
const CHROME_ROWS: usize = 4;

/// Builds boxed text slides:
///
/// ```text
/// +------------------------------+
/// | TITLE                        |
/// +------------------------------+
/// | body line                    |
/// |                              |
/// +------------------------------+
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Panel {
    columns: usize,
    rows: usize,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(PANEL_COLUMNS, PANEL_ROWS)
    }
}

impl Panel {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(8),
            rows: rows.max(CHROME_ROWS + 1),
        }
    }

    /// Usable characters per body line
    pub fn body_width(&self) -> usize {
        self.columns - 4
    }

    pub fn body_rows(&self) -> usize {
        self.rows - CHROME_ROWS
    }

    /// One panel; body lines past the panel height are dropped.
    pub fn text_slide(&self, title: &str, body: &str) -> Slide {
        Slide::text(self.frame(title, &self.wrap(body)))
    }

    /// As many panels as the wrapped body needs.
    pub fn text_slides(&self, title: &str, body: &str) -> Vec<Slide> {
        let lines = self.wrap(body);
        if lines.is_empty() {
            return vec![Slide::text(self.frame(title, &[]))];
        }
        lines
            .chunks(self.body_rows())
            .map(|page| Slide::text(self.frame(title, page)))
            .collect()
    }

    pub fn progress_slide(&self, title: &str, label: &str, percent: f64) -> Slide {
        let mut lines = self.wrap(label);
        lines.push(String::new());
        // "[", "]" and " 100.0%" take 9 cells
        let bar_width = self.body_width().saturating_sub(9).max(1);
        lines.push(progress_bar(percent, bar_width));
        Slide::text(self.frame(title, &lines))
    }

    pub fn frame(&self, title: &str, body: &[String]) -> String {
        let inner = self.columns - 2;
        let border = format!("+{}+", "-".repeat(inner));

        let max_title = self.columns - 4;
        let title: String = if title.chars().count() > max_title {
            let keep: String = title.chars().take(max_title - 3).collect();
            format!("{}...", keep)
        } else {
            title.to_string()
        };

        let mut out = Vec::with_capacity(self.rows);
        out.push(border.clone());
        out.push(format!("| {:<width$}|", title, width = self.columns - 3));
        out.push(border.clone());
        for line in body.iter().take(self.body_rows()) {
            let line: String = line.chars().take(self.body_width()).collect();
            out.push(format!("| {:<width$}|", line, width = self.columns - 3));
        }
        while out.len() < self.rows - 1 {
            out.push(format!("|{}|", " ".repeat(inner)));
        }
        out.push(border);
        out.join("\n")
    }

    /// Greedy word wrap to the body width; blank input lines are kept.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let width = self.body_width();
        let mut lines = Vec::new();
        for para in text.split('\n') {
            if para.trim().is_empty() {
                lines.push(String::new());
                continue;
            }
            let mut current = String::new();
            for word in para.split_whitespace() {
                let mut word: Vec<char> = word.chars().collect();
                // words longer than a line are split hard
                while word.len() > width {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    lines.push(word.drain(..width).collect());
                }
                let word: String = word.into_iter().collect();
                if word.is_empty() {
                    continue;
                }
                let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
                if current.chars().count() + needed > width {
                    lines.push(std::mem::take(&mut current));
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&word);
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }
}

/// `[#####.....] 50.0%`
pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((width as f64) * clamped / 100.0).round() as usize;
    format!(
        "[{}{}] {:.1}%",
        "#".repeat(filled),
        ".".repeat(width - filled.min(width)),
        clamped
    )
}
