/*
 *  input/console.rs
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

use std::io::BufRead;

use log::warn;

use crate::cursor::Cursor;
use crate::input::{dispatch, Direction, InputError, InputEvent};

/// Keyboard stand-in for the knob: `n` next, `p` previous, `r` restart.
pub struct ConsoleInput<R> {
    reader: R,
}

impl<R: BufRead> ConsoleInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Dispatch commands until end of input.
    pub fn run(&mut self, cursor: &Cursor) -> Result<(), InputError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match parse_command(&line) {
                Some(event) => dispatch(event, cursor),
                None if line.trim().is_empty() => {}
                None => warn!("unknown command {:?}, use n, p or r", line.trim()),
            }
        }
    }
}

pub fn parse_command(line: &str) -> Option<InputEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "n" | "next" => Some(InputEvent::Rotate(Direction::Forward)),
        "p" | "prev" => Some(InputEvent::Rotate(Direction::Backward)),
        "r" | "restart" => Some(InputEvent::Press),
        _ => None,
    }
}
