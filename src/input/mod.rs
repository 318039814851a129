/*
 *  input/mod.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Knob, button and console navigation
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

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error, info};
use thiserror::Error;

use crate::config::EncoderSettings;
use crate::cursor::Cursor;

pub mod console;
pub mod encoder;
#[cfg(feature = "gpio")]
pub mod gpio;

pub use console::ConsoleInput;
pub use encoder::{KnobDecoder, PinReader};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("GPIO error: {0}")]
    Gpio(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("input source closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One navigation gesture, already debounced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Rotate(Direction),
    Press,
}

/// Apply a gesture to the cursor. Every gesture preempts the current dwell.
pub fn dispatch(event: InputEvent, cursor: &Cursor) {
    debug!("input {:?}", event);
    match event {
        InputEvent::Rotate(Direction::Forward) => cursor.next(true),
        InputEvent::Rotate(Direction::Backward) => cursor.prev(true),
        InputEvent::Press => cursor.restart(),
    }
}

/// Poll the knob on its own thread for the life of the process.
pub fn spawn_encoder(
    pins: Box<dyn PinReader>,
    settings: &EncoderSettings,
    cursor: Arc<Cursor>,
) -> io::Result<JoinHandle<()>> {
    let decoder = KnobDecoder::new(settings.button_debounce, settings.rotary_debounce);
    let interval = settings.sample_interval;
    thread::Builder::new().name("encoder".into()).spawn(move || {
        match encoder::poll(pins, decoder, interval, &cursor) {
            Ok(()) | Err(InputError::Closed) => info!("encoder input stopped"),
            Err(e) => error!("encoder input failed: {}", e),
        }
    })
}

/// Read n/p/r commands from stdin on its own thread.
pub fn spawn_console(cursor: Arc<Cursor>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new().name("console".into()).spawn(move || {
        let stdin = io::stdin();
        match ConsoleInput::new(stdin.lock()).run(&cursor) {
            Ok(()) => info!("console input closed"),
            Err(e) => error!("console input failed: {}", e),
        }
    })
}
