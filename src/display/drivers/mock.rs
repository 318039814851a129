/*
 *  display/drivers/mock.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Recording sink for tests
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

use std::sync::{Arc, Mutex, PoisonError};

use crate::display::error::DisplayError;
use crate::display::framebuffer::Frame;
use crate::display::traits::FrameSink;

/// Mock frame sink
///
/// Keeps every frame it is given so tests can inspect what would have been
/// on screen. State is shared through an `Arc` so a test can keep a handle
/// after the sink has been boxed and moved into the slideshow.
#[derive(Debug, Clone)]
pub struct MockDisplay {
    width: u32,
    height: u32,
    state: Arc<Mutex<MockDisplayState>>,
}

/// Internal state for the mock sink (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockDisplayState {
    /// Frames shown, oldest first
    pub frames: Vec<Frame>,

    /// Number of times init() was called
    pub init_count: usize,

    /// Simulate failures (for error testing)
    pub simulate_render_failure: bool,
}

impl MockDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: Arc::new(Mutex::new(MockDisplayState::default())),
        }
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockDisplayState>> {
        Arc::clone(&self.state)
    }

    pub fn frame_count(&self) -> usize {
        self.lock().frames.len()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.lock().frames.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockDisplayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrameSink for MockDisplay {
    fn name(&self) -> &str {
        "mock"
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.lock().init_count += 1;
        Ok(())
    }

    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.check_size(frame)?;
        let mut state = self.lock();
        if state.simulate_render_failure {
            return Err(DisplayError::Other("Simulated render failure".to_string()));
        }
        state.frames.push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::blank_frame;

    #[test]
    fn test_records_frames() {
        let mut sink = MockDisplay::new(4, 4);
        sink.init().unwrap();
        sink.render(&blank_frame(4, 4)).unwrap();
        sink.clear().unwrap();
        assert_eq!(sink.frame_count(), 2);
        assert_eq!(sink.state().lock().unwrap().init_count, 1);
    }

    #[test]
    fn test_rejects_wrong_size() {
        let mut sink = MockDisplay::new(4, 4);
        let err = sink.render(&blank_frame(2, 2)).unwrap_err();
        assert!(matches!(err, DisplayError::SizeMismatch { .. }));
        assert_eq!(sink.frame_count(), 0);
    }

    #[test]
    fn test_simulated_failure() {
        let mut sink = MockDisplay::new(4, 4);
        sink.state().lock().unwrap().simulate_render_failure = true;
        assert!(sink.render(&blank_frame(4, 4)).is_err());
    }
}
