/*
 *  input/encoder.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Rotary encoder decoding
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

use std::thread;
use std::time::{Duration, Instant};

use crate::cursor::Cursor;
use crate::input::{dispatch, Direction, InputError, InputEvent};

/// Pin levels read in one pass, `true` is high
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub clk: bool,
    pub dt: bool,
    pub sw: bool,
}

impl Sample {
    pub const IDLE: Sample = Sample { clk: true, dt: true, sw: true };
}

/// Source of raw pin levels
pub trait PinReader: Send {
    fn sample(&mut self) -> Result<Sample, InputError>;
}

/// Turns raw pin samples into debounced gestures.
///
/// Rotation is read on the rising CLK edge: DT differing from CLK is a
/// forward detent, DT matching is backward. Once an edge is seen further CLK
/// changes are ignored until the settle delay has passed. The button is
/// active low and fires on the press edge, at most once per debounce window.
#[derive(Debug)]
pub struct KnobDecoder {
    last_clk: Option<bool>,
    last_sw: bool,
    settle_until: Option<Instant>,
    last_press: Option<Instant>,
    button_debounce: Duration,
    rotary_debounce: Duration,
}

impl KnobDecoder {
    pub fn new(button_debounce: Duration, rotary_debounce: Duration) -> Self {
        Self {
            last_clk: None,
            last_sw: true,
            settle_until: None,
            last_press: None,
            button_debounce,
            rotary_debounce,
        }
    }

    pub fn feed(&mut self, sample: Sample, now: Instant) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let settling = self.settle_until.is_some_and(|until| now < until);
        match self.last_clk {
            // first sample only establishes the resting level
            None => self.last_clk = Some(sample.clk),
            Some(last) if last != sample.clk && !settling => {
                self.last_clk = Some(sample.clk);
                self.settle_until = Some(now + self.rotary_debounce);
                if sample.clk {
                    let direction = if sample.dt != sample.clk {
                        Direction::Forward
                    } else {
                        Direction::Backward
                    };
                    events.push(InputEvent::Rotate(direction));
                }
            }
            Some(_) => {}
        }

        let pressed = !sample.sw;
        if pressed && self.last_sw {
            let due = self
                .last_press
                .is_none_or(|at| now.saturating_duration_since(at) > self.button_debounce);
            if due {
                self.last_press = Some(now);
                events.push(InputEvent::Press);
            }
        }
        self.last_sw = sample.sw;

        events
    }
}

/// Sample pins forever, feeding decoded gestures to the cursor.
///
/// Returns only when the reader fails or runs dry.
pub fn poll(
    mut pins: Box<dyn PinReader>,
    mut decoder: KnobDecoder,
    interval: Duration,
    cursor: &Cursor,
) -> Result<(), InputError> {
    loop {
        let sample = pins.sample()?;
        for event in decoder.feed(sample, Instant::now()) {
            dispatch(event, cursor);
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    const BUTTON: Duration = Duration::from_millis(50);
    const ROTARY: Duration = Duration::from_millis(2);

    fn s(clk: bool, dt: bool, sw: bool) -> Sample {
        Sample { clk, dt, sw }
    }

    fn ms(base: Instant, n: u64) -> Instant {
        base + Duration::from_millis(n)
    }

    #[test]
    fn test_rising_edge_directions() {
        let t = Instant::now();
        let mut d = KnobDecoder::new(BUTTON, ROTARY);
        assert!(d.feed(s(false, false, true), t).is_empty());
        assert_eq!(
            d.feed(s(true, false, true), ms(t, 10)),
            vec![InputEvent::Rotate(Direction::Forward)]
        );
        assert!(d.feed(s(false, false, true), ms(t, 20)).is_empty());
        assert_eq!(
            d.feed(s(true, true, true), ms(t, 30)),
            vec![InputEvent::Rotate(Direction::Backward)]
        );
    }

    #[test]
    fn test_contact_bounce_within_settle_is_ignored() {
        let t = Instant::now();
        let mut d = KnobDecoder::new(BUTTON, Duration::from_millis(5));
        d.feed(s(false, false, true), t);
        assert_eq!(d.feed(s(true, false, true), ms(t, 1)).len(), 1);
        // chatter during the settle window
        assert!(d.feed(s(false, false, true), ms(t, 2)).is_empty());
        assert!(d.feed(s(true, false, true), ms(t, 3)).is_empty());
        // still high after settling, so no new edge
        assert!(d.feed(s(true, false, true), ms(t, 10)).is_empty());
    }

    #[test]
    fn test_button_fires_once_per_press() {
        let t = Instant::now();
        let mut d = KnobDecoder::new(BUTTON, ROTARY);
        d.feed(Sample::IDLE, t);
        assert_eq!(d.feed(s(true, true, false), ms(t, 1)), vec![InputEvent::Press]);
        // held down
        assert!(d.feed(s(true, true, false), ms(t, 100)).is_empty());
        assert!(d.feed(Sample::IDLE, ms(t, 110)).is_empty());
        assert_eq!(d.feed(s(true, true, false), ms(t, 200)), vec![InputEvent::Press]);
    }

    #[test]
    fn test_button_bounce_suppressed() {
        let t = Instant::now();
        let mut d = KnobDecoder::new(BUTTON, ROTARY);
        d.feed(Sample::IDLE, t);
        assert_eq!(d.feed(s(true, true, false), ms(t, 1)).len(), 1);
        d.feed(Sample::IDLE, ms(t, 5));
        assert!(d.feed(s(true, true, false), ms(t, 10)).is_empty());
    }

    struct Scripted(VecDeque<Sample>);

    impl PinReader for Scripted {
        fn sample(&mut self) -> Result<Sample, InputError> {
            self.0.pop_front().ok_or(InputError::Closed)
        }
    }

    #[test]
    fn test_poll_drives_cursor() {
        // forward, forward, backward, as CLK/DT pairs
        let script = [
            s(false, false, true),
            s(true, false, true),
            s(false, false, true),
            s(true, false, true),
            s(false, false, true),
            s(true, true, true),
        ];
        let pins = Box::new(Scripted(script.into_iter().collect()));
        let cursor = Cursor::new(3);
        let decoder = KnobDecoder::new(BUTTON, Duration::ZERO);
        let result = poll(pins, decoder, Duration::ZERO, &cursor);
        assert!(matches!(result, Err(InputError::Closed)));
        assert_eq!(cursor.index(), 1);
    }
}
