/*
 *  cursor.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Shared playlist position and the preemption signal
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

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::debug;

/// How an interruptible wait finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full dwell elapsed
    Expired,
    /// A navigation command arrived first
    Preempted,
}

#[derive(Debug, Default)]
struct CursorState {
    index: usize,
    len: usize,
    preempt: bool,
}

/// Lock-guarded position within the playlist.
///
/// Every read and write of the position goes through this type, so the
/// display loop and the input thread always serialize on the same mutex.
/// Setting the preemption flag also wakes a pending [`Cursor::wait`].
#[derive(Debug, Default)]
pub struct Cursor {
    state: Mutex<CursorState>,
    wake: Condvar,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self {
            state: Mutex::new(CursorState { index: 0, len, preempt: false }),
            wake: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CursorState> {
        // the state is a few integers, a panic mid-update cannot tear it
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current index, always < len for a non-empty playlist
    pub fn index(&self) -> usize {
        self.lock().index
    }

    pub fn len(&self) -> usize {
        self.lock().len
    }

    pub fn is_preempted(&self) -> bool {
        self.lock().preempt
    }

    /// Auto-advance step of the display loop. Never preempts.
    pub fn advance(&self) {
        let mut state = self.lock();
        if state.len == 0 {
            return;
        }
        state.index = (state.index + 1) % state.len;
    }

    pub fn next(&self, from_input: bool) {
        let mut state = self.lock();
        if state.len == 0 {
            return;
        }
        state.index = (state.index + 1) % state.len;
        debug!("cursor next -> {}", state.index);
        if from_input {
            self.raise(&mut state);
        }
    }

    pub fn prev(&self, from_input: bool) {
        let mut state = self.lock();
        if state.len == 0 {
            return;
        }
        state.index = (state.index + state.len - 1) % state.len;
        debug!("cursor prev -> {}", state.index);
        if from_input {
            self.raise(&mut state);
        }
    }

    pub fn restart(&self) {
        let mut state = self.lock();
        state.index = 0;
        debug!("cursor restart");
        self.raise(&mut state);
    }

    /// Cut a pending wait short without moving.
    pub fn interrupt(&self) {
        let mut state = self.lock();
        self.raise(&mut state);
    }

    /// Read and clear the preemption flag in one step.
    pub fn take_preempt(&self) -> bool {
        let mut state = self.lock();
        std::mem::replace(&mut state.preempt, false)
    }

    /// Point at a freshly stored playlist of `len` slides, starting over at 0.
    pub fn rebase(&self, len: usize) {
        let mut state = self.lock();
        state.len = len;
        state.index = 0;
    }

    fn raise(&self, state: &mut CursorState) {
        state.preempt = true;
        self.wake.notify_all();
    }

    /// Sleep for `duration`, returning early once the preemption flag is set.
    ///
    /// Each timed wait lasts at most `step`, so the flag is re-checked at
    /// that granularity even without a wake-up notification.
    pub fn wait(&self, duration: Duration, step: Duration) -> WaitOutcome {
        // no deadline means wait for a command
        let deadline = Instant::now().checked_add(duration);
        let step = step.max(Duration::from_millis(1));
        let mut state = self.lock();
        loop {
            if state.preempt {
                return WaitOutcome::Preempted;
            }
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return WaitOutcome::Expired;
                    }
                    (deadline - now).min(step)
                }
                None => step,
            };
            state = match self.wake.wait_timeout(state, slice) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_next_then_prev_cycles_back() {
        for len in 1..6 {
            for start in 0..len {
                let cursor = Cursor::new(len);
                for _ in 0..start {
                    cursor.advance();
                }
                cursor.next(true);
                cursor.prev(true);
                assert_eq!(cursor.index(), start);
                cursor.prev(true);
                cursor.next(true);
                assert_eq!(cursor.index(), start);
            }
        }
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let len = 4;
        let cursor = Cursor::new(len);
        cursor.next(false);
        cursor.next(false);
        let start = cursor.index();
        for _ in 0..len {
            cursor.prev(false);
        }
        assert_eq!(cursor.index(), start);
        for _ in 0..len {
            cursor.next(false);
        }
        assert_eq!(cursor.index(), start);
    }

    #[test]
    fn test_prev_wraps_to_end() {
        let cursor = Cursor::new(3);
        cursor.prev(false);
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_restart_always_zero_and_preempts() {
        let cursor = Cursor::new(5);
        cursor.next(false);
        cursor.next(false);
        cursor.restart();
        assert_eq!(cursor.index(), 0);
        assert!(cursor.take_preempt());

        let empty = Cursor::new(0);
        empty.restart();
        assert_eq!(empty.index(), 0);
        assert!(empty.is_preempted());
    }

    #[test]
    fn test_only_input_navigation_preempts() {
        let cursor = Cursor::new(3);
        cursor.advance();
        cursor.next(false);
        cursor.prev(false);
        assert!(!cursor.is_preempted());
        cursor.next(true);
        assert!(cursor.is_preempted());
        assert!(cursor.take_preempt());
        assert!(!cursor.take_preempt());
        cursor.prev(true);
        assert!(cursor.take_preempt());
    }

    #[test]
    fn test_empty_cursor_navigation_is_noop() {
        let cursor = Cursor::new(0);
        cursor.next(true);
        cursor.prev(true);
        cursor.advance();
        assert_eq!(cursor.index(), 0);
        assert!(!cursor.is_preempted());
    }

    #[test]
    fn test_rebase_resets_index() {
        let cursor = Cursor::new(10);
        for _ in 0..7 {
            cursor.advance();
        }
        cursor.rebase(2);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.len(), 2);
    }

    #[test]
    fn test_wait_expires_without_preemption() {
        let cursor = Cursor::new(2);
        let started = Instant::now();
        let outcome = cursor.wait(Duration::from_millis(60), Duration::from_millis(10));
        assert_eq!(outcome, WaitOutcome::Expired);
        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_wait_returns_promptly_when_preempted() {
        let cursor = Arc::new(Cursor::new(3));
        let remote = Arc::clone(&cursor);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.next(true);
        });

        let started = Instant::now();
        let outcome = cursor.wait(Duration::from_secs(10), Duration::from_millis(10));
        let elapsed = started.elapsed();
        handle.join().unwrap();

        assert_eq!(outcome, WaitOutcome::Preempted);
        assert!(elapsed < Duration::from_millis(50 + 100), "took {:?}", elapsed);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_wait_with_unrepresentable_deadline() {
        let cursor = Arc::new(Cursor::new(3));
        let knob = Arc::clone(&cursor);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            knob.next(true);
        });
        let outcome = cursor.wait(Duration::MAX, Duration::from_millis(10));
        handle.join().unwrap();
        assert_eq!(outcome, WaitOutcome::Preempted);
    }

    #[test]
    fn test_wait_sees_flag_raised_before_it_starts() {
        let cursor = Cursor::new(3);
        cursor.restart();
        let outcome = cursor.wait(Duration::from_secs(5), Duration::from_millis(10));
        assert_eq!(outcome, WaitOutcome::Preempted);
    }
}
