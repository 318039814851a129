/*
 *  scheduler.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  The display loop: render, dwell, advance
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

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info};

use crate::cursor::{Cursor, WaitOutcome};
use crate::display::DisplayManager;
use crate::dwell::DwellCalculator;
use crate::playlist::PlaylistStore;

/// Where the display loop is within one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Rendering,
    Waiting,
    Preempted,
    Expired,
    Advancing,
}

/// What one pass of the loop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub index: usize,
    pub dwell: Duration,
    pub outcome: WaitOutcome,
    pub advanced: bool,
}

/// Asks a running slideshow to finish its current cycle and stop.
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
    cursor: Arc<Cursor>,
}

impl StopHandle {
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.cursor.interrupt();
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Stop once a signal has arrived. If signals could not be watched the
    /// slideshow keeps running until the process is killed.
    pub fn stop_on_signal(&self, waited: std::io::Result<()>) {
        match waited {
            Ok(()) => self.request(),
            Err(e) => error!("Signal handling failed, running until killed: {}", e),
        }
    }
}

/// Owns everything the display loop touches.
///
/// The cursor is shared with the input threads; nothing else is.
pub struct Slideshow {
    store: PlaylistStore,
    cursor: Arc<Cursor>,
    dwell: DwellCalculator,
    display: DisplayManager,
    poll_interval: Duration,
    state: LoopState,
    cycles: u64,
    stop: Arc<AtomicBool>,
}

impl Slideshow {
    pub fn new(
        store: PlaylistStore,
        cursor: Arc<Cursor>,
        dwell: DwellCalculator,
        display: DisplayManager,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            cursor,
            dwell,
            display,
            poll_interval,
            state: LoopState::Rendering,
            cycles: 0,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cursor(&self) -> Arc<Cursor> {
        Arc::clone(&self.cursor)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop),
            cursor: Arc::clone(&self.cursor),
        }
    }

    /// Run the display loop until a stop is requested, then blank the screen.
    pub fn start(&mut self) {
        info!("Slideshow started with {} provider(s)", self.store.provider_count());
        while !self.stop.load(Ordering::SeqCst) {
            self.run_cycle();
        }
        self.shutdown();
    }

    /// Show the current slide, wait out its dwell and move on.
    ///
    /// A navigation command during the wait ends it early and replaces the
    /// automatic advance, so one knob detent moves exactly one slide.
    pub fn run_cycle(&mut self) -> CycleReport {
        let playlist = self.store.get_slides();
        // the store always holds at least the placeholder
        let index = self.cursor.index().min(playlist.len().saturating_sub(1));

        self.enter(LoopState::Rendering);
        let dwell = match playlist.get(index) {
            Some(slide) => {
                self.display.show(slide);
                self.dwell.dwell(slide)
            }
            None => self.poll_interval,
        };

        self.enter(LoopState::Waiting);
        let started = Instant::now();
        let outcome = self.cursor.wait(dwell, self.poll_interval);

        // a command landing just after expiry still counts as the move
        let preempted = self.cursor.take_preempt();
        if preempted {
            debug!("Dwell of {:?} preempted after {:?}", dwell, started.elapsed());
            self.enter(LoopState::Preempted);
        } else {
            self.enter(LoopState::Expired);
        }

        self.enter(LoopState::Advancing);
        if !preempted {
            self.cursor.advance();
        }

        self.cycles += 1;
        CycleReport { index, dwell, outcome, advanced: !preempted }
    }

    fn shutdown(&mut self) {
        info!("Slideshow stopping after {} cycle(s)", self.cycles);
        self.display.clear();
    }

    fn enter(&mut self, state: LoopState) {
        debug!("{:?} -> {:?}", self.state, state);
        self.state = state;
    }
}
