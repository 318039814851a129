/*
 *  playlist.rs
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

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::cursor::Cursor;
use crate::func_timer::FunctionTimer;
use crate::providers::{self, BoxedProvider};
use crate::slide::Slide;

/// An immutable snapshot of the slides eligible for display.
#[derive(Debug, Clone)]
pub struct Playlist {
    slides: Arc<[Slide]>,
    last_refresh: Instant,
}

impl Playlist {
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn last_refresh(&self) -> Instant {
        self.last_refresh
    }

    /// Same snapshot, not merely equal content
    pub fn same_as(&self, other: &Playlist) -> bool {
        Arc::ptr_eq(&self.slides, &other.slides)
    }
}

/// Owns the providers, the current playlist and its refresh policy.
pub struct PlaylistStore {
    providers: Vec<BoxedProvider>,
    refresh_interval: Duration,
    current: Mutex<Option<Playlist>>,
    cursor: Arc<Cursor>,
}

impl PlaylistStore {
    pub fn new(providers: Vec<BoxedProvider>, refresh_interval: Duration, cursor: Arc<Cursor>) -> Self {
        Self {
            providers,
            refresh_interval,
            current: Mutex::new(None),
            cursor,
        }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Current playlist, rebuilt from the providers first when due.
    pub fn get_slides(&self) -> Playlist {
        self.get_slides_at(Instant::now())
    }

    pub fn get_slides_at(&self, now: Instant) -> Playlist {
        if let Some(playlist) = self.stored() {
            if !self.is_due(&playlist, now) {
                return playlist;
            }
        }
        self.refresh_at(now)
    }

    fn stored(&self) -> Option<Playlist> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_due(&self, playlist: &Playlist, now: Instant) -> bool {
        now.saturating_duration_since(playlist.last_refresh) > self.refresh_interval
    }

    /// Ask every provider, in order, and swap in the result.
    ///
    /// Providers run without any lock held. The swap and the cursor reset
    /// happen under the playlist lock, so a reader sees either the old list
    /// or the new one together with a valid index.
    fn refresh_at(&self, now: Instant) -> Playlist {
        info!("Refreshing slides from {} provider(s)", self.providers.len());
        let timer = FunctionTimer::new("playlist refresh");

        let mut slides: Vec<Slide> = self
            .providers
            .iter()
            .flat_map(|p| providers::gather(p.as_ref()))
            .collect();

        if slides.is_empty() {
            warn!("No provider produced a slide, showing placeholder");
            slides.push(Slide::placeholder());
        }

        let playlist = Playlist {
            slides: slides.into(),
            last_refresh: now,
        };

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(playlist.clone());
        self.cursor.rebase(playlist.len());
        drop(current);

        info!("Playlist holds {} slide(s), built in {:?}", playlist.len(), timer.elapsed());
        playlist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{FnProvider, ProviderError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store(providers: Vec<BoxedProvider>, secs: u64) -> (PlaylistStore, Arc<Cursor>) {
        let cursor = Arc::new(Cursor::new(0));
        (PlaylistStore::new(providers, Duration::from_secs(secs), Arc::clone(&cursor)), cursor)
    }

    fn fixed(name: &str, texts: &'static [&'static str]) -> BoxedProvider {
        Box::new(FnProvider::new(name, move || {
            Ok(texts.iter().map(|t| Slide::text(*t)).collect())
        }))
    }

    #[test]
    fn test_concatenates_in_provider_order() {
        let (store, cursor) = store(vec![fixed("a", &["a1", "a2"]), fixed("b", &["b1"])], 900);
        let playlist = store.get_slides();
        assert_eq!(
            playlist.slides(),
            &[Slide::text("a1"), Slide::text("a2"), Slide::text("b1")]
        );
        assert_eq!(cursor.len(), 3);
    }

    #[test]
    fn test_all_empty_providers_yield_placeholder() {
        let (store, _) = store(vec![fixed("a", &[]), fixed("b", &[]), fixed("c", &[])], 900);
        let playlist = store.get_slides();
        assert_eq!(playlist.slides(), &[Slide::text("No slides available.")]);
    }

    #[test]
    fn test_no_providers_yield_placeholder() {
        let (store, cursor) = store(Vec::new(), 900);
        assert_eq!(store.get_slides().len(), 1);
        assert_eq!(cursor.len(), 1);
    }

    #[test]
    fn test_failing_provider_is_skipped() {
        let broken: BoxedProvider = Box::new(FnProvider::new("broken", || {
            Err(ProviderError::Unexpected("nope".into()))
        }));
        let (store, _) = store(vec![broken, fixed("ok", &["fine"])], 900);
        assert_eq!(store.get_slides().slides(), &[Slide::text("fine")]);
    }

    #[test]
    fn test_refresh_is_idempotent_within_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counting: BoxedProvider = Box::new(FnProvider::new("counting", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Slide::text("same")])
        }));
        let (store, _) = store(vec![counting], 900);

        let t0 = Instant::now();
        let first = store.get_slides_at(t0);
        let second = store.get_slides_at(t0 + Duration::from_secs(899));
        assert!(first.same_as(&second));
        assert_eq!(first.last_refresh(), second.last_refresh());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // the boundary itself is not yet past the interval
        let third = store.get_slides_at(t0 + Duration::from_secs(900));
        assert!(third.same_as(&first));

        let fourth = store.get_slides_at(t0 + Duration::from_secs(901));
        assert!(!fourth.same_as(&first));
        assert_eq!(fourth.slides(), first.slides());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_shrinking_refresh_resets_cursor() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let shrinking: BoxedProvider = Box::new(FnProvider::new("shrinking", move || {
            let n = if counter.fetch_add(1, Ordering::SeqCst) == 0 { 5 } else { 2 };
            Ok((0..n).map(|i| Slide::text(format!("s{}", i))).collect())
        }));
        let (store, cursor) = store(vec![shrinking], 10);

        let t0 = Instant::now();
        assert_eq!(store.get_slides_at(t0).len(), 5);
        for _ in 0..4 {
            cursor.next(true);
        }
        assert_eq!(cursor.index(), 4);

        let smaller = store.get_slides_at(t0 + Duration::from_secs(11));
        assert_eq!(smaller.len(), 2);
        assert!(cursor.index() < smaller.len());
        assert_eq!(cursor.index(), 0);
    }
}
