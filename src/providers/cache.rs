/*
 *  providers/cache.rs
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

use log::debug;
use mini_moka::sync::Cache;

use super::{ContentProvider, ProviderError};
use crate::slide::Slide;

const KEY: &str = "slides";

/// Serves a provider's last successful result until it ages out.
///
/// The time-to-live is unrelated to the playlist refresh interval: a
/// provider can be re-asked on every refresh yet only hit the network
/// once per `ttl`.
pub struct Cached<P> {
    inner: P,
    cache: Cache<&'static str, Vec<Slide>>,
}

impl<P: ContentProvider> Cached<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(ttl)
            .build();
        Self { inner, cache }
    }
}

impl<P: ContentProvider> ContentProvider for Cached<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn slides(&self) -> Result<Vec<Slide>, ProviderError> {
        if let Some(slides) = self.cache.get(&KEY) {
            debug!("provider {} served from cache", self.inner.name());
            return Ok(slides);
        }
        let slides = self.inner.slides()?;
        if !slides.is_empty() {
            self.cache.insert(KEY, slides.clone());
        }
        Ok(slides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::FnProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(calls: Arc<AtomicUsize>, fail: bool) -> impl ContentProvider {
        FnProvider::new("counting", move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if fail {
                Err(ProviderError::Unexpected("down".into()))
            } else {
                Ok(vec![Slide::text(format!("call {}", n))])
            }
        })
    }

    #[test]
    fn test_hits_inner_once_within_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = Cached::new(counting(Arc::clone(&calls), false), Duration::from_secs(60));
        assert_eq!(cached.slides().unwrap(), vec![Slide::text("call 0")]);
        assert_eq!(cached.slides().unwrap(), vec![Slide::text("call 0")]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_refetches_after_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = Cached::new(counting(Arc::clone(&calls), false), Duration::from_millis(20));
        cached.slides().unwrap();
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(cached.slides().unwrap(), vec![Slide::text("call 1")]);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = Cached::new(counting(Arc::clone(&calls), true), Duration::from_secs(60));
        assert!(cached.slides().is_err());
        assert!(cached.slides().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
