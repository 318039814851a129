/*
 *  providers/mod.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Content providers: independent sources of slides
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

use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};
use thiserror::Error;

use crate::func_timer::FunctionTimer;
use crate::slide::Slide;

pub mod cache;
pub mod images;
pub mod panel;
pub mod quotes;
pub mod season;
pub mod static_text;

pub use cache::Cached;
pub use images::ImageDirectory;
pub use panel::Panel;
pub use quotes::QuoteProvider;
pub use season::SeasonProvider;
pub use static_text::StaticText;

/// Why a provider contributed nothing this round
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("nothing to show")]
    Empty,
    #[error("unexpected response: {0}")]
    Unexpected(String),
    #[error("provider panicked: {0}")]
    Panicked(String),
}

/// A source of slides for one content domain.
///
/// Providers are called in registration order on every playlist refresh.
/// They should bound their own network calls; the playlist store waits for
/// each one to return.
pub trait ContentProvider: Send + Sync {
    fn name(&self) -> &str;

    fn slides(&self) -> Result<Vec<Slide>, ProviderError>;
}

pub type BoxedProvider = Box<dyn ContentProvider>;

/// Adapts a closure into a named provider.
pub struct FnProvider<F> {
    name: String,
    f: F,
}

impl<F> FnProvider<F>
where
    F: Fn() -> Result<Vec<Slide>, ProviderError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> ContentProvider for FnProvider<F>
where
    F: Fn() -> Result<Vec<Slide>, ProviderError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn slides(&self) -> Result<Vec<Slide>, ProviderError> {
        (self.f)()
    }
}

/// Calls one provider with failures contained.
///
/// Errors and panics are logged and count as zero slides; nothing escapes.
pub fn gather(provider: &dyn ContentProvider) -> Vec<Slide> {
    let _timer = FunctionTimer::new(format!("provider {}", provider.name()));

    let result = panic::catch_unwind(AssertUnwindSafe(|| provider.slides()))
        .unwrap_or_else(|payload| Err(ProviderError::Panicked(panic_message(payload.as_ref()))));

    match result {
        Ok(slides) => {
            debug!("provider {} returned {} slide(s)", provider.name(), slides.len());
            slides
        }
        Err(ProviderError::Empty) => {
            debug!("provider {} has nothing to show", provider.name());
            Vec::new()
        }
        Err(e) => {
            warn!("provider {} failed: {}", provider.name(), e);
            Vec::new()
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_passes_slides_through() {
        let p = FnProvider::new("two", || Ok(vec![Slide::text("a"), Slide::text("b")]));
        assert_eq!(gather(&p), vec![Slide::text("a"), Slide::text("b")]);
    }

    #[test]
    fn test_gather_contains_errors() {
        let p = FnProvider::new("broken", || Err(ProviderError::Unexpected("bad".into())));
        assert!(gather(&p).is_empty());
        let p = FnProvider::new("empty", || Err(ProviderError::Empty));
        assert!(gather(&p).is_empty());
    }

    #[test]
    fn test_gather_contains_panics() {
        let p = FnProvider::new("panicky", || -> Result<Vec<Slide>, ProviderError> {
            panic!("boom")
        });
        assert!(gather(&p).is_empty());
    }

    #[test]
    fn test_panic_message_extraction() {
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
        let borrowed: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(borrowed.as_ref()), "static");
    }
}
