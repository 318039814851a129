/*
 *  providers/quotes.rs
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
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{ContentProvider, Panel, ProviderError};
use crate::slide::Slide;

pub const ZEN_QUOTES_URL: &str = "https://zenquotes.io/api/random";

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    a: String,
}

/// A quote of the moment from a zenquotes-style JSON endpoint.
pub struct QuoteProvider {
    client: Client,
    url: String,
    title: String,
    panel: Panel,
}

impl QuoteProvider {
    pub fn new(url: impl Into<String>, title: impl Into<String>, panel: Panel) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            title: title.into(),
            panel,
        })
    }

    fn render(&self, quote: &str, author: &str) -> Vec<Slide> {
        let body = format!("\"{}\"\n- {}", quote.trim(), author.trim());
        self.panel.text_slides(&self.title, &body)
    }
}

/// First quote of a `[{"q": .., "a": ..}]` payload
fn parse_quote(body: &str) -> Result<(String, String), ProviderError> {
    let quotes: Vec<ZenQuote> = serde_json::from_str(body)?;
    let first = quotes.into_iter().next().ok_or(ProviderError::Empty)?;
    if first.q.trim().is_empty() {
        return Err(ProviderError::Empty);
    }
    Ok((first.q, first.a))
}

impl ContentProvider for QuoteProvider {
    fn name(&self) -> &str {
        "quotes"
    }

    fn slides(&self) -> Result<Vec<Slide>, ProviderError> {
        debug!("fetching quote from {}", self.url);
        let body = self.client.get(&self.url).send()?.error_for_status()?.text()?;
        let (quote, author) = parse_quote(&body)?;
        Ok(self.render(&quote, &author))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote() {
        let body = r#"[{"q":"Be here now.","a":"Ram Dass","h":"<blockquote/>"}]"#;
        let (q, a) = parse_quote(body).unwrap();
        assert_eq!(q, "Be here now.");
        assert_eq!(a, "Ram Dass");
    }

    #[test]
    fn test_parse_quote_rejects_empty_payloads() {
        assert!(matches!(parse_quote("[]"), Err(ProviderError::Empty)));
        assert!(matches!(parse_quote(r#"[{"q":" ","a":"x"}]"#), Err(ProviderError::Empty)));
        assert!(matches!(parse_quote("{oops"), Err(ProviderError::Json(_))));
    }

    #[test]
    fn test_render_frames_the_quote() {
        let provider = QuoteProvider::new(ZEN_QUOTES_URL, "ZEN MEDITATION", Panel::default()).unwrap();
        let slides = provider.render("Be here now.", "Ram Dass");
        assert_eq!(slides.len(), 1);
        match &slides[0] {
            Slide::Text { content } => {
                assert!(content.contains("ZEN MEDITATION"));
                assert!(content.contains("\"Be here now.\""));
                assert!(content.contains("- Ram Dass"));
            }
            _ => panic!("expected text slide"),
        }
    }
}
