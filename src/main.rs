/*
 *  main.rs
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

use std::sync::Arc;
use std::thread;

use anyhow::Context;
use env_logger::Env;
use log::{error, info, warn};
use tokio::signal::unix::{signal, SignalKind};

mod config;
mod constants;
mod cursor;
mod display;
mod dwell;
mod func_timer;
mod input;
mod playlist;
mod providers;
mod scheduler;
mod slide;
mod vframebuf;

use config::{EncoderSettings, ProviderSettings, Settings};
use cursor::Cursor;
use display::{DisplayManager, SlideRenderer};
use dwell::DwellCalculator;
use playlist::PlaylistStore;
use providers::{BoxedProvider, Cached, ImageDirectory, Panel, QuoteProvider, SeasonProvider, StaticText};
use scheduler::Slideshow;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for SIGINT, SIGTERM or SIGHUP and logs which one arrived.
async fn signal_handler() -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// A current-thread runtime that exists only to wait for a signal.
fn wait_for_signal() -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(signal_handler())
}

/// Providers in the order their slides appear.
fn build_providers(settings: &ProviderSettings) -> Vec<BoxedProvider> {
    let panel = Panel::default();
    let mut list: Vec<BoxedProvider> = Vec::new();

    if !settings.welcome.trim().is_empty() {
        list.push(Box::new(StaticText::framed("welcome", &panel, "NATURE ORACLE", &settings.welcome)));
    }
    if settings.season {
        list.push(Box::new(SeasonProvider::new(panel)));
    }
    if settings.quotes {
        match QuoteProvider::new(settings.quotes_url.as_str(), "QUOTE OF THE MOMENT", panel) {
            Ok(quotes) => list.push(Box::new(Cached::new(quotes, settings.quotes_cache))),
            Err(e) => warn!("Quotes disabled: {}", e),
        }
    }
    if let Some(dir) = &settings.images_dir {
        list.push(Box::new(ImageDirectory::new(dir.clone())));
    }

    info!(
        "Providers: {}",
        list.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
    );
    list
}

#[cfg(feature = "gpio")]
fn start_encoder(settings: &EncoderSettings, cursor: &Arc<Cursor>) -> anyhow::Result<()> {
    let pins = input::gpio::GpioPins::open(settings.clk_pin, settings.dt_pin, settings.sw_pin)?;
    input::spawn_encoder(Box::new(pins), settings, Arc::clone(cursor))?;
    Ok(())
}

#[cfg(not(feature = "gpio"))]
fn start_encoder(_settings: &EncoderSettings, _cursor: &Arc<Cursor>) -> anyhow::Result<()> {
    anyhow::bail!("built without the gpio feature")
}

/// Input is optional; a missing knob leaves an unattended slideshow.
fn start_inputs(settings: &Settings, cursor: &Arc<Cursor>) {
    if settings.encoder.enabled {
        if let Err(e) = start_encoder(&settings.encoder, cursor) {
            warn!("Rotary encoder unavailable: {}", e);
        }
    }
    if settings.console_input {
        match input::spawn_console(Arc::clone(cursor)) {
            Ok(_) => info!("Console input: n = next, p = previous, r = restart"),
            Err(e) => warn!("Console input unavailable: {}", e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let settings = config::load()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log_level.as_str()))
        .format_timestamp_secs()
        .init();

    info!(
        "{} v{} built {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_PROFILE
    );

    let display_settings = &settings.display;
    let renderer = SlideRenderer::new(display_settings.width, display_settings.height)?;
    let sink = display::create_sink(display_settings)?;
    let display = DisplayManager::new(renderer, sink)?;

    let cursor = Arc::new(Cursor::new(0));
    let store = PlaylistStore::new(
        build_providers(&settings.providers),
        settings.slideshow.refresh_interval,
        Arc::clone(&cursor),
    );
    let dwell = DwellCalculator::new(
        settings.slideshow.text_display_time,
        settings.slideshow.image_display_time,
    );
    let mut slideshow = Slideshow::new(
        store,
        Arc::clone(&cursor),
        dwell,
        display,
        settings.slideshow.poll_interval,
    );
    let stop = slideshow.stop_handle();

    start_inputs(&settings, &cursor);

    let runner = thread::Builder::new()
        .name("slideshow".into())
        .spawn(move || slideshow.start())
        .context("starting slideshow thread")?;

    stop.stop_on_signal(wait_for_signal());
    if runner.join().is_err() {
        error!("Slideshow thread panicked");
    }
    info!("Goodbye");
    Ok(())
}
