use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

use crate::constants::*;
use crate::dwell::MAX_DWELL;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration as it appears in the YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub slideshow: Option<SlideshowConfig>,
    pub display: Option<DisplayConfig>,
    pub encoder: Option<EncoderConfig>,
    /// read n/p/r commands from stdin
    pub console_input: Option<bool>,
    pub providers: Option<ProvidersConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SlideshowConfig {
    /// seconds per content line, before the reading-pace factor
    pub text_display_time: Option<f64>,
    /// seconds per image
    pub image_display_time: Option<f64>,
    /// seconds between playlist rebuilds
    pub refresh_interval: Option<u64>,
    /// granularity of the interruptible wait
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub driver: Option<DriverKind>,
    /// framebuffer device for `fbdev`
    pub device: Option<PathBuf>,
    /// output file for `snapshot`
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    Fbdev,
    Snapshot,
    Null,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EncoderConfig {
    pub enabled: Option<bool>,
    /// BCM numbering
    pub clk_pin: Option<u8>,
    pub dt_pin: Option<u8>,
    pub sw_pin: Option<u8>,
    pub button_debounce_ms: Option<u64>,
    pub rotary_debounce_ms: Option<u64>,
    pub sample_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvidersConfig {
    /// plain greeting slide, empty to disable
    pub welcome: Option<String>,
    pub images_dir: Option<PathBuf>,
    pub season: Option<bool>,
    pub quotes: Option<QuotesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuotesConfig {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub cache_secs: Option<u64>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "nature-oracle", about = "Slideshow for a small screen with a rotary knob")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub text_display_time: Option<f64>,
    #[arg(long)]
    pub image_display_time: Option<f64>,
    #[arg(long)]
    pub refresh_interval: Option<u64>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long, value_enum)]
    pub display_driver: Option<DriverKind>,
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub images_dir: Option<PathBuf>,
    /// read n/p/r commands from stdin
    #[arg(long, action = ArgAction::SetTrue)]
    pub console: bool,
    /// do not poll the rotary encoder
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_encoder: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Effective slideshow timing
#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowSettings {
    pub text_display_time: f64,
    pub image_display_time: f64,
    pub refresh_interval: Duration,
    pub poll_interval: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
    pub driver: DriverKind,
    pub device: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncoderSettings {
    pub enabled: bool,
    pub clk_pin: u8,
    pub dt_pin: u8,
    pub sw_pin: u8,
    pub button_debounce: Duration,
    pub rotary_debounce: Duration,
    pub sample_interval: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub welcome: String,
    pub images_dir: Option<PathBuf>,
    pub season: bool,
    pub quotes: bool,
    pub quotes_url: String,
    pub quotes_cache: Duration,
}

/// Fully resolved configuration, defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_level: String,
    pub slideshow: SlideshowSettings,
    pub display: DisplaySettings,
    pub encoder: EncoderSettings,
    pub console_input: bool,
    pub providers: ProviderSettings,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Settings, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    let settings = cfg.resolve();
    validate(&settings)?;
    Ok(settings)
}

/// File layer plus CLI overrides, without resolving defaults.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) YAML file (explicit path or search)
    let mut cfg = if let Some(p) = cli.config.as_ref() {
        if !p.exists() {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        read_yaml(p)?
    } else if let Some(p) = find_config_file() {
        read_yaml(&p)?
    } else {
        Config::default()
    };

    // 2) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/nature-oracle/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/nature-oracle/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/nature-oracle.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["nature-oracle.yaml", "config.yaml", "config/nature-oracle.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()  { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                { cfg.log_level = Some("debug".to_string()); }
    if cli.console              { cfg.console_input = Some(true); }

    if cli.text_display_time.is_some() || cli.image_display_time.is_some() || cli.refresh_interval.is_some() {
        let show = cfg.slideshow.get_or_insert_with(SlideshowConfig::default);
        if cli.text_display_time.is_some()  { show.text_display_time = cli.text_display_time; }
        if cli.image_display_time.is_some() { show.image_display_time = cli.image_display_time; }
        if cli.refresh_interval.is_some()   { show.refresh_interval = cli.refresh_interval; }
    }

    if cli.display_width.is_some() || cli.display_height.is_some() || cli.display_driver.is_some() {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.display_width.is_some()  { display.width = cli.display_width; }
        if cli.display_height.is_some() { display.height = cli.display_height; }
        if cli.display_driver.is_some() { display.driver = cli.display_driver; }
    }

    if cli.no_encoder {
        cfg.encoder.get_or_insert_with(EncoderConfig::default).enabled = Some(false);
    }
    if cli.images_dir.is_some() {
        cfg.providers.get_or_insert_with(ProvidersConfig::default).images_dir = cli.images_dir.clone();
    }
}

impl Config {
    /// Fill every gap with its default.
    pub fn resolve(&self) -> Settings {
        let show = self.slideshow.clone().unwrap_or_default();
        let display = self.display.clone().unwrap_or_default();
        let encoder = self.encoder.clone().unwrap_or_default();
        let providers = self.providers.clone().unwrap_or_default();
        let quotes = providers.quotes.clone().unwrap_or_default();

        Settings {
            log_level: self.log_level.clone().unwrap_or_else(|| "info".to_string()),
            slideshow: SlideshowSettings {
                text_display_time: show.text_display_time.unwrap_or(DEFAULT_TEXT_DISPLAY_TIME),
                image_display_time: show.image_display_time.unwrap_or(DEFAULT_IMAGE_DISPLAY_TIME),
                refresh_interval: Duration::from_secs(show.refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)),
                poll_interval: Duration::from_millis(show.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS)),
            },
            display: DisplaySettings {
                width: display.width.unwrap_or(DEFAULT_SCREEN_WIDTH),
                height: display.height.unwrap_or(DEFAULT_SCREEN_HEIGHT),
                driver: display.driver.unwrap_or(DriverKind::Snapshot),
                device: display.device.unwrap_or_else(|| PathBuf::from(DEFAULT_FB_DEVICE)),
                output: display.output.unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE)),
            },
            encoder: EncoderSettings {
                enabled: encoder.enabled.unwrap_or(cfg!(feature = "gpio")),
                clk_pin: encoder.clk_pin.unwrap_or(DEFAULT_CLK_PIN),
                dt_pin: encoder.dt_pin.unwrap_or(DEFAULT_DT_PIN),
                sw_pin: encoder.sw_pin.unwrap_or(DEFAULT_SW_PIN),
                button_debounce: Duration::from_millis(encoder.button_debounce_ms.unwrap_or(DEFAULT_BUTTON_DEBOUNCE_MS)),
                rotary_debounce: Duration::from_millis(encoder.rotary_debounce_ms.unwrap_or(DEFAULT_ROTARY_DEBOUNCE_MS)),
                sample_interval: Duration::from_millis(encoder.sample_interval_ms.unwrap_or(DEFAULT_SAMPLE_INTERVAL_MS)),
            },
            console_input: self.console_input.unwrap_or(false),
            providers: ProviderSettings {
                welcome: providers.welcome.unwrap_or_else(|| DEFAULT_WELCOME.to_string()),
                images_dir: providers.images_dir,
                season: providers.season.unwrap_or(true),
                quotes: quotes.enabled.unwrap_or(true),
                quotes_url: quotes.url.unwrap_or_else(|| crate::providers::quotes::ZEN_QUOTES_URL.to_string()),
                quotes_cache: Duration::from_secs(quotes.cache_secs.unwrap_or(DEFAULT_QUOTE_CACHE_SECS)),
            },
        }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(s: &Settings) -> Result<(), ConfigError> {
    if s.display.width == 0 || s.display.height == 0 {
        return Err(ConfigError::Validation("display width/height must be > 0".into()));
    }
    let show = &s.slideshow;
    let max = MAX_DWELL.as_secs_f64();
    for (name, secs) in [
        ("text_display_time", show.text_display_time),
        ("image_display_time", show.image_display_time),
    ] {
        if !(secs > 0.0 && secs <= max) {
            return Err(ConfigError::Validation(format!("{} must be in (0, {}] seconds", name, max)));
        }
    }
    if show.refresh_interval.is_zero() {
        return Err(ConfigError::Validation("refresh_interval must be > 0".into()));
    }
    // coarser polling would make the knob feel sluggish
    if show.poll_interval.is_zero() || show.poll_interval > Duration::from_millis(100) {
        return Err(ConfigError::Validation("poll_interval_ms must be 1..=100".into()));
    }
    let e = &s.encoder;
    if e.enabled && (e.clk_pin == e.dt_pin || e.clk_pin == e.sw_pin || e.dt_pin == e.sw_pin) {
        return Err(ConfigError::Validation("encoder pins must be distinct".into()));
    }
    Ok(())
}
