//! Defaults used when the config file and the command line are silent.

// screen: ST7789 panel in landscape
pub const DEFAULT_SCREEN_WIDTH: u32 = 320;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 240;

// slideshow pacing, seconds
pub const DEFAULT_TEXT_DISPLAY_TIME: f64 = 3.0;
pub const DEFAULT_IMAGE_DISPLAY_TIME: f64 = 5.0;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 900;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

// outputs
pub const DEFAULT_FB_DEVICE: &str = "/dev/fb1";
pub const DEFAULT_SNAPSHOT_FILE: &str = "slide.ppm";

// rotary encoder, BCM numbering (board pins 11, 16, 18)
pub const DEFAULT_CLK_PIN: u8 = 17;
pub const DEFAULT_DT_PIN: u8 = 23;
pub const DEFAULT_SW_PIN: u8 = 24;
pub const DEFAULT_BUTTON_DEBOUNCE_MS: u64 = 50;
pub const DEFAULT_ROTARY_DEBOUNCE_MS: u64 = 2;
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 1;

// providers
pub const DEFAULT_WELCOME: &str = "Welcome";
pub const DEFAULT_QUOTE_CACHE_SECS: u64 = 3600;
