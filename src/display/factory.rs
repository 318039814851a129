/*
 *  display/factory.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Builds the configured frame sink
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

use log::info;

use crate::config::{DisplaySettings, DriverKind};
use crate::display::drivers::{FbdevSink, NullSink, SnapshotSink};
use crate::display::error::DisplayError;
use crate::display::traits::BoxedSink;

/// Create and initialise the sink named in the configuration.
pub fn create_sink(settings: &DisplaySettings) -> Result<BoxedSink, DisplayError> {
    let (w, h) = (settings.width, settings.height);
    if w == 0 || h == 0 {
        return Err(DisplayError::InvalidConfiguration(format!("{}x{} display", w, h)));
    }

    let mut sink: BoxedSink = match settings.driver {
        DriverKind::Fbdev => Box::new(FbdevSink::new(&settings.device, w, h)),
        DriverKind::Snapshot => Box::new(SnapshotSink::new(&settings.output, w, h)),
        DriverKind::Null => Box::new(NullSink::new(w, h)),
    };
    sink.init()?;
    info!("Display sink '{}' ready at {}x{}", sink.name(), w, h);
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(driver: DriverKind) -> DisplaySettings {
        DisplaySettings {
            width: 320,
            height: 240,
            driver,
            device: PathBuf::from("/definitely/not/a/framebuffer"),
            output: PathBuf::from("slide.ppm"),
        }
    }

    #[test]
    fn test_null_sink() {
        let sink = create_sink(&settings(DriverKind::Null)).unwrap();
        assert_eq!(sink.name(), "null");
        assert_eq!(sink.dimensions(), (320, 240));
    }

    #[test]
    fn test_missing_fbdev_fails_init() {
        assert!(matches!(create_sink(&settings(DriverKind::Fbdev)), Err(DisplayError::Io(_))));
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut s = settings(DriverKind::Null);
        s.height = 0;
        assert!(matches!(create_sink(&s), Err(DisplayError::InvalidConfiguration(_))));
    }
}
