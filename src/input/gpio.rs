/*
 *  input/gpio.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  Encoder pins on the Raspberry Pi header
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
use rppal::gpio::{Gpio, InputPin};

use crate::input::encoder::{PinReader, Sample};
use crate::input::InputError;

impl From<rppal::gpio::Error> for InputError {
    fn from(e: rppal::gpio::Error) -> Self {
        InputError::Gpio(e.to_string())
    }
}

/// CLK, DT and switch lines with pull-ups, BCM numbering
pub struct GpioPins {
    clk: InputPin,
    dt: InputPin,
    sw: InputPin,
}

impl GpioPins {
    pub fn open(clk: u8, dt: u8, sw: u8) -> Result<Self, InputError> {
        let gpio = Gpio::new()?;
        let pins = Self {
            clk: gpio.get(clk)?.into_input_pullup(),
            dt: gpio.get(dt)?.into_input_pullup(),
            sw: gpio.get(sw)?.into_input_pullup(),
        };
        info!("Encoder on GPIO clk={} dt={} sw={}", clk, dt, sw);
        Ok(pins)
    }
}

impl PinReader for GpioPins {
    fn sample(&mut self) -> Result<Sample, InputError> {
        Ok(Sample {
            clk: self.clk.is_high(),
            dt: self.dt.is_high(),
            sw: self.sw.is_high(),
        })
    }
}
