// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Backend, Level, Options, Output};
use crate::{Error, Pin, Result};
use log::{debug, trace};
use rppal::gpio::{Gpio, OutputPin};

/// The primary backend, driving pins via rppal.
///
/// rppal identifies the Raspberry Pi model and its GPIO controller itself,
/// so construction fails on any other platform.
/// Pins are identified by BCM GPIO number.
pub struct Primary {
    gpio: Gpio,
    active_low: bool,
}

impl Primary {
    pub fn new(opts: &Options) -> Result<Primary> {
        let gpio = Gpio::new().map_err(|e| Error::BackendUnavailable("rppal", e.to_string()))?;
        debug!("rppal found the GPIO controller");
        Ok(Primary {
            gpio,
            active_low: opts.active_low,
        })
    }
}

impl Backend for Primary {
    fn name(&self) -> &'static str {
        "rppal"
    }

    fn open(&mut self, pin: Pin) -> Result<Box<dyn Output + '_>> {
        let bcm = u8::try_from(pin).map_err(|_| Error::InvalidPin(pin))?;
        let p = self.gpio.get(bcm)?;
        let out = if Level::Inactive.is_high(self.active_low) {
            p.into_output_high()
        } else {
            p.into_output_low()
        };
        trace!("GPIO {pin} requested as output");
        Ok(Box::new(PrimaryLine {
            pin,
            out,
            active_low: self.active_low,
        }))
    }
}

// The pin is returned to its original mode when the OutputPin drops, so the
// explicit release cannot fail.
struct PrimaryLine {
    pin: Pin,
    out: OutputPin,
    active_low: bool,
}

impl Output for PrimaryLine {
    fn pin(&self) -> Pin {
        self.pin
    }

    fn set_level(&mut self, level: Level) -> Result<()> {
        if level.is_high(self.active_low) {
            self.out.set_high();
        } else {
            self.out.set_low();
        }
        trace!("GPIO {} set {:?}", self.pin, level);
        Ok(())
    }

    fn release(self: Box<Self>) -> Result<()> {
        trace!("GPIO {} released", self.pin);
        Ok(())
    }
}
