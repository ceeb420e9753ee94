// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Backend, Level, Options, Output};
use crate::{Error, Pin, Result};
use gpiocdev::chip::Chip;
use gpiocdev::line::Value;
use gpiocdev::request::Request;
use log::{debug, trace};
use std::path::PathBuf;

/// The secondary backend, driving lines via the GPIO character device.
///
/// The chip is fixed by the [`Options`], with no detection, and is held open
/// for the life of the backend.
/// Pins are identified by line offset on that chip.
///
/// The chip handle is only read for the chip info when the backend is
/// constructed. Line requests open the chip by path independently, so closing
/// the controller is just dropping that handle and cannot fail.
pub struct Secondary {
    // open until the backend is dropped, but unused after construction
    _chip: Chip,
    path: PathBuf,
    name: String,
    num_lines: u32,
    consumer: String,
    active_low: bool,
}

impl Secondary {
    /// Open the controller for the chip in the options.
    pub fn new(opts: &Options) -> Result<Secondary> {
        let chip = Chip::from_path(&opts.chip)?;
        let info = chip.info()?;
        debug!(
            "opened {} [{}] ({} lines)",
            info.name, info.label, info.num_lines
        );
        Ok(Secondary {
            _chip: chip,
            path: opts.chip.clone(),
            name: info.name,
            num_lines: info.num_lines,
            consumer: opts.consumer.clone(),
            active_low: opts.active_low,
        })
    }

    /// The name of the chip, such as "gpiochip0".
    pub fn chip_name(&self) -> &str {
        &self.name
    }
}

impl Backend for Secondary {
    fn name(&self) -> &'static str {
        "gpiocdev"
    }

    fn open(&mut self, pin: Pin) -> Result<Box<dyn Output + '_>> {
        if pin >= self.num_lines {
            return Err(Error::OffsetOutOfRange(pin, self.name.clone()));
        }
        let mut builder = Request::builder();
        builder
            .on_chip(&self.path)
            .with_consumer(&self.consumer)
            .with_line(pin);
        if self.active_low {
            builder.as_active_low();
        }
        let req = builder.as_output(Value::Inactive).request()?;
        trace!("{} line {pin} requested as output", self.name);
        Ok(Box::new(SecondaryLine { pin, req }))
    }
}

impl Drop for Secondary {
    fn drop(&mut self) {
        trace!("closing {}", self.name);
    }
}

// The kernel releases the line when the request is dropped, so the explicit
// release cannot fail.
struct SecondaryLine {
    pin: Pin,
    req: Request,
}

impl Output for SecondaryLine {
    fn pin(&self) -> Pin {
        self.pin
    }

    fn set_level(&mut self, level: Level) -> Result<()> {
        self.req.set_value(self.pin, level.into())?;
        trace!("line {} set {:?}", self.pin, level);
        Ok(())
    }

    fn release(self: Box<Self>) -> Result<()> {
        trace!("line {} released", self.pin);
        Ok(())
    }
}
