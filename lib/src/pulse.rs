// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::backend::{self, Backend, Level, Options};
use crate::hold::Hold;
use crate::{Error, Pin, Result};
use log::{debug, warn};
use std::fmt;
use std::time::Duration;

/// A single pulse to perform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Request {
    /// The pin to pulse.
    pub pin: Pin,

    /// How long to hold the pin active.
    pub duration: Duration,

    /// The duration as requested, in milliseconds.
    pub duration_ms: f64,
}

impl Request {
    /// Create a request from a duration in milliseconds.
    ///
    /// The duration must be finite and non-negative.
    pub fn new(pin: Pin, duration_ms: f64) -> Result<Request> {
        let duration = Duration::try_from_secs_f64(duration_ms / 1000.0)
            .map_err(|_| Error::InvalidDuration(duration_ms))?;
        Ok(Request {
            pin,
            duration,
            duration_ms,
        })
    }
}

/// Progress reported while performing a pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progress {
    /// The pulse is starting, with the duration in milliseconds.
    Start(Pin, f64),

    /// The pin is being forced inactive, with no pulse.
    Reset(Pin),

    /// The primary backend is unavailable so the secondary is being tried.
    Fallback,

    /// The pin has been driven to the level.
    Level(Pin, Level),
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Start(pin, ms) => write!(f, "Triggering GPIO {pin} for {ms}ms"),
            Progress::Reset(pin) => write!(f, "Forcing GPIO {pin} inactive"),
            Progress::Fallback => write!(
                f,
                "Primary GPIO backend unavailable, falling back to the GPIO character device"
            ),
            Progress::Level(pin, level) => write!(f, "GPIO {pin} {level}"),
        }
    }
}

/// Pulse a line using the backend.
///
/// The line is opened, driven active, held for the requested duration, driven
/// inactive and released.
/// The line is released whether or not the pulse succeeds.
/// If the hold is interrupted the line is driven inactive before it is released,
/// but the inactive level is not reported.
pub fn pulse(
    backend: &mut dyn Backend,
    req: &Request,
    hold: &dyn Hold,
    report: &mut dyn FnMut(Progress),
) -> Result<()> {
    let mut line = backend.open(req.pin)?;
    line.set_level(Level::Active)?;
    report(Progress::Level(req.pin, Level::Active));
    if hold.hold(req.duration).is_err() {
        debug!("hold of GPIO {} interrupted", line.pin());
        if let Err(e) = line.set_level(Level::Inactive) {
            warn!("unable to set GPIO {} inactive: {}", req.pin, e);
        }
        return Err(Error::Interrupted(req.pin));
    }
    line.set_level(Level::Inactive)?;
    report(Progress::Level(req.pin, Level::Inactive));
    line.release()
}

/// Drive a line inactive using the backend, with no pulse or hold.
pub fn drive_inactive(
    backend: &mut dyn Backend,
    pin: Pin,
    report: &mut dyn FnMut(Progress),
) -> Result<()> {
    let mut line = backend.open(pin)?;
    line.set_level(Level::Inactive)?;
    report(Progress::Level(pin, Level::Inactive));
    line.release()
}

/// Perform a complete pulse, detecting the backend to use on this host.
///
/// The backend, and any controller it has open, is closed once the pulse
/// completes.
pub fn trigger(
    req: &Request,
    opts: &Options,
    hold: &dyn Hold,
    report: &mut dyn FnMut(Progress),
) -> Result<()> {
    trigger_with(req, hold, report, |report| backend::detect(opts, report))
}

/// Perform a complete pulse on the backend returned by `select`.
///
/// The start of the pulse is reported before the backend is selected.
pub fn trigger_with<S>(
    req: &Request,
    hold: &dyn Hold,
    report: &mut dyn FnMut(Progress),
    select: S,
) -> Result<()>
where
    S: FnOnce(&mut dyn FnMut(Progress)) -> Result<Box<dyn Backend>>,
{
    report(Progress::Start(req.pin, req.duration_ms));
    let mut backend = select(report)?;
    pulse(backend.as_mut(), req, hold, report)
}

/// Force a line inactive, detecting the backend to use on this host.
pub fn force_inactive(pin: Pin, opts: &Options, report: &mut dyn FnMut(Progress)) -> Result<()> {
    force_inactive_with(pin, report, |report| backend::detect(opts, report))
}

/// Force a line inactive on the backend returned by `select`.
pub fn force_inactive_with<S>(pin: Pin, report: &mut dyn FnMut(Progress), select: S) -> Result<()>
where
    S: FnOnce(&mut dyn FnMut(Progress)) -> Result<Box<dyn Backend>>,
{
    report(Progress::Reset(pin));
    let mut backend = select(report)?;
    drive_inactive(backend.as_mut(), pin, report)
}
