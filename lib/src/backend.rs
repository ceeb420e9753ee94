// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Pin, Progress, Result};
use log::debug;
use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "rppal")]
mod primary;
#[cfg(feature = "rppal")]
pub use self::primary::Primary;

mod secondary;
pub use self::secondary::Secondary;

#[cfg(test)]
pub(crate) mod fake;

/// The logical level of a line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Level {
    /// The line is inactive, physically low unless active-low.
    #[default]
    Inactive,

    /// The line is active, physically high unless active-low.
    Active,
}

impl Level {
    /// The physical level, true for high, after applying the active-low setting.
    pub fn is_high(self, active_low: bool) -> bool {
        (self == Level::Active) != active_low
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Inactive => write!(f, "LOW"),
            Level::Active => write!(f, "HIGH"),
        }
    }
}

impl From<Level> for gpiocdev::line::Value {
    fn from(l: Level) -> Self {
        match l {
            Level::Inactive => gpiocdev::line::Value::Inactive,
            Level::Active => gpiocdev::line::Value::Active,
        }
    }
}

/// Settings applied when constructing a backend and requesting lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// The chip opened by the secondary backend.
    pub chip: PathBuf,

    /// The consumer label applied to requested lines, where supported.
    pub consumer: String,

    /// Treat lines as active-low.
    pub active_low: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            chip: "/dev/gpiochip0".into(),
            consumer: "gpiopulse".into(),
            active_low: false,
        }
    }
}

/// A source of output lines.
///
/// Constructing a backend is the capability check, so a backend value is only
/// available where the underlying GPIO interface is.
/// Dropping the backend closes any handle it holds on the controller.
pub trait Backend {
    /// A short name identifying the backend in diagnostics.
    fn name(&self) -> &'static str;

    /// Request the pin as an output, initially inactive.
    fn open(&mut self, pin: Pin) -> Result<Box<dyn Output + '_>>;
}

/// A requested output line.
///
/// The line is released when dropped, so it is released on every path.
/// [`release`] makes the release explicit on the success path. Neither
/// hardware backend can fail to release, as both give the line back when
/// their handle drops, so an error from [`release`] is only possible for
/// other implementations.
///
/// [`release`]: Output::release
pub trait Output {
    /// The pin this line was requested for.
    fn pin(&self) -> Pin;

    /// Drive the line to the level.
    fn set_level(&mut self, level: Level) -> Result<()>;

    /// Release the line.
    fn release(self: Box<Self>) -> Result<()>;
}

/// Select the first backend that can be constructed.
///
/// The primary is tried first. If it cannot be constructed then the fallback is
/// reported and the secondary is constructed instead, and any failure there is
/// returned.
pub fn select<P, S>(
    primary: P,
    secondary: S,
    report: &mut dyn FnMut(Progress),
) -> Result<Box<dyn Backend>>
where
    P: FnOnce() -> Result<Box<dyn Backend>>,
    S: FnOnce() -> Result<Box<dyn Backend>>,
{
    match primary() {
        Ok(b) => {
            debug!("using {} backend", b.name());
            return Ok(b);
        }
        Err(e) => debug!("primary backend unavailable: {e}"),
    }
    report(Progress::Fallback);
    let b = secondary()?;
    debug!("using {} backend", b.name());
    Ok(b)
}

/// Detect a usable backend on this host.
pub fn detect(opts: &Options, report: &mut dyn FnMut(Progress)) -> Result<Box<dyn Backend>> {
    select(
        || primary_backend(opts),
        || Ok(Box::new(Secondary::new(opts)?)),
        report,
    )
}

#[cfg(feature = "rppal")]
fn primary_backend(opts: &Options) -> Result<Box<dyn Backend>> {
    Ok(Box::new(Primary::new(opts)?))
}

#[cfg(not(feature = "rppal"))]
fn primary_backend(_opts: &Options) -> Result<Box<dyn Backend>> {
    Err(crate::Error::BackendUnavailable(
        "rppal",
        "not enabled in this build".into(),
    ))
}
