// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for pulsing a GPIO line active for a fixed period.
//!
//! The line is driven through a [`Backend`], selected at runtime by [`detect`].
//! The primary backend uses `rppal`, which detects the Raspberry Pi GPIO
//! controller itself. Where that is unavailable the secondary backend drives the
//! line via the Linux GPIO character device on a fixed chip.
//!
//! A complete pulse, including backend selection, is performed by [`trigger`]:
//! ```no_run
//! # use gpiopulse::Result;
//! use gpiopulse::{Options, Request, Sleep};
//!
//! # fn main() -> Result<()> {
//! let req = Request::new(17, 500.0)?;
//! gpiopulse::trigger(&req, &Options::default(), &Sleep, &mut |p| println!("{p}"))?;
//! # Ok(())
//! # }
//! ```
//!
//! A line left active by some other process can be returned to its inactive
//! level with [`force_inactive`], which drives the line with no hold.
//!
//! [`Backend`]: backend::Backend
//! [`detect`]: backend::detect

#[cfg(not(any(feature = "uapi_v1", feature = "uapi_v2")))]
compile_error!("Either feature \"uapi_v1\" or \"uapi_v2\" must be enabled for this crate.");

/// The GPIO backends and their selection.
pub mod backend;

/// Blocking waits, optionally cut short by a signal.
pub mod hold;

mod pulse;

pub use backend::{Backend, Level, Options, Output};
pub use hold::{Hold, Interrupted, Interrupter, Sleep};
pub use pulse::{
    drive_inactive, force_inactive, force_inactive_with, pulse, trigger, trigger_with, Progress,
    Request,
};

/// The identifier of a GPIO line.
///
/// For the primary backend this is the BCM GPIO number, for the secondary
/// backend it is the line offset on the chip.
pub type Pin = u32;

/// Errors returned by [`gpiopulse`] functions.
///
/// [`gpiopulse`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A backend cannot be used on this host.
    #[error("{0} backend is unavailable: {1}")]
    BackendUnavailable(&'static str, String),

    /// The requested duration cannot be represented as a wait.
    #[error("duration '{0}' must be a finite, non-negative number of milliseconds")]
    InvalidDuration(f64),

    /// The pin number cannot be addressed by the primary backend.
    #[error("pin {0} is not a valid BCM GPIO number")]
    InvalidPin(Pin),

    /// The line offset exceeds the lines available on the chip.
    #[error("offset {0} is out of range on chip '{1}'")]
    OffsetOutOfRange(Pin, String),

    /// The hold was cut short by a signal.
    #[error("interrupted while holding GPIO {0} active")]
    Interrupted(Pin),

    /// An error returned from the GPIO character device.
    #[error(transparent)]
    Cdev(#[from] gpiocdev::Error),

    /// An error returned from rppal.
    #[cfg(feature = "rppal")]
    #[error(transparent)]
    Rppal(#[from] rppal::gpio::Error),
}

/// The result for [`gpiopulse`] functions.
///
/// [`gpiopulse`]: crate
pub type Result<T> = std::result::Result<T, Error>;
