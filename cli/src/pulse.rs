// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common;
use anyhow::{Context, Result};
use clap::Args;
use gpiopulse::{Interrupter, Options, Progress, Request};
use log::debug;

#[derive(Debug, Args)]
#[group(skip)]
pub struct Opts {
    /// The line to pulse
    ///
    /// The BCM GPIO number when driven via rppal, else the line offset on the chip.
    #[arg(value_name = "pin")]
    pub pin: u32,

    /// The period to hold the line active, in milliseconds
    #[arg(
        value_name = "duration_ms",
        value_parser = common::parse_duration_ms,
        required_unless_present = "inactive"
    )]
    pub duration_ms: Option<f64>,

    // Arguments after the duration are accepted and ignored.
    #[arg(
        value_name = "ignored",
        num_args = 1..,
        hide = true,
        trailing_var_arg = true
    )]
    pub ignored: Vec<String>,

    /// The chip used when falling back to the GPIO character device
    ///
    /// The chip may be identified by number, name, or path.
    /// e.g. the following all select the same chip:
    ///     --chip 0
    ///     --chip gpiochip0
    ///     --chip /dev/gpiochip0
    #[arg(
        short,
        long,
        value_name = "chip",
        default_value = "0",
        env = "GPIOPULSE_CHIP",
        verbatim_doc_comment
    )]
    pub chip: String,

    /// The consumer label applied to the requested line.
    #[arg(
        long,
        value_name = "consumer",
        default_value = "gpiopulse",
        env = "GPIOPULSE_CONSUMER"
    )]
    pub consumer: String,

    /// Treat the line as active-low, so it is driven low while active.
    #[arg(short = 'l', long)]
    pub active_low: bool,

    /// Drive the line inactive, with no pulse
    ///
    /// The duration is not required, and is ignored if provided.
    #[arg(long)]
    pub inactive: bool,
}

impl Opts {
    fn backend_options(&self) -> Options {
        Options {
            chip: common::chip_path_from_id(&self.chip),
            consumer: self.consumer.clone(),
            active_low: self.active_low,
        }
    }
}

pub fn cmd(opts: &Opts) -> Result<()> {
    if !opts.ignored.is_empty() {
        debug!("ignoring trailing arguments {:?}", opts.ignored);
    }
    let bopts = opts.backend_options();
    let mut report = |p: Progress| println!("{p}");
    if opts.inactive {
        return gpiopulse::force_inactive(opts.pin, &bopts, &mut report).with_context(|| {
            format!(
                "unable to drive GPIO {} inactive on chip '{}'",
                opts.pin,
                bopts.chip.display()
            )
        });
    }
    let duration_ms = opts.duration_ms.context("duration_ms is required")?;
    let req = Request::new(opts.pin, duration_ms)?;

    // a signal ends the hold early, so the line is still driven inactive
    let interrupter = Interrupter::new();
    let handler = interrupter.clone();
    ctrlc::set_handler(move || handler.interrupt())
        .context("unable to install signal handler")?;

    gpiopulse::trigger(&req, &bopts, &interrupter, &mut report).with_context(|| {
        format!(
            "unable to pulse GPIO {} on chip '{}'",
            opts.pin,
            bopts.chip.display()
        )
    })
}
