// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of pulsing a single line on the GPIO character device.

use gpiopulse::backend::Secondary;
use gpiopulse::{Options, Request, Sleep};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options {
        chip: "/dev/gpiochip0".into(),
        consumer: "pulse-line".into(),
        active_low: false,
    };
    let mut backend = Secondary::new(&opts)?;
    let req = Request::new(22, 2000.0)?;

    gpiopulse::pulse(&mut backend, &req, &Sleep, &mut |p| println!("{p}"))?;

    Ok(())
}
