// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

// common helper functions

pub fn chip_path_from_id(id: &str) -> PathBuf {
    if id.chars().all(char::is_numeric) {
        // from number
        return format!("/dev/gpiochip{id}").into();
    }
    if !id.chars().any(|x| x == '/') {
        // from name
        let mut p: PathBuf = "/dev".into();
        p.push(id);
        return p;
    }
    // from raw path
    id.into()
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' must be a finite, non-negative number of milliseconds")]
    OutOfRange(String),
}

pub fn parse_duration_ms(s: &str) -> std::result::Result<f64, ParseDurationError> {
    let ms: f64 = s
        .parse()
        .map_err(|_| ParseDurationError::NotANumber(s.into()))?;
    if Duration::try_from_secs_f64(ms / 1000.0).is_err() {
        return Err(ParseDurationError::OutOfRange(s.into()));
    }
    Ok(ms)
}

pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

pub fn emit_error(verbose: bool, e: &anyhow::Error) {
    eprintln!("Error: {}", format_error(verbose, e));
    if is_permission_denied(e) {
        eprintln!("Hint: {PERMISSION_HINT}");
    }
}

// The full chain when verbose, else the outermost context and the root cause.
pub fn format_error(verbose: bool, e: &anyhow::Error) -> String {
    if verbose || e.chain().len() < 3 {
        format!("{e:#}")
    } else {
        format!("{}: {}", e, e.root_cause())
    }
}

const PERMISSION_HINT: &str = "add the user to the gpio group (sudo usermod -aG gpio <user>, then \
log in again), and check the chip and pin number.";

pub fn is_permission_denied(e: &anyhow::Error) -> bool {
    e.chain().any(|c| match c.downcast_ref::<std::io::Error>() {
        Some(ioe) => ioe.kind() == std::io::ErrorKind::PermissionDenied,
        // errors that wrap an errno without exposing an io::Error
        None => c.to_string().contains("Permission denied"),
    })
}
