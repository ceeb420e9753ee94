// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command line tool for pulsing a GPIO line.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;

mod common;
mod pulse;

fn main() -> ExitCode {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => return parse_error(e),
    };
    common::init_logging(opts.verbose);
    match pulse::cmd(&opts.pulse) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            common::emit_error(opts.verbose, &e);
            ExitCode::FAILURE
        }
    }
}

// Missing arguments are reported with the usage on stdout.
fn parse_error(e: clap::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            _ = e.print();
            ExitCode::SUCCESS
        }
        ErrorKind::MissingRequiredArgument => {
            println!("{}", Opts::command().render_usage());
            ExitCode::FAILURE
        }
        _ => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Parser)]
#[command(
    name = "gpiopulse",
    about = "A utility to pulse a GPIO line active for a period.",
    version,
    allow_negative_numbers = true
)]
struct Opts {
    /// Provide more detailed error messages and debug logging.
    #[arg(short = 'v', long, display_order = 800)]
    pub verbose: bool,

    #[command(flatten)]
    pulse: pulse::Opts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_command() {
        Opts::command().debug_assert();
    }

    #[test]
    fn parse() {
        let opts = Opts::try_parse_from(["gpiopulse", "17", "500"]).unwrap();
        assert!(!opts.verbose);
        assert_eq!(opts.pulse.pin, 17);
        assert_eq!(opts.pulse.duration_ms, Some(500.0));
        assert!(opts.pulse.ignored.is_empty());
        assert!(!opts.pulse.inactive);
        assert_eq!(opts.pulse.chip, "0");
        assert_eq!(opts.pulse.consumer, "gpiopulse");
        assert!(!opts.pulse.active_low);

        let opts = Opts::try_parse_from([
            "gpiopulse",
            "-v",
            "--chip",
            "gpiochip1",
            "--consumer",
            "door",
            "-l",
            "4",
            "12.5",
        ])
        .unwrap();
        assert!(opts.verbose);
        assert_eq!(opts.pulse.pin, 4);
        assert_eq!(opts.pulse.duration_ms, Some(12.5));
        assert_eq!(opts.pulse.chip, "gpiochip1");
        assert_eq!(opts.pulse.consumer, "door");
        assert!(opts.pulse.active_low);
    }

    #[test]
    fn trailing_arguments() {
        let opts = Opts::try_parse_from(["gpiopulse", "17", "500", "extra"]).unwrap();
        assert_eq!(opts.pulse.pin, 17);
        assert_eq!(opts.pulse.duration_ms, Some(500.0));
        assert_eq!(opts.pulse.ignored, vec!["extra"]);

        let opts =
            Opts::try_parse_from(["gpiopulse", "-v", "4", "12.5", "more", "-x", "3"]).unwrap();
        assert!(opts.verbose);
        assert_eq!(opts.pulse.pin, 4);
        assert_eq!(opts.pulse.ignored, vec!["more", "-x", "3"]);
    }

    #[test]
    fn inactive() {
        let opts = Opts::try_parse_from(["gpiopulse", "--inactive", "17"]).unwrap();
        assert!(opts.pulse.inactive);
        assert_eq!(opts.pulse.pin, 17);
        assert_eq!(opts.pulse.duration_ms, None);

        let opts = Opts::try_parse_from(["gpiopulse", "17", "500", "--inactive"]).unwrap();
        assert!(opts.pulse.inactive);
        assert_eq!(opts.pulse.duration_ms, Some(500.0));
    }

    #[test]
    fn missing_arguments() {
        for args in [
            vec!["gpiopulse"],
            vec!["gpiopulse", "17"],
            vec!["gpiopulse", "--inactive"],
        ] {
            let e = Opts::try_parse_from(args).err().unwrap();
            assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn invalid_arguments() {
        for args in [
            ["gpiopulse", "abc", "500"],
            ["gpiopulse", "-3", "500"],
            ["gpiopulse", "1.5", "500"],
            ["gpiopulse", "17", "abc"],
            ["gpiopulse", "17", "-5"],
            ["gpiopulse", "17", "inf"],
        ] {
            let e = Opts::try_parse_from(args).err().unwrap();
            assert_eq!(e.kind(), ErrorKind::ValueValidation, "{args:?}");
        }
    }
}
