// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// A backend that records calls rather than driving hardware.

use super::{Backend, Level, Output};
use crate::hold::{Hold, Interrupted};
use crate::{Error, Pin, Result};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Call {
    OpenController(u32),
    Open(Pin),
    SetLevel(Pin, Level),
    Hold(Duration),
    Release(Pin),
    CloseController(u32),
}

/// The calls made on the fakes sharing the log, in order, with when they were made.
#[derive(Clone, Debug, Default)]
pub struct Log(Rc<RefCell<Vec<(Call, Instant)>>>);

impl Log {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push((call, Instant::now()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().iter().map(|(c, _)| *c).collect()
    }

    pub fn time_of(&self, call: Call) -> Option<Instant> {
        self.0
            .borrow()
            .iter()
            .find(|(c, _)| *c == call)
            .map(|(_, t)| *t)
    }
}

/// The call that should fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fail {
    Open,
    SetLevel(Level),
    Release,
}

pub struct Fake {
    name: &'static str,
    chip: Option<u32>,
    log: Log,
    fail: Option<Fail>,
}

impl Fake {
    pub fn primary(log: &Log) -> Fake {
        Fake {
            name: "fake-primary",
            chip: None,
            log: log.clone(),
            fail: None,
        }
    }

    pub fn secondary(log: &Log, chip: u32) -> Fake {
        log.push(Call::OpenController(chip));
        Fake {
            name: "fake-secondary",
            chip: Some(chip),
            log: log.clone(),
            fail: None,
        }
    }

    pub fn failing(mut self, fail: Fail) -> Fake {
        self.fail = Some(fail);
        self
    }
}

fn fault(what: &str) -> Error {
    Error::Cdev(gpiocdev::Error::InvalidArgument(format!("fake {what} fault")))
}

impl Backend for Fake {
    fn name(&self) -> &'static str {
        self.name
    }

    fn open(&mut self, pin: Pin) -> Result<Box<dyn Output + '_>> {
        if self.fail == Some(Fail::Open) {
            return Err(fault("open"));
        }
        self.log.push(Call::Open(pin));
        Ok(Box::new(FakeLine {
            pin,
            log: self.log.clone(),
            fail: self.fail,
            released: false,
        }))
    }
}

impl Drop for Fake {
    fn drop(&mut self) {
        if let Some(chip) = self.chip {
            self.log.push(Call::CloseController(chip));
        }
    }
}

struct FakeLine {
    pin: Pin,
    log: Log,
    fail: Option<Fail>,
    released: bool,
}

impl Output for FakeLine {
    fn pin(&self) -> Pin {
        self.pin
    }

    fn set_level(&mut self, level: Level) -> Result<()> {
        if self.fail == Some(Fail::SetLevel(level)) {
            return Err(fault("set_level"));
        }
        self.log.push(Call::SetLevel(self.pin, level));
        Ok(())
    }

    fn release(mut self: Box<Self>) -> Result<()> {
        self.released = true;
        self.log.push(Call::Release(self.pin));
        if self.fail == Some(Fail::Release) {
            return Err(fault("release"));
        }
        Ok(())
    }
}

impl Drop for FakeLine {
    fn drop(&mut self) {
        if !self.released {
            self.log.push(Call::Release(self.pin));
        }
    }
}

/// A hold that records the period and returns immediately.
pub struct FakeHold {
    log: Log,
    interrupt: bool,
}

impl FakeHold {
    pub fn new(log: &Log) -> FakeHold {
        FakeHold {
            log: log.clone(),
            interrupt: false,
        }
    }

    pub fn interrupted(log: &Log) -> FakeHold {
        FakeHold {
            log: log.clone(),
            interrupt: true,
        }
    }
}

impl Hold for FakeHold {
    fn hold(&self, period: Duration) -> std::result::Result<(), Interrupted> {
        self.log.push(Call::Hold(period));
        if self.interrupt {
            return Err(Interrupted);
        }
        Ok(())
    }
}
