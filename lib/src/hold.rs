// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Returned when a hold ends before its period elapsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Interrupted;

/// Blocks the calling thread while a line is held at a level.
pub trait Hold {
    /// Block for the period.
    fn hold(&self, period: Duration) -> Result<(), Interrupted>;
}

/// A plain sleep that always runs to completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sleep;

impl Hold for Sleep {
    fn hold(&self, period: Duration) -> Result<(), Interrupted> {
        thread::sleep(period);
        Ok(())
    }
}

/// A hold that may be ended early from another thread or a signal handler.
///
/// Clones share the same state, so one clone can be handed to the handler
/// while another performs the hold.
/// Once interrupted, all subsequent holds return immediately.
#[derive(Clone, Debug, Default)]
pub struct Interrupter {
    state: Arc<(Mutex<bool>, Condvar)>,
}

impl Interrupter {
    pub fn new() -> Interrupter {
        Interrupter::default()
    }

    /// End any hold in progress, and any future hold.
    pub fn interrupt(&self) {
        let (lock, cvar) = &*self.state;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    /// Check if the interrupter has fired.
    pub fn is_interrupted(&self) -> bool {
        *self.state.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Hold for Interrupter {
    fn hold(&self, period: Duration) -> Result<(), Interrupted> {
        let (lock, cvar) = &*self.state;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, period, |interrupted| !*interrupted)
            .unwrap_or_else(PoisonError::into_inner);
        if *guard {
            return Err(Interrupted);
        }
        Ok(())
    }
}
