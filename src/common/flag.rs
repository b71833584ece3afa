// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

use log::trace;
use std::pin::pin;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

use crate::{Error, Result};

/// A value that one side publishes and another side waits for.
///
/// The PBP preconditions publish the IUT address through one of these, which is the signal for a
/// second lower tester to continue with its own preconditions.
#[derive(Debug, Default)]
pub struct ResultWithFlag<T> {
    value: Mutex<Option<T>>,
    notify: Notify,
}

impl<T: Clone> ResultWithFlag<T> {
    pub fn new() -> Self {
        ResultWithFlag {
            value: Mutex::new(None),
            notify: Notify::new(),
        }
    }

    /// Stores `value` and wakes everybody waiting for it.
    pub fn set(&self, value: T) {
        *self.value.lock().unwrap() = Some(value);
        trace!("Flag set, waking waiters");
        self.notify.notify_waiters();
    }

    pub fn get(&self) -> Option<T> {
        self.value.lock().unwrap().clone()
    }

    pub fn is_set(&self) -> bool {
        self.value.lock().unwrap().is_some()
    }

    pub fn clear(&self) {
        *self.value.lock().unwrap() = None;
    }

    /// Waits until a value is set, or fails with [`Error::TimedOut`].
    pub async fn wait(&self, timeout: Duration) -> Result<T> {
        let wait_for_value = async {
            loop {
                let mut notified = pin!(self.notify.notified());
                // Register before checking, so a `set` between the check and the await is not lost.
                notified.as_mut().enable();
                if let Some(value) = self.get() {
                    return value;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait_for_value)
            .await
            .map_err(|_| Error::TimedOut(timeout))
    }
}
