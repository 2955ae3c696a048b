use std::io;
use std::time::Duration;

use crate::{InterruptEventError, InterruptEventOptions, RawInterruptHandle};

/// Uninhabited: no event can ever be created here.
#[derive(Debug)]
pub(crate) enum Event {}

impl Event {
    pub(crate) fn create(_options: &InterruptEventOptions) -> Result<Self, InterruptEventError> {
        Err(InterruptEventError::Unsupported)
    }

    pub(crate) fn raw(&self) -> RawInterruptHandle {
        match *self {}
    }

    pub(crate) fn set(&self) -> io::Result<()> {
        match *self {}
    }

    pub(crate) fn reset(&self) -> io::Result<()> {
        match *self {}
    }

    pub(crate) fn wait(&self, _timeout: Option<Duration>) -> io::Result<bool> {
        match *self {}
    }
}
