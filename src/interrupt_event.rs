use std::time::Duration;

use crate::sys;
use crate::{InterruptEventError, InterruptEventOptions, RawInterruptHandle, ResetMode};

/// An OS event object a parent process uses to interrupt a child, standing in for `SIGINT`.
///
/// The parent creates the event before spawning the child, passes
/// [`raw_handle`](Self::raw_handle) to it (usually on the command line or in the environment)
/// and keeps this value alive for as long as the child may wait on the handle. Calling
/// [`send_interrupt`](Self::send_interrupt) later signals the event. Listening for the event is
/// up to the child.
///
/// - on `cfg(windows)`: a Win32 event created with `CreateEventW`.
/// - on `cfg(unix)`: a stream socket pair whose child end is handed to the child.
///
/// The underlying handle is closed when this value is dropped.
#[derive(Debug)]
pub struct InterruptEvent {
    event: sys::Event,
    options: InterruptEventOptions,
}

impl InterruptEvent {
    /// Creates an anonymous, inheritable, manual-reset event that is not yet signaled.
    pub fn create() -> Result<Self, InterruptEventError> {
        Self::with_options(&InterruptEventOptions::default())
    }

    /// Creates an event configured by `options`.
    pub fn with_options(options: &InterruptEventOptions) -> Result<Self, InterruptEventError> {
        options.validate()?;
        let event = sys::Event::create(options)?;
        let this = Self {
            event,
            options: options.clone(),
        };
        tracing::debug!(
            handle = %this.raw_handle(),
            name = ?this.options.name,
            reset_mode = ?this.options.reset_mode,
            inheritable = this.options.inheritable,
            "Created interrupt event"
        );
        Ok(this)
    }

    /// The handle value a child process has to wait on.
    pub fn raw_handle(&self) -> RawInterruptHandle {
        self.event.raw()
    }

    /// The options this event was created with.
    pub fn options(&self) -> &InterruptEventOptions {
        &self.options
    }

    /// How the event returns to the unsignaled state.
    pub fn reset_mode(&self) -> ResetMode {
        self.options.reset_mode
    }

    /// Signals the event, asking the child to interrupt what it is doing.
    ///
    /// Signaling an already signaled event succeeds without changing anything.
    pub fn send_interrupt(&self) -> Result<(), InterruptEventError> {
        let handle = self.raw_handle();
        self.event
            .set()
            .map_err(|source| InterruptEventError::SignallingFailed { handle, source })?;
        tracing::debug!(%handle, "Sent interrupt");
        Ok(())
    }

    /// Returns the event to the unsignaled state.
    pub fn reset(&self) -> Result<(), InterruptEventError> {
        let handle = self.raw_handle();
        self.event
            .reset()
            .map_err(|source| InterruptEventError::ResetFailed { handle, source })?;
        tracing::debug!(%handle, "Reset interrupt event");
        Ok(())
    }

    /// Checks whether the event is signaled without blocking.
    ///
    /// For [`ResetMode::Auto`] events a positive answer consumes the signal.
    pub fn is_set(&self) -> Result<bool, InterruptEventError> {
        let is_set = self.wait(Some(Duration::ZERO))?;
        tracing::trace!(handle = %self.raw_handle(), is_set, "Probed interrupt event");
        Ok(is_set)
    }

    /// Blocks until the event is signaled or `timeout` elapses. `None` waits indefinitely.
    ///
    /// Returns `true` if the event was signaled, `false` on timeout.
    pub fn wait(&self, timeout: Option<Duration>) -> Result<bool, InterruptEventError> {
        self.event
            .wait(timeout)
            .map_err(|source| InterruptEventError::WaitFailed {
                handle: self.raw_handle(),
                source,
            })
    }
}

impl Drop for InterruptEvent {
    fn drop(&mut self) {
        tracing::debug!(handle = %self.raw_handle(), "Closing interrupt event");
    }
}

/// Creates the interrupt event a parent process passes to a child it is about to spawn.
///
/// Store the returned event and use it with [`send_interrupt`] to interrupt the child.
pub fn create_interrupt_event() -> Result<InterruptEvent, InterruptEventError> {
    InterruptEvent::create()
}

/// Sends an interrupt through `event`.
pub fn send_interrupt(event: &InterruptEvent) -> Result<(), InterruptEventError> {
    event.send_interrupt()
}
