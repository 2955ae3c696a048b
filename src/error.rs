//! Error types for interrupt event operations.

use std::borrow::Cow;
use std::io;
use std::num::ParseIntError;
use thiserror::Error;

use crate::RawInterruptHandle;

/// Errors that can occur when creating or using an [`InterruptEvent`](crate::InterruptEvent).
#[derive(Debug, Error)]
pub enum InterruptEventError {
    /// The operating system refused to create the event object.
    #[error("Failed to create interrupt event{}: {source}", display_name(.name))]
    CreationFailed {
        /// The requested event name, if any.
        name: Option<Cow<'static, str>>,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Failed to signal the event.
    #[error("Failed to signal interrupt event '{handle}': {source}")]
    SignallingFailed {
        /// The handle that could not be signaled.
        handle: RawInterruptHandle,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Failed to return the event to the unsignaled state.
    #[error("Failed to reset interrupt event '{handle}': {source}")]
    ResetFailed {
        /// The handle that could not be reset.
        handle: RawInterruptHandle,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Waiting on (or probing) the event failed.
    #[error("Failed to wait on interrupt event '{handle}': {source}")]
    WaitFailed {
        /// The handle that was waited on.
        handle: RawInterruptHandle,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The requested event name cannot be passed to the operating system.
    #[error("Invalid interrupt event name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: Cow<'static, str>,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// Named events are only available on Windows.
    #[error("Named interrupt events are not supported on this platform (requested '{name}')")]
    NamedEventsUnsupported {
        /// The requested name.
        name: Cow<'static, str>,
    },

    /// Neither a Windows nor a Unix back end is available.
    #[error("Interrupt events are not supported on this platform")]
    Unsupported,
}

fn display_name(name: &Option<Cow<'static, str>>) -> String {
    match name {
        Some(name) => format!(" '{name}'"),
        None => String::new(),
    }
}

/// Error returned when parsing a [`RawInterruptHandle`] from a string.
#[derive(Debug, Error)]
#[error("'{value}' is not a valid interrupt handle value: {source}")]
pub struct ParseRawHandleError {
    /// The input that failed to parse.
    pub value: String,
    /// The underlying integer parse error.
    #[source]
    pub source: ParseIntError,
}
