//! Platform back ends. Each provides an `Event` with the same inherent methods.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::Event;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub(crate) use windows::Event;

#[cfg(not(any(unix, windows)))]
mod unsupported;
#[cfg(not(any(unix, windows)))]
pub(crate) use unsupported::Event;
