use std::fmt::{self, Display};
use std::str::FromStr;

use crate::ParseRawHandleError;

/// The plain value of an event handle, as seen by a child process that inherited it.
///
/// On Windows this is the `HANDLE` value, on Unix the file descriptor the child has to wait on.
/// The value is formatted as a decimal integer, which is what a child expects to find on its
/// command line or in its environment.
///
/// On Unix the descriptor is one end of a stream socket pair. A child should `poll` it for
/// readability and only read from it without blocking, since the parent may drain it at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawInterruptHandle(usize);

impl RawInterruptHandle {
    /// Wraps a handle value, for example one received from a parent process.
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    /// The handle value as an integer.
    pub fn value(self) -> usize {
        self.0
    }

    /// The handle value as a file descriptor.
    #[cfg(unix)]
    pub fn as_raw_fd(self) -> std::os::fd::RawFd {
        self.0 as std::os::fd::RawFd
    }

    /// The handle value as a Win32 `HANDLE`.
    #[cfg(windows)]
    pub fn as_raw_handle(self) -> std::os::windows::io::RawHandle {
        self.0 as std::os::windows::io::RawHandle
    }
}

impl From<usize> for RawInterruptHandle {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl Display for RawInterruptHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RawInterruptHandle {
    type Err = ParseRawHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(Self)
            .map_err(|source| ParseRawHandleError {
                value: s.to_owned(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertr::prelude::*;

    #[test]
    fn displays_as_decimal() {
        assert_that(RawInterruptHandle::new(1234).to_string()).is_equal_to("1234".to_string());
    }

    #[test]
    fn parses_values_read_from_the_environment() {
        let handle: RawInterruptHandle = " 772\n".parse().unwrap();
        assert_that(handle.value()).is_equal_to(772);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-handle".parse::<RawInterruptHandle>().unwrap_err();
        assert_that(err.to_string().contains("is not a valid interrupt handle value")).is_true();
        assert_that(err.value).is_equal_to("not-a-handle".to_string());
    }

    #[test]
    fn rejects_negative_values() {
        let result = "-1".parse::<RawInterruptHandle>();
        assert_that(result.is_err()).is_true();
    }
}
