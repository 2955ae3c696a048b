use std::os::windows::io::{AsRawHandle, FromRawHandle, OwnedHandle};
use std::time::Duration;
use std::{io, iter, mem, ptr};

use windows_sys::Win32::Foundation::{
    ERROR_ALREADY_EXISTS, FALSE, GetLastError, TRUE, WAIT_FAILED, WAIT_OBJECT_0, WAIT_TIMEOUT,
};
use windows_sys::Win32::Security::SECURITY_ATTRIBUTES;
use windows_sys::Win32::System::Threading::{
    CreateEventW, INFINITE, ResetEvent, SetEvent, WaitForSingleObject,
};

use crate::{InterruptEventError, InterruptEventOptions, RawInterruptHandle, ResetMode};

/// A Win32 event object.
#[derive(Debug)]
pub(crate) struct Event {
    handle: OwnedHandle,
}

impl Event {
    pub(crate) fn create(options: &InterruptEventOptions) -> Result<Self, InterruptEventError> {
        let attributes = SECURITY_ATTRIBUTES {
            nLength: mem::size_of::<SECURITY_ATTRIBUTES>() as u32,
            lpSecurityDescriptor: ptr::null_mut(),
            bInheritHandle: if options.inheritable { TRUE } else { FALSE },
        };
        let wide_name: Option<Vec<u16>> = options
            .name
            .as_deref()
            .map(|name| name.encode_utf16().chain(iter::once(0)).collect());
        let manual_reset = match options.reset_mode {
            ResetMode::Manual => TRUE,
            ResetMode::Auto => FALSE,
        };
        let initial_state = if options.initially_signaled {
            TRUE
        } else {
            FALSE
        };

        let handle = unsafe {
            CreateEventW(
                &attributes,
                manual_reset,
                initial_state,
                wide_name.as_ref().map_or(ptr::null(), |name| name.as_ptr()),
            )
        };
        if handle.is_null() {
            return Err(InterruptEventError::CreationFailed {
                name: options.name.clone(),
                source: io::Error::last_os_error(),
            });
        }
        // Must be read before any other call can overwrite the thread's last error.
        let already_existed = unsafe { GetLastError() } == ERROR_ALREADY_EXISTS;

        // SAFETY: `CreateEventW` returned a valid handle that nothing else owns.
        let handle = unsafe { OwnedHandle::from_raw_handle(handle) };

        if already_existed {
            tracing::warn!(
                name = ?options.name,
                "Opened an existing named event, reset mode and initial state were not applied"
            );
        }

        Ok(Self { handle })
    }

    pub(crate) fn raw(&self) -> RawInterruptHandle {
        RawInterruptHandle::new(self.handle.as_raw_handle() as usize)
    }

    pub(crate) fn set(&self) -> io::Result<()> {
        let success = unsafe { SetEvent(self.handle.as_raw_handle()) };
        if success == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    pub(crate) fn reset(&self) -> io::Result<()> {
        let success = unsafe { ResetEvent(self.handle.as_raw_handle()) };
        if success == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    pub(crate) fn wait(&self, timeout: Option<Duration>) -> io::Result<bool> {
        // INFINITE is u32::MAX, so finite timeouts are capped just below it.
        let millis = match timeout {
            None => INFINITE,
            Some(timeout) => u32::try_from(timeout.as_millis()).unwrap_or(INFINITE - 1),
        };
        match unsafe { WaitForSingleObject(self.handle.as_raw_handle(), millis) } {
            WAIT_OBJECT_0 => Ok(true),
            WAIT_TIMEOUT => Ok(false),
            WAIT_FAILED => Err(io::Error::last_os_error()),
            other => Err(io::Error::other(format!(
                "unexpected wait result {other:#x}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertr::prelude::*;
    use windows_sys::Win32::Foundation::{GetHandleInformation, HANDLE_FLAG_INHERIT};

    fn handle_flags(event: &Event) -> u32 {
        let mut flags = 0u32;
        let success = unsafe { GetHandleInformation(event.handle.as_raw_handle(), &mut flags) };
        assert_that(success != 0).is_true();
        flags
    }

    #[test]
    fn inheritable_flag_follows_options() {
        let inheritable = Event::create(&InterruptEventOptions::default()).unwrap();
        assert_that(handle_flags(&inheritable) & HANDLE_FLAG_INHERIT).is_equal_to(HANDLE_FLAG_INHERIT);

        let private =
            Event::create(&InterruptEventOptions::default().inheritable(false)).unwrap();
        assert_that(handle_flags(&private) & HANDLE_FLAG_INHERIT).is_equal_to(0);
    }

    #[test]
    fn named_events_are_shared() {
        let name = format!("interrupt-event-test-{}", std::process::id());
        let first = Event::create(&InterruptEventOptions::default().name(name.clone())).unwrap();
        let second = Event::create(&InterruptEventOptions::default().name(name)).unwrap();

        first.set().unwrap();
        assert_that(second.wait(Some(Duration::ZERO)).unwrap()).is_true();
    }
}
