//! Socket-pair-backed event. The child end is what a child inherits and waits on, the parent
//! end never leaves this process. The event counts as signaled while a byte is pending on the
//! child end.

use std::fs::File;
use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd, OwnedFd};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::fcntl::{FcntlArg, FdFlag, fcntl};
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use nix::sys::socket::{AddressFamily, MsgFlags, SockFlag, SockType, recv, socketpair};

use crate::{InterruptEventError, InterruptEventOptions, RawInterruptHandle, ResetMode};

#[derive(Debug)]
pub(crate) struct Event {
    child_end: OwnedFd,
    parent_end: File,
    reset_mode: ResetMode,
    /// Serializes state changes so at most one byte is ever pending.
    state: Mutex<()>,
}

impl Event {
    pub(crate) fn create(options: &InterruptEventOptions) -> Result<Self, InterruptEventError> {
        if let Some(name) = &options.name {
            return Err(InterruptEventError::NamedEventsUnsupported { name: name.clone() });
        }
        let creation_failed = |source: io::Error| InterruptEventError::CreationFailed {
            name: None,
            source,
        };

        let (child_end, parent_end) =
            close_on_exec_socketpair().map_err(|errno| creation_failed(errno.into()))?;
        if options.inheritable {
            set_close_on_exec(&child_end, false).map_err(|errno| creation_failed(errno.into()))?;
        }

        let event = Self {
            child_end,
            parent_end: File::from(parent_end),
            reset_mode: options.reset_mode,
            state: Mutex::new(()),
        };
        if options.initially_signaled {
            event.set().map_err(creation_failed)?;
        }
        Ok(event)
    }

    pub(crate) fn raw(&self) -> RawInterruptHandle {
        RawInterruptHandle::new(self.child_end.as_raw_fd() as usize)
    }

    pub(crate) fn set(&self) -> io::Result<()> {
        let _guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_pending(PollTimeout::ZERO)? {
            return Ok(());
        }
        (&self.parent_end).write_all(&[1])
    }

    pub(crate) fn reset(&self) -> io::Result<()> {
        let _guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.drain()
    }

    pub(crate) fn wait(&self, timeout: Option<Duration>) -> io::Result<bool> {
        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));
        loop {
            if !self.is_pending(poll_timeout(remaining(deadline, Instant::now())))? {
                return Ok(false);
            }
            if self.reset_mode == ResetMode::Manual {
                return Ok(true);
            }
            // Another auto-reset waiter may consume the signal between poll and lock.
            let _guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if self.is_pending(PollTimeout::ZERO)? {
                self.drain()?;
                return Ok(true);
            }
        }
    }

    fn is_pending(&self, timeout: PollTimeout) -> io::Result<bool> {
        loop {
            let mut fds = [PollFd::new(self.child_end.as_fd(), PollFlags::POLLIN)];
            match poll(&mut fds, timeout) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    return Ok(fds[0]
                        .revents()
                        .is_some_and(|revents| revents.contains(PollFlags::POLLIN)));
                }
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    /// Callers must hold `state`. Never blocks, even when a child consumes the byte first.
    fn drain(&self) -> io::Result<()> {
        let mut buf = [0u8; 16];
        loop {
            match recv(self.child_end.as_raw_fd(), &mut buf, MsgFlags::MSG_DONTWAIT) {
                Ok(0) => return Ok(()),
                Ok(_) => continue,
                Err(Errno::EAGAIN) => return Ok(()),
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn parent_fd(&self) -> std::os::fd::RawFd {
        self.parent_end.as_raw_fd()
    }
}

/// Time left until `deadline`, `None` meaning no deadline.
fn remaining(deadline: Option<Instant>, now: Instant) -> Option<Duration> {
    deadline.map(|deadline| deadline.saturating_duration_since(now))
}

fn poll_timeout(timeout: Option<Duration>) -> PollTimeout {
    match timeout {
        None => PollTimeout::NONE,
        Some(timeout) => {
            let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
            PollTimeout::try_from(millis).unwrap_or(PollTimeout::MAX)
        }
    }
}

#[cfg(any(
    target_os = "android",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "illumos",
    target_os = "linux",
    target_os = "netbsd",
    target_os = "openbsd",
))]
fn close_on_exec_socketpair() -> nix::Result<(OwnedFd, OwnedFd)> {
    socketpair(
        AddressFamily::Unix,
        SockType::Stream,
        None,
        SockFlag::SOCK_CLOEXEC,
    )
}

/// Without `SOCK_CLOEXEC` the flag is set right after creation. A child spawned concurrently
/// by another thread may still inherit both ends.
#[cfg(not(any(
    target_os = "android",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "illumos",
    target_os = "linux",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
fn close_on_exec_socketpair() -> nix::Result<(OwnedFd, OwnedFd)> {
    let (child_end, parent_end) =
        socketpair(AddressFamily::Unix, SockType::Stream, None, SockFlag::empty())?;
    set_close_on_exec(&child_end, true)?;
    set_close_on_exec(&parent_end, true)?;
    Ok((child_end, parent_end))
}

fn set_close_on_exec(fd: &OwnedFd, close_on_exec: bool) -> nix::Result<()> {
    let mut flags = FdFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFD)?);
    flags.set(FdFlag::FD_CLOEXEC, close_on_exec);
    fcntl(fd, FcntlArg::F_SETFD(flags))?;
    Ok(())
}
