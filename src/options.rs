//! Creation settings for interrupt events.

use std::borrow::Cow;

use crate::InterruptEventError;

/// Controls how a signaled event returns to the unsignaled state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// The event stays signaled until [`InterruptEvent::reset`](crate::InterruptEvent::reset)
    /// is called. Every waiter observes the interrupt.
    #[default]
    Manual,

    /// The first successful wait consumes the signal.
    Auto,
}

/// Settings used when creating an [`InterruptEvent`](crate::InterruptEvent).
///
/// The defaults describe the event a parent process hands to a child: manual reset, not yet
/// signaled, inheritable and anonymous.
///
/// # Examples
///
/// ```no_run
/// use interrupt_event::{InterruptEvent, InterruptEventOptions, ResetMode};
///
/// let event = InterruptEvent::with_options(
///     &InterruptEventOptions::default()
///         .reset_mode(ResetMode::Auto)
///         .inheritable(false),
/// )?;
/// # Ok::<_, interrupt_event::InterruptEventError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptEventOptions {
    pub(crate) reset_mode: ResetMode,
    pub(crate) initially_signaled: bool,
    pub(crate) inheritable: bool,
    pub(crate) name: Option<Cow<'static, str>>,
}

impl Default for InterruptEventOptions {
    fn default() -> Self {
        Self {
            reset_mode: ResetMode::Manual,
            initially_signaled: false,
            inheritable: true,
            name: None,
        }
    }
}

impl InterruptEventOptions {
    /// Sets the reset behavior. Defaults to [`ResetMode::Manual`].
    pub fn reset_mode(mut self, reset_mode: ResetMode) -> Self {
        self.reset_mode = reset_mode;
        self
    }

    /// Whether the event starts out signaled. Defaults to `false`.
    pub fn initially_signaled(mut self, initially_signaled: bool) -> Self {
        self.initially_signaled = initially_signaled;
        self
    }

    /// Whether processes spawned afterwards inherit the handle. Defaults to `true`.
    pub fn inheritable(mut self, inheritable: bool) -> Self {
        self.inheritable = inheritable;
        self
    }

    /// Gives the event a system-wide name so unrelated processes can open it.
    ///
    /// Only supported on Windows. Creation fails on other platforms.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Removes a previously set name, making the event anonymous again.
    pub fn anonymous(mut self) -> Self {
        self.name = None;
        self
    }

    /// The configured reset behavior.
    pub fn get_reset_mode(&self) -> ResetMode {
        self.reset_mode
    }

    /// Whether the event is created in the signaled state.
    pub fn is_initially_signaled(&self) -> bool {
        self.initially_signaled
    }

    /// Whether spawned processes inherit the handle.
    pub fn is_inheritable(&self) -> bool {
        self.inheritable
    }

    /// The system-wide name, `None` for anonymous events.
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn validate(&self) -> Result<(), InterruptEventError> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(InterruptEventError::InvalidName {
                    name: name.clone(),
                    reason: "name must not be empty, use an anonymous event instead",
                });
            }
            if name.contains('\0') {
                return Err(InterruptEventError::InvalidName {
                    name: name.clone(),
                    reason: "name must not contain NUL characters",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertr::prelude::*;

    #[test]
    fn defaults_describe_an_inheritable_manual_reset_event() {
        let options = InterruptEventOptions::default();
        assert_that(options.get_reset_mode()).is_equal_to(ResetMode::Manual);
        assert_that(options.is_initially_signaled()).is_false();
        assert_that(options.is_inheritable()).is_true();
        assert_that(options.get_name()).is_none();
    }

    #[test]
    fn setters_chain() {
        let options = InterruptEventOptions::default()
            .reset_mode(ResetMode::Auto)
            .initially_signaled(true)
            .inheritable(false)
            .name("kernel-interrupt");
        assert_that(options.get_reset_mode()).is_equal_to(ResetMode::Auto);
        assert_that(options.is_initially_signaled()).is_true();
        assert_that(options.is_inheritable()).is_false();
        assert_that(options.get_name()).is_equal_to(Some("kernel-interrupt"));

        let options = options.anonymous();
        assert_that(options.get_name()).is_none();
    }

    #[test]
    fn rejects_names_with_nul() {
        let err = InterruptEventOptions::default()
            .name("bad\0name")
            .validate()
            .unwrap_err();
        assert_that(matches!(err, InterruptEventError::InvalidName { .. })).is_true();
    }

    #[test]
    fn rejects_empty_names() {
        let err = InterruptEventOptions::default()
            .name("")
            .validate()
            .unwrap_err();
        assert_that(matches!(err, InterruptEventError::InvalidName { .. })).is_true();
    }
}
