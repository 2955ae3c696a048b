//! Cross-process soft interrupts.
//!
//! Windows does not deliver `SIGINT` to child processes the way Unix does. Instead, the parent
//! creates an inheritable event with [`create_interrupt_event`], passes its
//! [`RawInterruptHandle`] to the child when spawning it and calls [`send_interrupt`] whenever
//! the child should stop what it is doing. The child waits on the inherited handle in a
//! background loop of its own.
//!
//! On Unix the same API is backed by a socket pair, so callers need no platform switches.

#![warn(missing_docs)]

mod error;
mod interrupt_event;
mod options;
mod raw_handle;
mod sys;

pub use error::{InterruptEventError, ParseRawHandleError};
pub use interrupt_event::{InterruptEvent, create_interrupt_event, send_interrupt};
pub use options::{InterruptEventOptions, ResetMode};
pub use raw_handle::RawInterruptHandle;

#[cfg(test)]
mod test {
    use crate::{
        InterruptEvent, InterruptEventOptions, RawInterruptHandle, ResetMode, create_interrupt_event,
    };
    use assertr::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn blocked_waiter_is_woken_by_interrupt() {
        let event = Arc::new(create_interrupt_event().unwrap());

        let waiter = tokio::task::spawn_blocking({
            let event = Arc::clone(&event);
            move || event.wait(Some(Duration::from_secs(10)))
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        event.send_interrupt().unwrap();

        let signaled = waiter.await.unwrap().unwrap();
        assert_that(signaled).is_true();
    }

    #[tokio::test]
    async fn every_waiter_observes_a_manual_reset_interrupt() {
        let event = Arc::new(create_interrupt_event().unwrap());

        let waiters = (0..4)
            .map(|_| {
                let event = Arc::clone(&event);
                tokio::task::spawn_blocking(move || event.wait(Some(Duration::from_secs(10))))
            })
            .collect::<Vec<_>>();

        tokio::time::sleep(Duration::from_millis(50)).await;
        event.send_interrupt().unwrap();

        for waiter in waiters {
            assert_that(waiter.await.unwrap().unwrap()).is_true();
        }
    }

    #[tokio::test]
    async fn only_one_waiter_consumes_an_auto_reset_interrupt() {
        let event = Arc::new(
            InterruptEvent::with_options(
                &InterruptEventOptions::default().reset_mode(ResetMode::Auto),
            )
            .unwrap(),
        );

        let waiters = (0..2)
            .map(|_| {
                let event = Arc::clone(&event);
                tokio::task::spawn_blocking(move || event.wait(Some(Duration::from_millis(500))))
            })
            .collect::<Vec<_>>();

        tokio::time::sleep(Duration::from_millis(50)).await;
        event.send_interrupt().unwrap();

        let mut woken = 0;
        for waiter in waiters {
            if waiter.await.unwrap().unwrap() {
                woken += 1;
            }
        }
        assert_that(woken).is_equal_to(1);
    }

    #[test]
    #[traced_test]
    fn logs_lifecycle() {
        let event = create_interrupt_event().unwrap();
        let handle = event.raw_handle();
        event.send_interrupt().unwrap();
        event.reset().unwrap();
        drop(event);

        assert_that(logs_contain("Created interrupt event")).is_true();
        assert_that(logs_contain(&format!("handle={handle}"))).is_true();
        assert_that(logs_contain("Sent interrupt")).is_true();
        assert_that(logs_contain("Reset interrupt event")).is_true();
        assert_that(logs_contain("Closing interrupt event")).is_true();
    }

    #[test]
    fn raw_handle_survives_string_transport() {
        let event = create_interrupt_event().unwrap();
        let transported = event.raw_handle().to_string();
        assert_that(transported.parse::<RawInterruptHandle>().unwrap()).is_equal_to(event.raw_handle());
    }
}
