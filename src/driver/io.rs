// src/driver/io.rs

use crate::common::error::Ft300Error;
use crate::common::hal_traits::{Ft300Serial, Ft300Timer};
use core::time::Duration;
use nb::Result as NbResult;

/// Polls a non-blocking I/O operation until it completes, fails, or
/// `timeout` elapses on the interface clock.
pub(crate) fn blocking_io_with_timeout<IF, F, T>(
    iface: &mut IF,
    timeout: Duration,
    mut op: F,
) -> Result<T, Ft300Error<IF::Error>>
where
    IF: Ft300Serial + Ft300Timer,
    F: FnMut(&mut IF) -> NbResult<T, <IF as Ft300Serial>::Error>,
{
    let deadline = iface.now() + timeout;

    loop {
        match op(iface) {
            Ok(result) => return Ok(result),
            Err(nb::Error::WouldBlock) => {
                if iface.now() >= deadline {
                    return Err(Ft300Error::Timeout);
                }
                // Small backoff so WouldBlock does not spin a core at 100%.
                iface.delay_us(100);
            }
            Err(nb::Error::Other(e)) => return Err(Ft300Error::Io(e)),
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use core::ops::{Add, Sub};

    #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct MockInstant(u64);
    impl Add<Duration> for MockInstant {
        type Output = Self;
        fn add(self, rhs: Duration) -> Self {
            MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
        }
    }
    impl Sub<MockInstant> for MockInstant {
        type Output = Duration;
        fn sub(self, rhs: MockInstant) -> Duration {
            Duration::from_micros(self.0.saturating_sub(rhs.0))
        }
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    struct MockLinkError;

    struct MockLink {
        now_us: u64,
        attempts_before_ready: u32,
        attempts: u32,
        fail_with_io: bool,
    }

    impl Ft300Timer for MockLink {
        type Instant = MockInstant;
        fn now(&self) -> MockInstant {
            MockInstant(self.now_us)
        }
        fn delay_us(&mut self, us: u32) {
            self.now_us += us as u64;
        }
        fn delay_ms(&mut self, ms: u32) {
            self.now_us += ms as u64 * 1000;
        }
    }

    impl Ft300Serial for MockLink {
        type Error = MockLinkError;
        fn read_byte(&mut self) -> NbResult<u8, MockLinkError> {
            if self.fail_with_io {
                return Err(nb::Error::Other(MockLinkError));
            }
            self.attempts += 1;
            if self.attempts > self.attempts_before_ready {
                Ok(0x42)
            } else {
                Err(nb::Error::WouldBlock)
            }
        }
        fn write_byte(&mut self, _byte: u8) -> NbResult<(), MockLinkError> {
            Ok(())
        }
        fn flush(&mut self) -> NbResult<(), MockLinkError> {
            Ok(())
        }
    }

    fn link(attempts_before_ready: u32) -> MockLink {
        MockLink {
            now_us: 0,
            attempts_before_ready,
            attempts: 0,
            fail_with_io: false,
        }
    }

    #[test]
    fn completes_after_would_block() {
        let mut iface = link(3);
        let result =
            blocking_io_with_timeout(&mut iface, Duration::from_millis(10), |l| l.read_byte());
        assert_eq!(result.unwrap(), 0x42);
        assert_eq!(iface.attempts, 4);
        // Three backoff delays of 100 us each.
        assert_eq!(iface.now_us, 300);
    }

    #[test]
    fn times_out_when_never_ready() {
        let mut iface = link(u32::MAX);
        let result =
            blocking_io_with_timeout(&mut iface, Duration::from_millis(1), |l| l.read_byte());
        assert!(matches!(result, Err(Ft300Error::Timeout)));
        assert!(iface.now_us >= 1_000);
    }

    #[test]
    fn io_errors_pass_through() {
        let mut iface = link(0);
        iface.fail_with_io = true;
        let result =
            blocking_io_with_timeout(&mut iface, Duration::from_millis(1), |l| l.read_byte());
        assert!(matches!(result, Err(Ft300Error::Io(MockLinkError))));
    }
}
