use std::time::{Duration, Instant};

/// Clock and sleep capability for retry loops.
///
/// The handshake never calls `std::thread::sleep` or `Instant::now`
/// directly, so tests can drive time with a fake.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Block the calling thread for `duration`. This is a suspension point,
    /// not a yield; the handshake is single-threaded by design.
    fn sleep(&self, duration: Duration);
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
