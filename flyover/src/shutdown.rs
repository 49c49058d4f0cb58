//! Cooperative shutdown and interruptible sleeping.
//!
//! The signal handler thread only flips a flag. Everything that waits
//! (the poll interval, feed backoff, geocoder retries) goes through a
//! [`Sleeper`] so it can notice the flag and so tests can record waits
//! instead of performing them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Granularity at which [`ShutdownSleeper`] checks the flag.
pub const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Shared shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    flag: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask everything holding this flag to stop.
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Something that can wait.
pub trait Sleeper {
    /// Wait for `duration`.
    ///
    /// Returns `false` if the wait was cut short by a shutdown request.
    fn sleep(&self, duration: Duration) -> bool;

    /// True once shutdown has been requested.
    fn is_shutdown(&self) -> bool {
        false
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) -> bool {
        (**self).sleep(duration)
    }

    fn is_shutdown(&self) -> bool {
        (**self).is_shutdown()
    }
}

/// Sleeps in [`SLEEP_SLICE`] steps, returning early on shutdown.
#[derive(Debug, Clone)]
pub struct ShutdownSleeper {
    shutdown: Shutdown,
    slice: Duration,
}

impl ShutdownSleeper {
    pub fn new(shutdown: Shutdown) -> Self {
        Self::with_slice(shutdown, SLEEP_SLICE)
    }

    /// Use a custom check interval.
    pub fn with_slice(shutdown: Shutdown, slice: Duration) -> Self {
        Self { shutdown, slice }
    }
}

impl Sleeper for ShutdownSleeper {
    fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.shutdown.is_requested() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(self.slice.min(deadline - now));
        }
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown.is_requested()
    }
}

/// Plain blocking sleep with no shutdown awareness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) -> bool {
        thread::sleep(duration);
        true
    }
}
