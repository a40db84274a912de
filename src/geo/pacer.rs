// src/geo/pacer.rs
use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

/// Minimum spacing between provider calls.
///
/// Single execution context only: the pipeline never shares a geocoder across
/// threads, so a `Cell` is enough.
#[derive(Debug)]
pub struct Pacer {
    gap: Duration,
    last: Cell<Option<Instant>>,
}

impl Pacer {
    pub fn new(gap: Duration) -> Self {
        Self { gap, last: Cell::new(None) }
    }

    /// Block until `gap` has passed since the previous call, then stamp now.
    pub fn wait(&self) {
        if let Some(prev) = self.last.get() {
            let elapsed = prev.elapsed();
            if elapsed < self.gap {
                thread::sleep(self.gap - elapsed);
            }
        }
        self.last.set(Some(Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_calls_are_spaced() {
        let pacer = Pacer::new(Duration::from_millis(40));
        let t0 = Instant::now();
        pacer.wait();
        pacer.wait();
        pacer.wait();
        assert!(t0.elapsed() >= Duration::from_millis(80));
    }

    #[test]
    fn first_call_does_not_sleep() {
        let pacer = Pacer::new(Duration::from_secs(5));
        let t0 = Instant::now();
        pacer.wait();
        assert!(t0.elapsed() < Duration::from_secs(1));
    }
}
