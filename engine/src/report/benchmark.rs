//! Utilities to measure how long loading and querying takes.

use std::sync::atomic::{compiler_fence, Ordering::SeqCst};
use std::time::*;

/// Measure how long it takes to execute the given lambda,
/// print the time to stderr and return the result of the lambda.
pub fn report_time<Out, F: FnOnce() -> Out>(name: &str, f: F) -> Out {
    let (res, t_passed) = measure(|| {
        eprintln!("starting {}", name);
        f()
    });
    eprintln!("{} done - took: {}ms", name, t_passed.as_secs_f64() * 1000.0);
    res
}

/// Like `report_time` but also reports the time under the given key.
pub fn report_time_with_key<Out, F: FnOnce() -> Out>(name: &str, key: &'static str, f: F) -> Out {
    let (res, t_passed) = measure(|| {
        eprintln!("starting {}", name);
        f()
    });
    let t_passed = t_passed.as_secs_f64() * 1000.0;
    eprintln!("{} done - took: {}ms", name, t_passed);
    report!(key, t_passed);
    res
}

/// Measure how long it takes to execute the given lambda
/// and return a tuple of the result of the lambda and a duration object.
pub fn measure<Out, F: FnOnce() -> Out>(f: F) -> (Out, Duration) {
    compiler_fence(SeqCst);
    let start = Instant::now();
    let res = f();
    let t_passed = start.elapsed();
    compiler_fence(SeqCst);
    (res, t_passed)
}

/// A struct to repeatedly measure the time passed since the timer was started
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create and start a new `Timer`
    pub fn new() -> Timer {
        Timer { start: Instant::now() }
    }

    /// Number of milliseconds passed since the timer was started
    pub fn get_passed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measured_time_is_positive_and_monotone() {
        let timer = Timer::new();
        let (sum, duration) = measure(|| (0..1000u64).sum::<u64>());
        assert_eq!(sum, 499500);
        let first = timer.get_passed_ms();
        assert!(first >= duration.as_secs_f64() * 1000.0);
        assert!(timer.get_passed_ms() >= first);
        assert_eq!(report_time("sum", || 40 + 2), 42);
    }
}
