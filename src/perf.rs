//! Timing instrumentation for the interaction hot paths.
//!
//! Pointer moves arrive at display rate while a drag is active, so the move
//! dispatch and hit testing are wrapped in [`profile_scope!`]. Without the
//! `profiling` feature the macro expands to nothing.
//!
//! ```toml
//! [dependencies]
//! formcanvas = { features = ["profiling"] }
//! ```

use std::time::Instant;
use tracing::warn;

/// Profile a scope with the given name and slow threshold in milliseconds.
/// Zero-cost when profiling is disabled.
///
/// ```ignore
/// fn on_pointer_move(&mut self) {
///     profile_scope!("on_pointer_move", POINTER_MOVE_BUDGET_MS);
/// }
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

/// RAII timer: logs a warning on drop when the scope overran its threshold.
pub struct ScopedTimer {
    name: &'static str,
    threshold_ms: f64,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            threshold_ms,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}

/// Run `f` and return its result with the elapsed time in milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}
