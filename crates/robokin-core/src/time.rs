use std::cell::Cell;
use std::time::Instant;

// ---------------------------------------------------------------------------
// TickSource
// ---------------------------------------------------------------------------

/// Free-running hardware-style tick counter.
///
/// Counts are allowed to wrap; consumers subtract with `wrapping_sub`.
pub trait TickSource {
    /// Current tick count.
    fn ticks(&self) -> u32;

    /// Ticks per second.
    fn tick_rate(&self) -> u32;
}

// ---------------------------------------------------------------------------
// MonotonicTicks
// ---------------------------------------------------------------------------

/// 1 MHz tick source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTicks {
    origin: Instant,
}

impl MonotonicTicks {
    pub const RATE: u32 = 1_000_000;

    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for MonotonicTicks {
    #[allow(clippy::cast_possible_truncation)]
    fn ticks(&self) -> u32 {
        // Truncation is the wrap-around of a 32-bit microsecond counter.
        self.origin.elapsed().as_micros() as u32
    }

    fn tick_rate(&self) -> u32 {
        Self::RATE
    }
}

// ---------------------------------------------------------------------------
// SolveTimer
// ---------------------------------------------------------------------------

/// Running average of conversion times in microseconds.
///
/// Uses [`Cell`] so conversions can record timings through `&self`.
#[derive(Debug, Default)]
pub struct SolveTimer {
    sum_micros: Cell<f32>,
    samples: Cell<u32>,
}

impl SolveTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum_micros: Cell::new(0.0),
            samples: Cell::new(0),
        }
    }

    /// Record the interval between two tick readings.
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&self, start: u32, end: u32, tick_rate: u32) -> f32 {
        let elapsed = end.wrapping_sub(start);
        let micros = if tick_rate == 0 {
            0.0
        } else {
            elapsed as f32 * 1_000_000.0 / tick_rate as f32
        };
        self.sum_micros.set(self.sum_micros.get() + micros);
        self.samples.set(self.samples.get().saturating_add(1));
        micros
    }

    /// Run `f` and record how long it took according to `clock`.
    pub fn measure<T>(&self, clock: &impl TickSource, f: impl FnOnce() -> T) -> T {
        let start = clock.ticks();
        let out = f();
        self.record(start, clock.ticks(), clock.tick_rate());
        out
    }

    /// Number of recorded samples since the last reset.
    #[must_use]
    pub fn samples(&self) -> u32 {
        self.samples.get()
    }

    /// Average in microseconds, or `None` when nothing was recorded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_micros(&self) -> Option<f32> {
        match self.samples.get() {
            0 => None,
            n => Some(self.sum_micros.get() / n as f32),
        }
    }

    pub fn reset(&self) {
        self.sum_micros.set(0.0);
        self.samples.set(0);
    }

    /// Average and reset in one step.
    pub fn take_average_micros(&self) -> Option<f32> {
        let avg = self.average_micros();
        self.reset();
        avg
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
