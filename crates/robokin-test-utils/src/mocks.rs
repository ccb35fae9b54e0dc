//! Mock implementations of the collaborator traits for testing.
//!
//! Provides a scripted tick source, a drive-coordinate sink that records every
//! write, and a fixed machine-axis table.

use std::cell::Cell;

use robokin_core::{AxisLetter, DriveCoordinates, MachineAxes, TickSource, Wiring};

// ---------------------------------------------------------------------------
// SteppingTicks
// ---------------------------------------------------------------------------

/// A tick source that advances by a fixed step on every read.
pub struct SteppingTicks {
    now: Cell<u32>,
    step: u32,
    rate: u32,
}

impl SteppingTicks {
    /// Start at `start`, advance `step` ticks per read, 1 MHz.
    pub const fn new(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
            rate: 1_000_000,
        }
    }

    #[must_use]
    pub const fn with_rate(mut self, rate: u32) -> Self {
        self.rate = rate;
        self
    }
}

impl TickSource for SteppingTicks {
    fn ticks(&self) -> u32 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(self.step));
        t
    }

    fn tick_rate(&self) -> u32 {
        self.rate
    }
}

// ---------------------------------------------------------------------------
// RecordingDrives
// ---------------------------------------------------------------------------

/// A drive sink that keeps every `(axis, steps)` write in order.
#[derive(Debug, Default)]
pub struct RecordingDrives {
    pub writes: Vec<(usize, i32)>,
}

impl RecordingDrives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent value written to `axis`.
    pub fn last(&self, axis: usize) -> Option<i32> {
        self.writes.iter().rev().find(|(a, _)| *a == axis).map(|(_, s)| *s)
    }
}

impl DriveCoordinates for RecordingDrives {
    fn set_drive_coordinate(&mut self, steps: i32, axis: usize) {
        self.writes.push((axis, steps));
    }
}

// ---------------------------------------------------------------------------
// FixedMachineAxes
// ---------------------------------------------------------------------------

/// Machine-axis table with fixed letters and travel.
#[derive(Debug, Clone)]
pub struct FixedMachineAxes {
    pub letters: Vec<Option<AxisLetter>>,
    pub minima: Vec<f32>,
    pub maxima: Vec<f32>,
}

impl FixedMachineAxes {
    /// Five-axis CoreXY table: X, Y, Z, A or B, C.
    pub fn five_axis(wiring: Wiring) -> Self {
        Self {
            letters: vec![
                Some(AxisLetter::X),
                Some(AxisLetter::Y),
                Some(AxisLetter::Z),
                Some(wiring.tilt_letter()),
                Some(AxisLetter::C),
            ],
            minima: vec![-150.0, -150.0, 0.0, -100.0, -360.0],
            maxima: vec![150.0, 150.0, 120.0, 100.0, 360.0],
        }
    }
}

impl MachineAxes for FixedMachineAxes {
    fn axis_count(&self) -> usize {
        self.letters.len()
    }

    fn axis_letter(&self, axis: usize) -> Option<AxisLetter> {
        self.letters.get(axis).copied().flatten()
    }

    fn axis_minimum(&self, axis: usize) -> f32 {
        self.minima.get(axis).copied().unwrap_or(0.0)
    }

    fn axis_maximum(&self, axis: usize) -> f32 {
        self.maxima.get(axis).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
