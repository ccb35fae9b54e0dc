//! Shared test fixtures and utilities for robokin crates.
//!
//! Provides preconfigured CoreXY machines, mock collaborators for the
//! firmware-side traits, and deterministic RNG setup.

pub mod fixtures;
pub mod mocks;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use fixtures::{corexy5ac_config, corexy5bc_config};
pub use mocks::{FixedMachineAxes, RecordingDrives, SteppingTicks};
pub use rng::{random_xyzab, seeded_rng};
