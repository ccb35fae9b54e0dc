//! CoreXY belt mixing and step scaling.
//!
//! # Mixing Convention
//!
//! The two belt motors of a CoreXY stage see the sum and difference of the
//! X and Y joint positions:
//!
//! ```text
//! a = (x + y) · s0        x = ½ (a / s0 + b / s1)
//! b = (x − y) · s1        y = ½ (a / s0 − b / s1)
//! ```
//!
//! Every other axis is scaled directly. Step counts are rounded half to even.

use robokin_core::SolveError;

/// Number of axes driven by the kinematic chain.
pub const CHAIN_AXES: usize = 5;

/// Convert a position to a step count, rounding half to even.
#[allow(clippy::cast_possible_truncation)]
pub fn to_steps(position: f32, steps_per_unit: f32) -> i32 {
    (position * steps_per_unit).round_ties_even() as i32
}

/// Convert a step count to a position.
#[allow(clippy::cast_precision_loss)]
pub fn from_steps(steps: i32, steps_per_unit: f32) -> f32 {
    steps as f32 / steps_per_unit
}

/// Check that slices covering `needed` axes were supplied.
pub fn check_len(needed: usize, got: usize) -> Result<(), SolveError> {
    if got < needed {
        return Err(SolveError::DimensionMismatch { expected: needed, got });
    }
    Ok(())
}

/// Mix per-axis motor positions into belt step counts.
///
/// `motor` holds the chain axes in machine order; `steps_per_unit` must cover
/// at least as many axes.
pub fn mix_to_steps(
    motor: &[f32; CHAIN_AXES],
    steps_per_unit: &[f32],
) -> Result<[i32; CHAIN_AXES], SolveError> {
    check_len(CHAIN_AXES, steps_per_unit.len())?;
    let core_a = motor[0] + motor[1];
    let core_b = motor[0] - motor[1];
    Ok([
        to_steps(core_a, steps_per_unit[0]),
        to_steps(core_b, steps_per_unit[1]),
        to_steps(motor[2], steps_per_unit[2]),
        to_steps(motor[3], steps_per_unit[3]),
        to_steps(motor[4], steps_per_unit[4]),
    ])
}

/// Un-mix belt step counts into per-axis motor positions.
pub fn unmix_from_steps(
    steps: &[i32],
    steps_per_unit: &[f32],
) -> Result<[f32; CHAIN_AXES], SolveError> {
    check_len(CHAIN_AXES, steps.len())?;
    check_len(CHAIN_AXES, steps_per_unit.len())?;
    let a = from_steps(steps[0], steps_per_unit[0]);
    let b = from_steps(steps[1], steps_per_unit[1]);
    Ok([
        0.5 * (a + b),
        0.5 * (a - b),
        from_steps(steps[2], steps_per_unit[2]),
        from_steps(steps[3], steps_per_unit[3]),
        from_steps(steps[4], steps_per_unit[4]),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
