//! CoreXY Cartesian/motor conversion.
//!
//! Two interchangeable implementations share [`CoreXyEngine`]:
//!
//! - [`ScrewEngine`] goes through the product-of-exponentials chain and the
//!   closed-form solver.
//! - [`RotorEngine`] rotates the point about the configured C and tilt screw
//!   lines with GA rotors.
//!
//! Values are in machine order `[x, y, z, a|b, c]`. Motor values are the
//! per-axis joint positions before CoreXY belt mixing. Rotary angles pass
//! through unchanged.

use robokin_core::{AxisKind, AxisLetter, EngineKind, SolveError, Wiring};

use crate::chain::AxisChain;
use crate::linalg::{Transform, Vec3};
use crate::rotor::{self, RotaryAxes};
use crate::solver::{self, JointVector};

/// Machine-order values: X, Y, Z, A or B, C.
pub type MachinePose = [f32; 5];

/// Axis letters in machine order for `wiring`.
#[must_use]
pub const fn machine_letters(wiring: Wiring) -> [AxisLetter; 5] {
    [AxisLetter::X, AxisLetter::Y, AxisLetter::Z, wiring.tilt_letter(), AxisLetter::C]
}

/// Cartesian/motor conversion for the CoreXY five-axis machine.
pub trait CoreXyEngine {
    /// Tool position and angles to motor positions.
    fn cartesian_to_motor(
        &self,
        chain: &AxisChain,
        cartesian: &MachinePose,
    ) -> Result<MachinePose, SolveError>;

    /// Motor positions to tool position and angles.
    fn motor_to_cartesian(
        &self,
        chain: &AxisChain,
        motor: &MachinePose,
    ) -> Result<MachinePose, SolveError>;
}

// ---------------------------------------------------------------------------
// Machine/chain ordering
// ---------------------------------------------------------------------------

fn slot_for(chain: &AxisChain, letter: AxisLetter) -> Result<usize, SolveError> {
    chain.slot_of(letter).ok_or(SolveError::MissingAxis(letter.as_char()))
}

/// Chain-order joints to machine order.
fn to_machine(chain: &AxisChain, joints: &[f32]) -> Result<MachinePose, SolveError> {
    let mut out = [0.0; 5];
    for (value, letter) in out.iter_mut().zip(machine_letters(chain.special().wiring)) {
        *value = joints[slot_for(chain, letter)?];
    }
    Ok(out)
}

/// Machine order to chain-order joints. Slots outside the machine axes sit
/// at their reference.
fn to_chain(chain: &AxisChain, machine: &MachinePose) -> Result<JointVector, SolveError> {
    let mut joints: JointVector = chain.records().iter().map(|r| r.reference).collect();
    for (value, letter) in machine.iter().zip(machine_letters(chain.special().wiring)) {
        joints[slot_for(chain, letter)?] = *value;
    }
    Ok(joints)
}

// ---------------------------------------------------------------------------
// ScrewEngine
// ---------------------------------------------------------------------------

/// Conversion through the screw chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrewEngine;

impl CoreXyEngine for ScrewEngine {
    fn cartesian_to_motor(
        &self,
        chain: &AxisChain,
        cartesian: &MachinePose,
    ) -> Result<MachinePose, SolveError> {
        let position = Vec3::new(cartesian[0], cartesian[1], cartesian[2]);
        let target = Transform::from_translation(position);
        let joints = solver::joints_for_orientation(chain, &target, cartesian[3], cartesian[4])?;
        to_machine(chain, &joints)
    }

    fn motor_to_cartesian(
        &self,
        chain: &AxisChain,
        motor: &MachinePose,
    ) -> Result<MachinePose, SolveError> {
        let joints = to_chain(chain, motor)?;
        let pose = chain.forward(&joints)?;
        Ok([pose.trans.x, pose.trans.y, pose.trans.z, motor[3], motor[4]])
    }
}

// ---------------------------------------------------------------------------
// RotorEngine
// ---------------------------------------------------------------------------

/// Conversion with GA rotors about the rotary pivots.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotorEngine;

/// Screw lines and effective angles of the rotary pair.
struct RotaryPair {
    axes: RotaryAxes,
    tilt: f32,
    c: f32,
}

impl RotaryPair {
    fn resolve(chain: &AxisChain, tilt: f32, c: f32) -> Result<Self, SolveError> {
        let tilt_letter = chain.special().wiring.tilt_letter();
        let tilt_record = chain
            .record_of(tilt_letter)
            .ok_or(SolveError::MissingAxis(tilt_letter.as_char()))?;
        let c_record = chain
            .record_of(AxisLetter::C)
            .ok_or(SolveError::MissingAxis('C'))?;
        Ok(Self {
            axes: RotaryAxes {
                tilt: tilt_record.screw,
                c: c_record.screw,
            },
            tilt: tilt - tilt_record.reference,
            c: c - c_record.reference,
        })
    }
}

impl CoreXyEngine for RotorEngine {
    fn cartesian_to_motor(
        &self,
        chain: &AxisChain,
        cartesian: &MachinePose,
    ) -> Result<MachinePose, SolveError> {
        solver::require_corexy(chain)?;
        let wiring = chain.special().wiring;
        let pair = RotaryPair::resolve(chain, cartesian[3], cartesian[4])?;
        let point = Vec3::new(cartesian[0], cartesian[1], cartesian[2]);
        let moved = rotor::cartesian_to_motor(point, pair.tilt, pair.c, &pair.axes);
        let moved = moved - chain.endpoint().trans;

        let mut out = [0.0, 0.0, 0.0, cartesian[3], cartesian[4]];
        for (value, letter) in out.iter_mut().zip(machine_letters(wiring)).take(3) {
            let record = chain
                .record_of(letter)
                .ok_or(SolveError::MissingAxis(letter.as_char()))?;
            if record.kind == AxisKind::Prismatic {
                *value = moved.dot(record.screw.omega) + record.reference;
            }
        }
        Ok(out)
    }

    fn motor_to_cartesian(
        &self,
        chain: &AxisChain,
        motor: &MachinePose,
    ) -> Result<MachinePose, SolveError> {
        solver::require_corexy(chain)?;
        let wiring = chain.special().wiring;
        let pair = RotaryPair::resolve(chain, motor[3], motor[4])?;

        let mut linear = chain.endpoint().trans;
        for (value, letter) in motor.iter().zip(machine_letters(wiring)).take(3) {
            let record = chain
                .record_of(letter)
                .ok_or(SolveError::MissingAxis(letter.as_char()))?;
            if record.kind == AxisKind::Prismatic {
                linear += record.screw.omega.scale(value - record.reference);
            }
        }
        let p = rotor::motor_to_cartesian(linear, pair.tilt, pair.c, &pair.axes);
        Ok([p.x, p.y, p.z, motor[3], motor[4]])
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

impl CoreXyEngine for EngineKind {
    fn cartesian_to_motor(
        &self,
        chain: &AxisChain,
        cartesian: &MachinePose,
    ) -> Result<MachinePose, SolveError> {
        match self {
            Self::Rotor => RotorEngine.cartesian_to_motor(chain, cartesian),
            Self::Screw => ScrewEngine.cartesian_to_motor(chain, cartesian),
        }
    }

    fn motor_to_cartesian(
        &self,
        chain: &AxisChain,
        motor: &MachinePose,
    ) -> Result<MachinePose, SolveError> {
        match self {
            Self::Rotor => RotorEngine.motor_to_cartesian(chain, motor),
            Self::Screw => ScrewEngine.motor_to_cartesian(chain, motor),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
