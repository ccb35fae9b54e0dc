//! Motion-policy hooks the motion planner queries between conversions.
//!
//! Reachability and limiting are permissive: every position is reachable and
//! none is adjusted. Homing is done one motor at a time from a single macro
//! file, and the switch handler commits the configured home value of the
//! axis as its step position.

use bitflags::bitflags;
use robokin_core::{DriveCoordinates, MachineAxes, SolveError, TickSource};
use tracing::debug;

use crate::kinematics::RobotKinematics;
use crate::steps;

/// Homing macro run for every homing request.
pub const HOME_ROBOT_FILE: &str = "homeRobot.g";

bitflags! {
    /// Set of machine axes, one bit per axis index.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AxesBitmap: u16 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
        const A = 1 << 3;
        const B = 1 << 4;
        const C = 1 << 5;
        const XY = Self::X.bits() | Self::Y.bits();
    }
}

impl AxesBitmap {
    /// Bitmap holding machine axis `axis` alone. Out-of-range axes are empty.
    pub const fn from_axis(axis: usize) -> Self {
        if axis < u16::BITS as usize {
            Self::from_bits_retain(1 << axis)
        } else {
            Self::empty()
        }
    }
}

/// Outcome of [`MotionPolicy::limit_position`]. Positions are never
/// clamped, so the target always passes unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitPositionResult {
    Ok,
}

/// How the homing macro drives the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomingMode {
    /// Each motor homes against its own switch.
    #[default]
    IndividualMotors,
}

// ---------------------------------------------------------------------------
// MotionPolicy
// ---------------------------------------------------------------------------

/// Planner-facing policy of a kinematics implementation.
pub trait MotionPolicy {
    /// Whether `position` (machine coordinates) can be reached.
    fn is_reachable(&self, position: &[f32]) -> bool;

    /// Clamp `target` to the machine envelope.
    fn limit_position(
        &self,
        target: &mut [f32],
        initial: Option<&[f32]>,
        applied_axes: AxesBitmap,
        coordinated: bool,
    ) -> LimitPositionResult;

    /// Position assumed for unhomed axes at start-up. Left as given.
    fn assumed_initial_position(&self, position: &mut [f32]);

    /// Axes that count as homed after a position override.
    fn axes_assumed_homed(&self, overridden: AxesBitmap) -> AxesBitmap;

    /// Axes that must be homed before `moving` may move.
    fn must_be_homed_axes(&self, moving: AxesBitmap, allow_unhomed: bool) -> AxesBitmap;

    fn homing_mode(&self) -> HomingMode;

    /// Macro file to run for homing `to_home`.
    fn homing_file_name(&self, to_home: AxesBitmap, already_homed: AxesBitmap) -> &'static str;

    /// Whether a homing move on `axis` should stop early.
    fn query_terminate_homing_move(&self, axis: usize) -> bool;

    /// Commit the home position of `axis` after its switch triggered.
    ///
    /// Returns the step position written to `drives`.
    fn on_homing_switch_triggered(
        &self,
        axis: usize,
        high_end: bool,
        steps_per_unit: &[f32],
        machine: &impl MachineAxes,
        drives: &mut impl DriveCoordinates,
    ) -> Result<i32, SolveError>;

    fn is_continuous_rotation_axis(&self, axis: usize) -> bool;

    /// Axes whose motion is linear in Cartesian space.
    fn linear_axes(&self) -> AxesBitmap;

    /// Axes that move together with `axis`.
    fn connected_axes(&self, axis: usize) -> AxesBitmap;

    /// Reduce speed and acceleration for a move along `direction`.
    fn limit_speed_and_acceleration(
        &self,
        direction: &[f32],
        max_speed: &mut f32,
        max_acceleration: &mut f32,
    );
}

impl<T: TickSource> MotionPolicy for RobotKinematics<T> {
    fn is_reachable(&self, _position: &[f32]) -> bool {
        true
    }

    fn limit_position(
        &self,
        _target: &mut [f32],
        _initial: Option<&[f32]>,
        _applied_axes: AxesBitmap,
        _coordinated: bool,
    ) -> LimitPositionResult {
        LimitPositionResult::Ok
    }

    fn assumed_initial_position(&self, _position: &mut [f32]) {}

    fn axes_assumed_homed(&self, overridden: AxesBitmap) -> AxesBitmap {
        overridden
    }

    fn must_be_homed_axes(&self, moving: AxesBitmap, _allow_unhomed: bool) -> AxesBitmap {
        moving
    }

    fn homing_mode(&self) -> HomingMode {
        HomingMode::IndividualMotors
    }

    fn homing_file_name(&self, _to_home: AxesBitmap, _already_homed: AxesBitmap) -> &'static str {
        HOME_ROBOT_FILE
    }

    fn query_terminate_homing_move(&self, _axis: usize) -> bool {
        false
    }

    fn on_homing_switch_triggered(
        &self,
        axis: usize,
        high_end: bool,
        steps_per_unit: &[f32],
        machine: &impl MachineAxes,
        drives: &mut impl DriveCoordinates,
    ) -> Result<i32, SolveError> {
        let scale = *steps_per_unit.get(axis).ok_or(SolveError::DimensionMismatch {
            expected: axis + 1,
            got: steps_per_unit.len(),
        })?;
        let letter = machine.axis_letter(axis);
        let home = match letter.and_then(|l| self.chain().record_of(l)) {
            Some(record) => record.limits.home,
            None if high_end => machine.axis_maximum(axis),
            None => machine.axis_minimum(axis),
        };
        let position = steps::to_steps(home, scale);
        drives.set_drive_coordinate(position, axis);
        debug!(axis, letter = ?letter, home, steps = position, "homing switch triggered");
        Ok(position)
    }

    fn is_continuous_rotation_axis(&self, _axis: usize) -> bool {
        false
    }

    fn linear_axes(&self) -> AxesBitmap {
        AxesBitmap::Z
    }

    fn connected_axes(&self, axis: usize) -> AxesBitmap {
        match axis {
            0 | 1 => AxesBitmap::XY,
            _ => AxesBitmap::from_axis(axis),
        }
    }

    fn limit_speed_and_acceleration(
        &self,
        _direction: &[f32],
        _max_speed: &mut f32,
        _max_acceleration: &mut f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
