//! The robot kinematics facade.
//!
//! [`RobotKinematics`] owns the configured [`AxisChain`], the selected CoreXY
//! engine and the conversion timer. Conversions take `&self`; only the
//! configuration entry points take `&mut self`.

use robokin_core::{
    AxisLetter, ConfigError, EngineKind, MonotonicTicks, RobotConfig, SolveError, SolveTimer,
    TickSource,
};
use robokin_ik::{AxisChain, CoreXyEngine, IkResult, MachinePose, Transform, solver};
use tracing::{info, warn};

use crate::steps::{self, CHAIN_AXES};

/// Name reported in status output.
pub const KINEMATICS_NAME: &str = "robot";

// ---------------------------------------------------------------------------
// RobotKinematics
// ---------------------------------------------------------------------------

/// Configurable CoreXY five-axis kinematics.
///
/// # Example
///
/// ```
/// use robokin_core::RobotConfig;
/// use robokin_motion::RobotKinematics;
///
/// let kin = RobotKinematics::from_config(&RobotConfig::default()).unwrap();
/// let mut steps = [0; 5];
/// kin.cartesian_to_motor_steps(&[0.0; 5], &[80.0, 80.0, 400.0, 100.0, 100.0], &mut steps)
///     .unwrap();
/// assert_eq!(steps, [0; 5]);
/// ```
#[derive(Debug)]
pub struct RobotKinematics<T: TickSource = MonotonicTicks> {
    pub(crate) chain: AxisChain,
    engine: EngineKind,
    timer: SolveTimer,
    clock: T,
}

impl RobotKinematics {
    /// Unconfigured kinematics timed with the monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(MonotonicTicks::new())
    }

    /// Kinematics built from a file configuration.
    pub fn from_config(config: &RobotConfig) -> Result<Self, ConfigError> {
        let mut kin = Self::new();
        kin.apply_config(config)?;
        Ok(kin)
    }
}

impl Default for RobotKinematics {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TickSource> RobotKinematics<T> {
    /// Unconfigured kinematics timed with `clock`.
    pub fn with_clock(clock: T) -> Self {
        Self {
            chain: AxisChain::new(),
            engine: EngineKind::default(),
            timer: SolveTimer::new(),
            clock,
        }
    }

    /// Replace the whole configuration.
    ///
    /// The new chain is built aside and only swapped in when every field
    /// applied cleanly, so a failing file leaves the previous state live.
    pub fn apply_config(&mut self, config: &RobotConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let mut chain = AxisChain::new();
        chain.apply_config(config)?;
        self.chain = chain;
        self.engine = config.engine;
        info!(
            robot = %config.robot_type,
            engine = config.engine.name(),
            axes = self.chain.num_axes(),
            "kinematics configured"
        );
        let unset: String = self.chain.unset_screws().map(AxisLetter::as_char).collect();
        if !unset.is_empty() {
            warn!(axes = %unset, "no screw configured; these axes will not move");
        }
        Ok(())
    }

    // -- Accessors --

    pub const fn name(&self) -> &'static str {
        KINEMATICS_NAME
    }

    pub const fn chain(&self) -> &AxisChain {
        &self.chain
    }

    pub const fn engine(&self) -> EngineKind {
        self.engine
    }

    pub fn set_engine(&mut self, engine: EngineKind) {
        self.engine = engine;
    }

    /// Timing of motor-to-Cartesian conversions.
    pub const fn timer(&self) -> &SolveTimer {
        &self.timer
    }

    // -- Kinematics --

    /// Tool pose for chain-order joint values.
    pub fn forward(&self, joints: &[f32]) -> Result<Transform, SolveError> {
        self.chain.forward(joints)
    }

    /// Closed-form joints for a tool pose. `preferred_c` is used when the
    /// tool axis is vertical.
    pub fn inverse(&self, target: &Transform, preferred_c: f32) -> Result<IkResult, SolveError> {
        solver::inverse(&self.chain, target, preferred_c)
    }

    /// Machine coordinates to motor step positions.
    ///
    /// The first five entries go through the CoreXY engine and belt mixing.
    /// Any further axis is scaled directly. `machine_pos` and
    /// `steps_per_unit` must cover every entry of `motor_pos`.
    pub fn cartesian_to_motor_steps(
        &self,
        machine_pos: &[f32],
        steps_per_unit: &[f32],
        motor_pos: &mut [i32],
    ) -> Result<(), SolveError> {
        let total = motor_pos.len();
        steps::check_len(CHAIN_AXES, total)?;
        steps::check_len(total, machine_pos.len())?;
        steps::check_len(total, steps_per_unit.len())?;

        let motor = self.engine.cartesian_to_motor(&self.chain, &leading(machine_pos))?;
        let mixed = steps::mix_to_steps(&motor, steps_per_unit)?;
        motor_pos[..CHAIN_AXES].copy_from_slice(&mixed);
        for axis in CHAIN_AXES..total {
            motor_pos[axis] = steps::to_steps(machine_pos[axis], steps_per_unit[axis]);
        }
        Ok(())
    }

    /// Motor step positions to machine coordinates.
    ///
    /// Each call is timed into [`timer`](Self::timer).
    pub fn motor_steps_to_cartesian(
        &self,
        motor_pos: &[i32],
        steps_per_unit: &[f32],
        machine_pos: &mut [f32],
    ) -> Result<(), SolveError> {
        self.timer.measure(&self.clock, || {
            let total = machine_pos.len();
            steps::check_len(CHAIN_AXES, total)?;
            steps::check_len(total, motor_pos.len())?;
            steps::check_len(total, steps_per_unit.len())?;

            let motor = steps::unmix_from_steps(motor_pos, steps_per_unit)?;
            let cartesian = self.engine.motor_to_cartesian(&self.chain, &motor)?;
            machine_pos[..CHAIN_AXES].copy_from_slice(&cartesian);
            for axis in CHAIN_AXES..total {
                machine_pos[axis] = steps::from_steps(motor_pos[axis], steps_per_unit[axis]);
            }
            Ok(())
        })
    }
}

fn leading(values: &[f32]) -> MachinePose {
    let mut out = [0.0; CHAIN_AXES];
    out.copy_from_slice(&values[..CHAIN_AXES]);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
