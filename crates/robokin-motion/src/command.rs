//! The configuration command surface.
//!
//! A [`KinematicsCommand`] carries any subset of the configuration letters.
//! [`RobotKinematics::configure`] applies them in the order `B`, `A`, `P`,
//! `C`, then handles `R` and `D`. A command with no letter at all asks for
//! the full configuration report.
//!
//! Malformed fields are recovered locally: the field is logged, reported in
//! the outcome and skipped, and the rest of the command still applies.

use robokin_core::{ConfigError, TickSource};
use robokin_ik::descriptor;
use tracing::{error, info, warn};

use crate::kinematics::RobotKinematics;
use crate::report::configuration_report;

// ---------------------------------------------------------------------------
// KinematicsCommand
// ---------------------------------------------------------------------------

/// One configuration command.
///
/// # Example
///
/// ```
/// use robokin_motion::{KinematicsCommand, RobotKinematics};
///
/// let mut kin = RobotKinematics::new();
/// let outcome = kin.configure(
///     &KinematicsCommand::new()
///         .with_robot_type("CoreXY5AC")
///         .with_screw("A=1:0:0:0:0:50"),
/// );
/// assert!(outcome.unhome);
/// assert!(outcome.errors.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KinematicsCommand {
    /// `B`: robot type name.
    pub robot_type: Option<String>,
    /// `A`: `<L>=min:max:home`.
    pub limits: Option<String>,
    /// `P`: `axisTypes=...` or `abSign=...`.
    pub param: Option<String>,
    /// `C`: `<L>=ωx:ωy:ωz:qx:qy:qz`, `Mnoap=...` or `Mreference=...`.
    pub screw: Option<String>,
    /// `R`: print and reset the conversion timing.
    pub timing_report: bool,
    /// `D`: keep the homed state.
    pub keep_homed: bool,
}

impl KinematicsCommand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_robot_type(mut self, value: impl Into<String>) -> Self {
        self.robot_type = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_limits(mut self, value: impl Into<String>) -> Self {
        self.limits = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, value: impl Into<String>) -> Self {
        self.param = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_screw(mut self, value: impl Into<String>) -> Self {
        self.screw = Some(value.into());
        self
    }

    #[must_use]
    pub const fn with_timing_report(mut self) -> Self {
        self.timing_report = true;
        self
    }

    #[must_use]
    pub const fn with_keep_homed(mut self) -> Self {
        self.keep_homed = true;
        self
    }

    /// Whether any letter is present.
    pub const fn has_letters(&self) -> bool {
        self.robot_type.is_some()
            || self.limits.is_some()
            || self.param.is_some()
            || self.screw.is_some()
            || self.timing_report
            || self.keep_homed
    }
}

/// Result of [`RobotKinematics::configure`].
#[derive(Debug, Default)]
pub struct ConfigureOutcome {
    /// Axes must be homed again before moving.
    pub unhome: bool,
    /// Console text: the timing line or the configuration report.
    pub report: Option<String>,
    /// Fields that were rejected and skipped.
    pub errors: Vec<ConfigError>,
}

/// Format the timing line for an average in microseconds.
pub fn timing_line(average_micros: Option<f32>) -> String {
    format!(
        "avg Time inverse kin: {:.2} microseconds",
        average_micros.unwrap_or(0.0)
    )
}

// ---------------------------------------------------------------------------
// Configure
// ---------------------------------------------------------------------------

impl<T: TickSource> RobotKinematics<T> {
    /// Apply a configuration command.
    pub fn configure(&mut self, command: &KinematicsCommand) -> ConfigureOutcome {
        let mut outcome = ConfigureOutcome::default();

        if let Some(name) = &command.robot_type {
            let result = self.chain.set_robot_type(name);
            outcome.record('B', name, result);
        }
        if let Some(value) = &command.limits {
            let result = descriptor::parse_limits(value).and_then(|s| self.chain.apply_limits(&s));
            outcome.record('A', value, result);
        }
        if let Some(value) = &command.param {
            let result = descriptor::parse_param(value).and_then(|s| self.chain.apply_param(&s));
            outcome.record('P', value, result);
        }
        if let Some(value) = &command.screw {
            let result = descriptor::parse_screw(value).and_then(|s| self.chain.apply_screw(&s));
            outcome.record('C', value, result);
        }

        if command.timing_report {
            let line = timing_line(self.timer().take_average_micros());
            info!("{line}");
            outcome.report = Some(line);
        }
        if command.keep_homed {
            outcome.unhome = false;
        }
        if !command.has_letters() {
            outcome.report = Some(configuration_report(&self.chain));
        }
        outcome
    }
}

impl ConfigureOutcome {
    /// Note that `letter` was seen and keep its error, if any.
    fn record(&mut self, letter: char, value: &str, result: Result<(), ConfigError>) {
        self.unhome = true;
        match result {
            Ok(()) => info!(%letter, value, "kinematics setting applied"),
            Err(err @ ConfigError::UnsupportedTopology(_)) => {
                error!(%letter, value, %err, "unsupported robot type");
                self.errors.push(err);
            }
            Err(err) => {
                warn!(%letter, value, %err, "kinematics setting rejected; keeping previous values");
                self.errors.push(err);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use robokin_core::{AbSign, AxisKind, AxisLetter};
    use robokin_test_utils::SteppingTicks;

    fn corexy5ac() -> RobotKinematics {
        let mut kin = RobotKinematics::new();
        let outcome = kin.configure(&KinematicsCommand::new().with_robot_type("CoreXY5AC"));
        assert!(outcome.errors.is_empty());
        kin
    }

    #[test]
    fn builder_sets_letters() {
        let cmd = KinematicsCommand::new()
            .with_limits("C=-360:360:0")
            .with_timing_report()
            .with_keep_homed();
        assert_eq!(cmd.limits.as_deref(), Some("C=-360:360:0"));
        assert!(cmd.timing_report && cmd.keep_homed);
        assert!(cmd.has_letters());
        assert!(!KinematicsCommand::new().has_letters());
    }

    #[test]
    fn robot_type_configures_chain_and_unhomes() {
        let mut kin = RobotKinematics::new();
        let outcome = kin.configure(&KinematicsCommand::new().with_robot_type("CoreXY5BC"));
        assert!(outcome.unhome);
        assert!(outcome.report.is_none());
        assert_eq!(kin.chain().num_axes(), 5);
        assert_eq!(kin.chain().descriptor().text(), "CBZ_corexy(XY)");
    }

    #[test]
    fn letters_apply_in_order() {
        let mut kin = RobotKinematics::new();
        // Limits and screw need the axes created by B in the same command.
        let outcome = kin.configure(
            &KinematicsCommand::new()
                .with_robot_type("CoreXY5AC")
                .with_limits("A=-90:90:5")
                .with_param("abSign=1")
                .with_screw("A=1:0:0:0:0:50"),
        );
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        let a = kin.chain().record_of(AxisLetter::A).unwrap();
        assert_relative_eq!(a.limits.home, 5.0);
        assert_relative_eq!(a.screw.point.z, 50.0);
        assert_eq!(kin.chain().special().ab_sign, AbSign::NonPositive);
    }

    #[test]
    fn malformed_field_is_skipped() {
        let mut kin = corexy5ac();
        kin.configure(&KinematicsCommand::new().with_screw("A=1:0:0:0:0:50"));
        let outcome = kin.configure(
            &KinematicsCommand::new()
                .with_screw("A=0:1:0:0:0")
                .with_limits("A=-45:45:0"),
        );
        assert!(outcome.unhome);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            ConfigError::FieldCount { expected: 6, got: 5, .. }
        ));
        let a = kin.chain().record_of(AxisLetter::A).unwrap();
        assert_relative_eq!(a.screw.omega.x, 1.0);
        assert_relative_eq!(a.limits.max, 45.0);
    }

    #[test]
    fn unknown_robot_type_keeps_state() {
        let mut kin = corexy5ac();
        let outcome = kin.configure(&KinematicsCommand::new().with_robot_type("Scara9"));
        assert!(matches!(
            outcome.errors.as_slice(),
            [ConfigError::UnsupportedTopology(name)] if name == "Scara9"
        ));
        assert_eq!(kin.chain().descriptor().text(), "CAZ_corexy(XY)");
    }

    #[test]
    fn axis_types_change_axis_count() {
        let mut kin = corexy5ac();
        kin.configure(&KinematicsCommand::new().with_param("axisTypes=RPPP"));
        assert_eq!(kin.chain().num_axes(), 4);
        assert_eq!(kin.chain().records()[1].kind, AxisKind::Prismatic);
    }

    #[test]
    fn keep_homed_suppresses_unhome() {
        let mut kin = corexy5ac();
        let outcome = kin.configure(
            &KinematicsCommand::new()
                .with_limits("C=-180:180:0")
                .with_keep_homed(),
        );
        assert!(!outcome.unhome);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn empty_command_reports_configuration() {
        let mut kin = corexy5ac();
        let outcome = kin.configure(&KinematicsCommand::new());
        assert!(!outcome.unhome);
        let report = outcome.report.unwrap();
        assert!(report.starts_with("=== robot kinematics configuration ===\n"));
        assert!(report.contains("cache used: 74 maximum: 200"));
    }

    #[test]
    fn timing_report_prints_and_resets() {
        let mut kin = RobotKinematics::with_clock(SteppingTicks::new(0, 3));
        kin.configure(&KinematicsCommand::new().with_robot_type("CoreXY5AC"));
        let mut out = [0.0; 5];
        kin.motor_steps_to_cartesian(&[0; 5], &[80.0; 5], &mut out)
            .unwrap();

        let outcome = kin.configure(&KinematicsCommand::new().with_timing_report());
        assert!(!outcome.unhome);
        assert_eq!(
            outcome.report.as_deref(),
            Some("avg Time inverse kin: 3.00 microseconds")
        );
        assert_eq!(kin.timer().samples(), 0);

        let outcome = kin.configure(&KinematicsCommand::new().with_timing_report());
        assert_eq!(
            outcome.report.as_deref(),
            Some("avg Time inverse kin: 0.00 microseconds")
        );
    }
}
