//! Kinematics facade for configurable CoreXY five-axis machines.
//!
//! Wraps the axis chain and conversion engines of `robokin-ik` behind the
//! interface a motion controller drives: machine coordinates to motor steps
//! and back, a letter-based configuration command, and the homing and
//! limiting policy queried by the planner.
//!
//! # Conversion Pipeline
//!
//! ```text
//! machine pos ──► CoreXY engine ──► per-axis motor pos ──► belt mixing ──► steps
//!                 (rotor | screw)                          (x+y, x−y)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use robokin_motion::prelude::*;
//!
//! let mut kin = RobotKinematics::new();
//! kin.configure(&KinematicsCommand::new().with_robot_type("CoreXY5BC"));
//! assert_eq!(kin.name(), "robot");
//! assert_eq!(kin.homing_file_name(AxesBitmap::X, AxesBitmap::empty()), "homeRobot.g");
//! ```

pub mod command;
pub mod hooks;
pub mod kinematics;
pub mod report;
pub mod steps;

pub use command::{ConfigureOutcome, KinematicsCommand};
pub use hooks::{AxesBitmap, HomingMode, LimitPositionResult, MotionPolicy};
pub use kinematics::RobotKinematics;
pub use report::configuration_report;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::command::{ConfigureOutcome, KinematicsCommand};
    pub use crate::hooks::{AxesBitmap, HomingMode, LimitPositionResult, MotionPolicy};
    pub use crate::kinematics::RobotKinematics;
    pub use crate::report::configuration_report;
    pub use robokin_core::{EngineKind, RobotConfig};
}
