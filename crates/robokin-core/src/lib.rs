// robokin-core: Axis types, errors, config and timing for robokin kinematics.

pub mod config;
pub mod error;
pub mod time;
pub mod traits;
pub mod types;

pub use config::RobotConfig;
pub use error::{ConfigError, KinematicsError, SolveError};
pub use time::{MonotonicTicks, SolveTimer, TickSource};
pub use traits::{DriveCoordinates, MachineAxes};
pub use types::{
    AbSign, AxisKind, AxisLetter, CACHE_CAPACITY, EngineKind, MAX_AXES, MAX_SPECIAL_AXES,
    RADIANS_TO_DEGREES, SpecialMethod, Wiring,
};
