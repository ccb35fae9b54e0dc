use thiserror::Error;

/// Top-level error type for robokin.
#[derive(Debug, Error)]
pub enum KinematicsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Solve error: {0}")]
    Solve(#[from] SolveError),
}

/// Configuration errors.
///
/// Returned by the descriptor parsers and the config file loader. A parser
/// that returns one of these has not written anything.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported robot topology: {0}")]
    UnsupportedTopology(String),

    #[error("Wrong number of values for {field}: expected {expected}, got {got}")]
    FieldCount {
        field: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid number in {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Axis {0} is not part of the configured chain")]
    UnknownAxis(char),

    #[error("Invalid axis type {0:?} (expected R or P)")]
    InvalidAxisType(char),

    #[error("Too many axes: {got} (maximum {max})")]
    TooManyAxes { got: usize, max: usize },

    #[error("Screw cache exhausted: {used} elements needed, capacity {capacity}")]
    CapacityExceeded { used: usize, capacity: usize },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Conversion-time errors.
///
/// Copy + static messages for cheap propagation in hot paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("No solver for the configured kinematics method")]
    UnsupportedMethod,

    #[error("Required axis {0} is missing from the chain")]
    MissingAxis(char),

    #[error("Kinematics are not configured")]
    NotConfigured,

    #[error("Joint count mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
