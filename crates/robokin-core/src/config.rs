use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{AbSign, AxisKind, AxisLetter, EngineKind, MAX_AXES};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

fn default_robot_type() -> String {
    "CoreXY5AC".into()
}
const fn default_steps_per_unit() -> [f32; 5] {
    [80.0, 80.0, 400.0, 100.0, 100.0]
}

// ---------------------------------------------------------------------------
// RobotConfig
// ---------------------------------------------------------------------------

/// File form of a robot kinematics configuration.
///
/// Every field maps onto one configuration command; applying a `RobotConfig`
/// is equivalent to issuing `B`, `A`, `P` and `C` in that order.
///
/// ```toml
/// robot_type = "CoreXY5AC"
/// ab_sign = "non_negative"
///
/// [screws]
/// C = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]
/// A = [1.0, 0.0, 0.0, 0.0, 0.0, 50.0]
///
/// [limits]
/// C = [-360.0, 360.0, 0.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Robot type name, e.g. `CoreXY5AC` or `CBZ_corexy(XY)`.
    #[serde(default = "default_robot_type")]
    pub robot_type: String,

    /// Optional override of the per-axis type string (`RRPPP`).
    #[serde(default)]
    pub axis_types: Option<String>,

    /// Optional chain descriptor override, e.g. `CAZ_corexy(XY)`.
    #[serde(default)]
    pub chain: Option<String>,

    /// Preferred sign of the A/B angle in inverse solutions.
    #[serde(default)]
    pub ab_sign: AbSign,

    /// Conversion engine for the CoreXY coupling.
    #[serde(default)]
    pub engine: EngineKind,

    /// Screw axis per letter: `[ωx, ωy, ωz, qx, qy, qz]`.
    #[serde(default)]
    pub screws: BTreeMap<String, [f32; 6]>,

    /// Limits per letter: `[min, max, home]`.
    #[serde(default)]
    pub limits: BTreeMap<String, [f32; 3]>,

    /// Endpoint frame: x-axis, y-axis, z-axis columns then the point.
    #[serde(default)]
    pub endpoint: Option<[f32; 12]>,

    /// Reference value per chain slot.
    #[serde(default)]
    pub reference: Option<Vec<f32>>,

    /// Motor steps per unit in machine order X, Y, Z, A/B, C.
    #[serde(default = "default_steps_per_unit")]
    pub steps_per_unit: [f32; 5],
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            robot_type: default_robot_type(),
            axis_types: None,
            chain: None,
            ab_sign: AbSign::default(),
            engine: EngineKind::default(),
            screws: BTreeMap::new(),
            limits: BTreeMap::new(),
            endpoint: None,
            reference: None,
            steps_per_unit: default_steps_per_unit(),
        }
    }
}

impl RobotConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.robot_type.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "robot_type".into(),
                message: "must not be empty".into(),
            });
        }
        if let Some(types) = &self.axis_types {
            let count = types.chars().count();
            if count > MAX_AXES {
                return Err(ConfigError::TooManyAxes {
                    got: count,
                    max: MAX_AXES,
                });
            }
            if let Some(bad) = types.chars().find(|c| AxisKind::from_char(*c).is_none()) {
                return Err(ConfigError::InvalidAxisType(bad));
            }
        }
        if self.chain.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "chain".into(),
                message: "must not be empty".into(),
            });
        }
        for key in self.screws.keys().chain(self.limits.keys()) {
            parse_letter_key(key)?;
        }
        for (key, limits) in &self.limits {
            if limits[0] > limits[1] {
                return Err(ConfigError::InvalidValue {
                    field: format!("limits.{key}"),
                    message: format!("min {} exceeds max {}", limits[0], limits[1]),
                });
            }
        }
        if let Some(reference) = &self.reference {
            if reference.len() > MAX_AXES {
                return Err(ConfigError::TooManyAxes {
                    got: reference.len(),
                    max: MAX_AXES,
                });
            }
        }
        if let Some(i) = self.steps_per_unit.iter().position(|s| *s <= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "steps_per_unit".into(),
                message: format!("entry {i} must be > 0"),
            });
        }
        Ok(())
    }

    /// Screw entries keyed by parsed axis letter.
    pub fn screw_entries(&self) -> Result<Vec<(AxisLetter, [f32; 6])>, ConfigError> {
        self.screws
            .iter()
            .map(|(k, v)| Ok((parse_letter_key(k)?, *v)))
            .collect()
    }

    /// Limit entries keyed by parsed axis letter.
    pub fn limit_entries(&self) -> Result<Vec<(AxisLetter, [f32; 3])>, ConfigError> {
        self.limits
            .iter()
            .map(|(k, v)| Ok((parse_letter_key(k)?, *v)))
            .collect()
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_letter_key(key: &str) -> Result<AxisLetter, ConfigError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => AxisLetter::from_char(c).ok_or(ConfigError::UnknownAxis(c)),
        _ => Err(ConfigError::InvalidValue {
            field: key.into(),
            message: "axis keys are single letters X, Y, Z, A, B or C".into(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
