//! Preconfigured CoreXY five-axis machines.
//!
//! Both fixtures use canonical axis directions with offset pivots. Tests
//! that need flipped or oblique rotary axes override single screws.

use std::collections::BTreeMap;

use robokin_core::{AbSign, EngineKind, RobotConfig};

fn letter_map<const N: usize>(entries: [(&str, [f32; N]); 5]) -> BTreeMap<String, [f32; N]> {
    entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

/// `CoreXY5AC`: C table about z through (10, 5), A tilt about x at z = 50.
pub fn corexy5ac_config() -> RobotConfig {
    RobotConfig {
        robot_type: "CoreXY5AC".into(),
        ab_sign: AbSign::NonNegative,
        engine: EngineKind::Rotor,
        screws: letter_map([
            ("C", [0.0, 0.0, 1.0, 10.0, 5.0, 0.0]),
            ("A", [1.0, 0.0, 0.0, 0.0, 0.0, 50.0]),
            ("Z", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
            ("X", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ("Y", [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        ]),
        limits: letter_map([
            ("X", [-150.0, 150.0, 0.0]),
            ("Y", [-150.0, 150.0, 0.0]),
            ("Z", [0.0, 120.0, 120.0]),
            ("A", [-100.0, 100.0, 0.0]),
            ("C", [-360.0, 360.0, 0.0]),
        ]),
        ..RobotConfig::default()
    }
}

/// `CoreXY5BC`: C table about z through (−5, 8), B tilt about y at z = 40.
pub fn corexy5bc_config() -> RobotConfig {
    RobotConfig {
        robot_type: "CoreXY5BC".into(),
        ab_sign: AbSign::NonNegative,
        engine: EngineKind::Rotor,
        screws: letter_map([
            ("C", [0.0, 0.0, 1.0, -5.0, 8.0, 0.0]),
            ("B", [0.0, 1.0, 0.0, 0.0, 0.0, 40.0]),
            ("Z", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
            ("X", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ("Y", [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        ]),
        limits: letter_map([
            ("X", [-150.0, 150.0, 0.0]),
            ("Y", [-150.0, 150.0, 0.0]),
            ("Z", [0.0, 120.0, 120.0]),
            ("B", [-100.0, 100.0, 0.0]),
            ("C", [-360.0, 360.0, 0.0]),
        ]),
        ..RobotConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_validate() {
        assert!(corexy5ac_config().validate().is_ok());
        assert!(corexy5bc_config().validate().is_ok());
    }

    #[test]
    fn fixtures_cover_every_axis() {
        for cfg in [corexy5ac_config(), corexy5bc_config()] {
            assert_eq!(cfg.screw_entries().unwrap().len(), 5);
            assert_eq!(cfg.limit_entries().unwrap().len(), 5);
        }
    }

    #[test]
    fn fixtures_survive_toml() {
        let cfg = corexy5bc_config();
        let text = toml::to_string(&cfg).unwrap();
        assert_eq!(RobotConfig::from_toml_str(&text).unwrap(), cfg);
    }
}
