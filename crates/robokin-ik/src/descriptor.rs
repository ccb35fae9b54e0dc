//! Parsers for the compact configuration strings.
//!
//! Grammar: `marker=v1:v2:...` for numeric fields, a bare robot type name for
//! topology presets, and a chain descriptor such as `CAZ_corexy(XY)` whose
//! parenthesized group lists the axes of a coupled mechanism.
//!
//! Every parser here is pure: it either returns a fully parsed value or an
//! error, and never touches chain state.

use heapless::Vec as HVec;
use robokin_core::{
    AbSign, AxisKind, AxisLetter, ConfigError, MAX_AXES, MAX_SPECIAL_AXES, SpecialMethod, Wiring,
};

/// Separator between numeric values.
pub const SEPARATOR: char = ':';

/// Longest accepted chain descriptor.
pub const MAX_DESCRIPTOR_LEN: usize = 20;

pub type DescriptorText = heapless::String<MAX_DESCRIPTOR_LEN>;

// ---------------------------------------------------------------------------
// Numeric fields
// ---------------------------------------------------------------------------

/// Split `marker=body` at the first `=`.
pub fn split_marker(value: &str) -> Option<(&str, &str)> {
    value.split_once('=')
}

/// Number of separator-delimited values in `body`.
pub fn value_count(body: &str) -> usize {
    body.matches(SEPARATOR).count() + 1
}

fn parse_number(field: &str, raw: &str) -> Result<f32, ConfigError> {
    raw.trim().parse::<f32>().map_err(|_| ConfigError::InvalidNumber {
        field: field.into(),
        value: raw.into(),
    })
}

/// Parse exactly `N` values.
pub fn parse_fixed<const N: usize>(field: &str, body: &str) -> Result<[f32; N], ConfigError> {
    let got = value_count(body);
    if got != N {
        return Err(ConfigError::FieldCount {
            field: field.into(),
            expected: N,
            got,
        });
    }
    let mut out = [0.0; N];
    for (slot, raw) in out.iter_mut().zip(body.split(SEPARATOR)) {
        *slot = parse_number(field, raw)?;
    }
    Ok(out)
}

/// Parse up to [`MAX_AXES`] values.
pub fn parse_list(field: &str, body: &str) -> Result<HVec<f32, MAX_AXES>, ConfigError> {
    let got = value_count(body);
    if got > MAX_AXES {
        return Err(ConfigError::TooManyAxes { got, max: MAX_AXES });
    }
    let mut out = HVec::new();
    for raw in body.split(SEPARATOR) {
        // capacity checked above
        let _ = out.push(parse_number(field, raw)?);
    }
    Ok(out)
}

fn parse_letter(key: &str) -> Result<AxisLetter, ConfigError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => AxisLetter::from_char(c).ok_or(ConfigError::UnknownAxis(c)),
        _ => Err(ConfigError::InvalidValue {
            field: key.into(),
            message: "unknown marker".into(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Setting commands
// ---------------------------------------------------------------------------

/// Parsed `P` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSetting {
    AxisTypes(HVec<AxisKind, MAX_AXES>),
    AbSign(AbSign),
}

/// Parsed `C` command.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrewSetting {
    /// `Mnoap=` x-axis, y-axis, z-axis columns then the point.
    Endpoint([f32; 12]),
    /// `Mreference=` one value per axis.
    Reference(HVec<f32, MAX_AXES>),
    /// `<L>=ωx:ωy:ωz:qx:qy:qz`
    Axis(AxisLetter, [f32; 6]),
}

/// Parsed `A` command: `<L>=min:max:home`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitSetting {
    pub letter: AxisLetter,
    pub min: f32,
    pub max: f32,
    pub home: f32,
}

pub fn parse_axis_types(types: &str) -> Result<HVec<AxisKind, MAX_AXES>, ConfigError> {
    let got = types.chars().count();
    if got > MAX_AXES {
        return Err(ConfigError::TooManyAxes { got, max: MAX_AXES });
    }
    let mut out = HVec::new();
    for c in types.chars() {
        let kind = AxisKind::from_char(c).ok_or(ConfigError::InvalidAxisType(c))?;
        let _ = out.push(kind);
    }
    Ok(out)
}

pub fn parse_param(value: &str) -> Result<ParamSetting, ConfigError> {
    match split_marker(value) {
        Some(("axisTypes", body)) => parse_axis_types(body).map(ParamSetting::AxisTypes),
        Some(("abSign", body)) => body
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(AbSign::from_code)
            .map(ParamSetting::AbSign)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "abSign".into(),
                message: format!("{body:?} is not 0, 1 or 2"),
            }),
        _ => Err(ConfigError::InvalidValue {
            field: value.into(),
            message: "expected axisTypes= or abSign=".into(),
        }),
    }
}

pub fn parse_screw(value: &str) -> Result<ScrewSetting, ConfigError> {
    let Some((marker, body)) = split_marker(value) else {
        return Err(ConfigError::InvalidValue {
            field: value.into(),
            message: "missing '='".into(),
        });
    };
    match marker {
        "Mnoap" => parse_fixed::<12>(marker, body).map(ScrewSetting::Endpoint),
        "Mreference" => parse_list(marker, body).map(ScrewSetting::Reference),
        _ => {
            let letter = parse_letter(marker)?;
            parse_fixed::<6>(marker, body).map(|f| ScrewSetting::Axis(letter, f))
        }
    }
}

pub fn parse_limits(value: &str) -> Result<LimitSetting, ConfigError> {
    let Some((marker, body)) = split_marker(value) else {
        return Err(ConfigError::InvalidValue {
            field: value.into(),
            message: "missing '='".into(),
        });
    };
    let letter = parse_letter(marker)?;
    let [min, max, home] = parse_fixed::<3>(marker, body)?;
    Ok(LimitSetting { letter, min, max, home })
}

// ---------------------------------------------------------------------------
// Robot presets
// ---------------------------------------------------------------------------

/// Topology selected by a robot type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotPreset {
    pub axis_types: &'static str,
    pub chain: &'static str,
    pub wiring: Wiring,
}

const AC_NAMES: [&str; 3] = ["CoreXY5AC", "CAZ_corexy(YX)", "CAZ_corexy(XY)"];
const BC_NAMES: [&str; 3] = ["CoreXY5BC", "CBZ_corexy(YX)", "CBZ_corexy(XY)"];

/// Resolve a robot type name. Names match by prefix.
pub fn robot_preset(name: &str) -> Result<RobotPreset, ConfigError> {
    let name = name.trim();
    if AC_NAMES.iter().any(|n| name.starts_with(n)) {
        Ok(RobotPreset {
            axis_types: "RRPPP",
            chain: "CAZ_corexy(XY)",
            wiring: Wiring::Ac,
        })
    } else if BC_NAMES.iter().any(|n| name.starts_with(n)) {
        Ok(RobotPreset {
            axis_types: "RRPPP",
            chain: "CBZ_corexy(XY)",
            wiring: Wiring::Bc,
        })
    } else {
        Err(ConfigError::UnsupportedTopology(name.into()))
    }
}

// ---------------------------------------------------------------------------
// Chain descriptor
// ---------------------------------------------------------------------------

/// One slot of a compressed chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSlot {
    pub letter: AxisLetter,
    /// Slot belongs to the coupled mechanism group.
    pub special: bool,
}

/// Parsed chain descriptor such as `CAZ_corexy(XY)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainDescriptor {
    text: DescriptorText,
    slots: HVec<ChainSlot, MAX_AXES>,
    special: Option<SpecialMethod>,
}

impl ChainDescriptor {
    /// Parse a descriptor.
    ///
    /// The first marker found in [`SpecialMethod::ALL`] order claims the
    /// group up to the next `)`. Outside the group only axis letters are
    /// kept; `_` and any other character is skipped.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let stored = DescriptorText::try_from(text).map_err(|_| ConfigError::InvalidValue {
            field: "chain".into(),
            message: format!("longer than {MAX_DESCRIPTOR_LEN} characters"),
        })?;

        let found = SpecialMethod::ALL
            .iter()
            .find_map(|m| text.find(m.marker()).map(|pos| (*m, pos)));

        let mut slots = HVec::new();
        match found {
            Some((method, pos)) => {
                let group_start = pos + method.marker().len();
                let rest = &text[group_start..];
                let group_len = rest.find(')').unwrap_or(rest.len());
                let group = &rest[..group_len];
                let members = group.chars().count();
                if members > MAX_SPECIAL_AXES {
                    return Err(ConfigError::TooManyAxes {
                        got: members,
                        max: MAX_SPECIAL_AXES,
                    });
                }
                push_normal(&mut slots, &text[..pos])?;
                for c in group.chars() {
                    let letter = AxisLetter::from_char(c).ok_or(ConfigError::UnknownAxis(c))?;
                    push_slot(&mut slots, ChainSlot { letter, special: true })?;
                }
                let after = (group_start + group_len + 1).min(text.len());
                push_normal(&mut slots, &text[after..])?;
            }
            None => push_normal(&mut slots, text)?,
        }

        Ok(Self {
            text: stored,
            slots,
            special: found.map(|(m, _)| m),
        })
    }

    /// Copy of `self` carrying the text of `other`.
    #[must_use]
    pub fn with_text_of(&self, other: &Self) -> Self {
        Self {
            text: other.text.clone(),
            slots: self.slots.clone(),
            special: self.special,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slots(&self) -> &[ChainSlot] {
        &self.slots
    }

    pub const fn special(&self) -> Option<SpecialMethod> {
        self.special
    }

    /// Compressed chain with `.` in place of group letters, e.g. `CAZ..`.
    pub fn normal_letters(&self) -> DescriptorText {
        self.slots
            .iter()
            .map(|s| if s.special { '.' } else { s.letter.as_char() })
            .collect()
    }

    /// Letters of the coupled group in order, e.g. `XY`.
    pub fn special_letters(&self) -> DescriptorText {
        self.slots
            .iter()
            .filter(|s| s.special)
            .map(|s| s.letter.as_char())
            .collect()
    }
}

fn push_slot(slots: &mut HVec<ChainSlot, MAX_AXES>, slot: ChainSlot) -> Result<(), ConfigError> {
    slots.push(slot).map_err(|_| ConfigError::TooManyAxes {
        got: MAX_AXES + 1,
        max: MAX_AXES,
    })
}

fn push_normal(slots: &mut HVec<ChainSlot, MAX_AXES>, part: &str) -> Result<(), ConfigError> {
    for letter in part.chars().filter_map(AxisLetter::from_char) {
        push_slot(slots, ChainSlot { letter, special: false })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
