use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of axes in a configured chain.
pub const MAX_AXES: usize = 6;

/// Maximum number of axes grouped inside one special (coupled) mechanism.
pub const MAX_SPECIAL_AXES: usize = 4;

/// Element budget of the screw parameter cache.
pub const CACHE_CAPACITY: usize = 200;

/// Conversion factor from radians to degrees (firmware constant).
pub const RADIANS_TO_DEGREES: f32 = 57.295_78;

// ---------------------------------------------------------------------------
// AxisLetter
// ---------------------------------------------------------------------------

/// Machine axis identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AxisLetter {
    X,
    Y,
    Z,
    A,
    B,
    C,
}

impl AxisLetter {
    /// All letters in lookup-table order.
    pub const ALL: [Self; 6] = [Self::X, Self::Y, Self::Z, Self::A, Self::B, Self::C];

    /// Parse an uppercase axis letter.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }

    /// Dense index in `0..6`, used by letter lookup tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AxisLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ---------------------------------------------------------------------------
// AxisKind
// ---------------------------------------------------------------------------

/// Joint type of a chain slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    /// Revolute joint; joint values are degrees.
    Rotary,
    /// Linear joint; joint values are length units.
    Prismatic,
}

impl AxisKind {
    /// Parse a one-character type tag (`R` or `P`).
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'R' => Some(Self::Rotary),
            'P' => Some(Self::Prismatic),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Rotary => 'R',
            Self::Prismatic => 'P',
        }
    }

    pub const fn is_rotary(self) -> bool {
        matches!(self, Self::Rotary)
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// Which rotary axis carries the tilt for a 5-axis CoreXY machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wiring {
    /// Tilt about X (A axis) on top of a C table.
    #[default]
    Ac,
    /// Tilt about Y (B axis) on top of a C table.
    Bc,
}

impl Wiring {
    /// Letter of the tilting axis.
    pub const fn tilt_letter(self) -> AxisLetter {
        match self {
            Self::Ac => AxisLetter::A,
            Self::Bc => AxisLetter::B,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Bc => "BC",
        }
    }
}

// ---------------------------------------------------------------------------
// AbSign
// ---------------------------------------------------------------------------

/// Preferred sign of the recovered A/B angle.
///
/// The two closed-form solutions differ by C ± 180° and a negated A/B; this
/// selects which one the solver reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbSign {
    /// Report the solution with A/B >= 0.
    #[default]
    NonNegative,
    /// Report the solution with A/B <= 0.
    NonPositive,
    /// Report whatever the closed form produces.
    DontCare,
}

impl AbSign {
    /// Firmware code: 0 = non-negative, 1 = non-positive, 2 = don't care.
    pub const fn code(self) -> u8 {
        match self {
            Self::NonNegative => 0,
            Self::NonPositive => 1,
            Self::DontCare => 2,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NonNegative),
            1 => Some(Self::NonPositive),
            2 => Some(Self::DontCare),
            _ => None,
        }
    }

    /// Whether `angle` (degrees) satisfies this preference.
    ///
    /// Both comparisons are inclusive, so an angle of exactly zero is accepted
    /// by every preference.
    pub fn accepts(self, angle: f32) -> bool {
        match self {
            Self::DontCare => true,
            Self::NonNegative => angle >= 0.0,
            Self::NonPositive => angle <= 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// SpecialMethod
// ---------------------------------------------------------------------------

/// Coupled mechanism embedded in a chain descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialMethod {
    CoreXy,
    CoreXz,
    FiveBarScara,
    RotaryDelta,
    Palletized,
    LinearDelta,
}

impl SpecialMethod {
    /// Marker search order used by the chain descriptor parser.
    pub const ALL: [Self; 6] = [
        Self::CoreXy,
        Self::CoreXz,
        Self::LinearDelta,
        Self::RotaryDelta,
        Self::FiveBarScara,
        Self::Palletized,
    ];

    /// Descriptor marker opening the mechanism's axis group.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::CoreXy => "corexy(",
            Self::CoreXz => "corexz(",
            Self::FiveBarScara => "5bar(",
            Self::RotaryDelta => "rotdelta(",
            Self::Palletized => "pall(",
            Self::LinearDelta => "lindelta(",
        }
    }

    /// Human-readable name used in configuration reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CoreXy => "CoreXY",
            Self::CoreXz => "CoreXZ",
            Self::FiveBarScara => "5BarParScara",
            Self::RotaryDelta => "RotaryDelta",
            Self::Palletized => "Palletized",
            Self::LinearDelta => "LinearDelta",
        }
    }

    /// Firmware kinematics number of the mechanism.
    pub const fn code(self) -> u8 {
        match self {
            Self::CoreXy => 1,
            Self::CoreXz => 2,
            Self::FiveBarScara => 9,
            Self::RotaryDelta => 10,
            Self::Palletized => 14,
            Self::LinearDelta => 15,
        }
    }

    /// Only CoreXY has conversion support.
    pub const fn is_implemented(self) -> bool {
        matches!(self, Self::CoreXy)
    }

    /// Whether the mechanism has several solution work modes.
    pub const fn has_workmodes(self) -> bool {
        matches!(self, Self::FiveBarScara)
    }
}

impl fmt::Display for SpecialMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// EngineKind
// ---------------------------------------------------------------------------

/// Formulation used for the CoreXY Cartesian/motor conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Geometric-algebra rotor sandwich products.
    #[default]
    Rotor,
    /// Screw exponentials and closed-form inverse.
    Screw,
}

impl EngineKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rotor => "rotor",
            Self::Screw => "screw",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
