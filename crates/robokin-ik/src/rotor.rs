//! Geometric-algebra rotors for the CoreXY tilt/rotate coupling.
//!
//! A rotor is stored as the four coefficients `(scalar, e12, e13, e23)`. For a
//! rotation by `φ` about unit axis `n` these are
//! `(cos φ/2, −sin φ/2·nz, sin φ/2·ny, −sin φ/2·nx)`, and a point is rotated by
//! the sandwich product `R p R̃`.
//!
//! The CoreXY machine rotates the work about two pivot lines: the C table
//! and the tilt axis (A for AC, B for BC). Each line is the configured screw
//! of that axis, normally z for C and x or y for the tilt. Converting a tool
//! point to motor coordinates undoes C first and then the tilt.

use crate::linalg::Vec3;
use crate::screw::ScrewAxis;

// ---------------------------------------------------------------------------
// Rotor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotor(pub [f32; 4]);

impl Rotor {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0]);

    /// Rotation by `angle` radians about the unit vector `axis`.
    ///
    /// A zero axis gives the identity, as an unset screw does in the chain.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn about_axis(axis: Vec3, angle: f32) -> Self {
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = (angle * 0.5).sin_cos();
        Self([c, -s * axis.z, s * axis.y, -s * axis.x])
    }

    /// Opposite rotation.
    #[must_use]
    pub const fn reverse(&self) -> Self {
        let r = self.0;
        Self([r[0], -r[1], -r[2], -r[3]])
    }

    /// Sandwich product `R p R̃` about the origin.
    #[must_use]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let r = self.0;
        // R * p
        let t0 = r[0] * p.x + r[1] * p.y + r[2] * p.z;
        let t1 = r[0] * p.y - r[1] * p.x + r[3] * p.z;
        let t2 = r[0] * p.z - r[2] * p.x - r[3] * p.y;
        let t3 = r[1] * p.z - r[2] * p.y + r[3] * p.x;
        // * ~R
        Vec3::new(
            t0 * r[0] + t1 * r[1] + t2 * r[2] + t3 * r[3],
            -t0 * r[1] + t1 * r[0] + t2 * r[3] - t3 * r[2],
            -t0 * r[2] - t1 * r[3] + t2 * r[0] + t3 * r[1],
        )
    }

    /// Rotate `p` about the line through `pivot`.
    #[must_use]
    pub fn apply_about(&self, pivot: Vec3, p: Vec3) -> Vec3 {
        self.apply(p - pivot) + pivot
    }
}

impl Default for Rotor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// CoreXY coupling
// ---------------------------------------------------------------------------

/// Screw lines of the two rotary axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotaryAxes {
    /// A (AC) or B (BC) axis.
    pub tilt: ScrewAxis,
    /// C axis.
    pub c: ScrewAxis,
}

/// Tool point to motor point. Angles are degrees.
///
/// Applies the negative-angle C rotation about its line, then the
/// negative-angle tilt rotation about its line.
#[must_use]
pub fn cartesian_to_motor(point: Vec3, tilt_deg: f32, c_deg: f32, axes: &RotaryAxes) -> Vec3 {
    let (c, tilt) = (&axes.c, &axes.tilt);
    let rotor_c = Rotor::about_axis(c.omega, -c_deg.to_radians());
    let p = rotor_c.apply(point - c.point) + (c.point - tilt.point);
    let rotor_tilt = Rotor::about_axis(tilt.omega, -tilt_deg.to_radians());
    rotor_tilt.apply(p) + tilt.point
}

/// Motor point to tool point. Angles are degrees.
///
/// Exact inverse of [`cartesian_to_motor`]: tilt first, then C, with positive
/// angles and the pivots visited in reverse order.
#[must_use]
pub fn motor_to_cartesian(motor: Vec3, tilt_deg: f32, c_deg: f32, axes: &RotaryAxes) -> Vec3 {
    let (c, tilt) = (&axes.c, &axes.tilt);
    let rotor_tilt = Rotor::about_axis(tilt.omega, tilt_deg.to_radians());
    let p = rotor_tilt.apply(motor - tilt.point) + (tilt.point - c.point);
    let rotor_c = Rotor::about_axis(c.omega, c_deg.to_radians());
    rotor_c.apply(p) + c.point
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
