//! Screw-axis exponentials via the Rodrigues formula.
//!
//! A rotary screw `(ω, q)` rotates about the line through `q` with unit
//! direction `ω`. Its exponential at angle `θ` is
//!
//! ```text
//! R = I + sinθ ω̂ + (1 − cosθ) ω̂²
//! t = (Iθ + (1 − cosθ) ω̂ + (θ − sinθ) ω̂²) v,   v = −ω × q
//! ```
//!
//! The `θ`-independent parts (`ω̂²`, `v`) are computed once per axis at
//! configuration time and kept in [`RotaryTerms`].

use robokin_core::AxisKind;

use crate::linalg::{Mat3, Transform, Vec3};

/// Orientation and a point on the axis line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrewAxis {
    pub omega: Vec3,
    pub point: Vec3,
}

impl ScrewAxis {
    #[must_use]
    pub const fn new(omega: Vec3, point: Vec3) -> Self {
        Self { omega, point }
    }

    /// Build from `[ωx, ωy, ωz, qx, qy, qz]`, normalizing `ω`.
    #[must_use]
    pub fn from_fields(f: [f32; 6]) -> Self {
        Self::new(
            Vec3::new(f[0], f[1], f[2]).normalized_or_keep(),
            Vec3::new(f[3], f[4], f[5]),
        )
    }

    /// Exponential without cached terms.
    ///
    /// `value` is radians for rotary axes and length for prismatic axes.
    #[must_use]
    pub fn exp(&self, kind: AxisKind, value: f32) -> Transform {
        match kind {
            AxisKind::Rotary => rotary_transform(self, &RotaryTerms::from_axis(self), value),
            AxisKind::Prismatic => prismatic_transform(self.omega, value),
        }
    }
}

/// Precomputed `θ`-independent Rodrigues terms of a rotary axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotaryTerms {
    /// `ω̂²`
    pub omega_sq: Mat3,
    /// `−ω × q`
    pub v: Vec3,
}

impl RotaryTerms {
    #[must_use]
    pub fn from_axis(axis: &ScrewAxis) -> Self {
        let w = Mat3::skew(axis.omega);
        Self {
            omega_sq: w * w,
            v: -axis.omega.cross(axis.point),
        }
    }
}

/// Rotary exponential at `theta` radians. `theta == 0` gives the identity.
#[must_use]
pub fn rotary_transform(axis: &ScrewAxis, terms: &RotaryTerms, theta: f32) -> Transform {
    if theta == 0.0 {
        return Transform::IDENTITY;
    }
    let (sin, cos) = theta.sin_cos();
    let one_min_cos = 1.0 - cos;
    let theta_min_sin = theta - sin;
    let w = Mat3::skew(axis.omega);

    let rot = Mat3::IDENTITY + w.scale(sin) + terms.omega_sq.scale(one_min_cos);
    let g = Mat3::IDENTITY.scale(theta)
        + w.scale(one_min_cos)
        + terms.omega_sq.scale(theta_min_sin);
    Transform::new(rot, g.mul_vec(terms.v))
}

/// Prismatic exponential: pure translation `ω · dist`.
#[must_use]
pub fn prismatic_transform(omega: Vec3, dist: f32) -> Transform {
    Transform::from_translation(omega.scale(dist))
}
