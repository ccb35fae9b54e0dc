//! Fixed-size vector, 3×3 matrix and 3×4 rigid transform types.
//!
//! A [`Transform`] is a homogeneous 4×4 matrix whose last row is always
//! `(0, 0, 0, 1)`; that row is implicit and never stored. All values live on
//! the stack.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Magnitude below which [`Transform::without_near_zero`] snaps entries to 0.
pub const NEAR_ZERO: f32 = 1e-6;

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[must_use]
    pub fn norm(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Exactly one of the three canonical unit axes.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_canonical_axis(self) -> bool {
        self == Self::X || self == Self::Y || self == Self::Z
    }

    /// Unit vector in the same direction.
    ///
    /// Canonical axes are returned bit-for-bit, and a zero vector is returned
    /// unchanged.
    #[must_use]
    pub fn normalized_or_keep(self) -> Self {
        if self.is_canonical_axis() {
            return self;
        }
        let len = self.norm();
        if len == 0.0 {
            self
        } else {
            self.scale(1.0 / len)
        }
    }

    /// Largest absolute component difference.
    #[must_use]
    pub fn max_abs_diff(self, other: Self) -> f32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

// -- Operator impls --

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ---------------------------------------------------------------------------
// Mat3
// ---------------------------------------------------------------------------

/// Row-major 3×3 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    pub const ZERO: Self = Self::from_rows([[0.0; 3]; 3]);

    #[must_use]
    pub const fn from_rows(m: [[f32; 3]; 3]) -> Self {
        Self { m }
    }

    #[must_use]
    pub const fn from_columns(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self::from_rows([[x.x, y.x, z.x], [x.y, y.y, z.y], [x.z, y.z, z.z]])
    }

    /// Cross-product matrix `ŵ` so that `ŵ·v == w × v`.
    #[must_use]
    pub const fn skew(w: Vec3) -> Self {
        Self::from_rows([[0.0, -w.z, w.y], [w.z, 0.0, -w.x], [-w.y, w.x, 0.0]])
    }

    #[must_use]
    pub const fn column(&self, c: usize) -> Vec3 {
        Vec3::new(self.m[0][c], self.m[1][c], self.m[2][c])
    }

    #[must_use]
    pub const fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_rows([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    #[must_use]
    pub fn mul_vec(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    #[must_use]
    pub fn scale(&self, s: f32) -> Self {
        let mut out = *self;
        for row in &mut out.m {
            for v in row {
                *v *= s;
            }
        }
        out
    }
}

impl Add for Mat3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for (row, rrow) in out.m.iter_mut().zip(rhs.m.iter()) {
            for (v, r) in row.iter_mut().zip(rrow.iter()) {
                *v += r;
            }
        }
        out
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::ZERO;
        for r in 0..3 {
            for c in 0..3 {
                out.m[r][c] = (0..3).map(|e| self.m[r][e] * rhs.m[e][c]).sum();
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Rigid 3×4 homogeneous transform `[R | t]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub rot: Mat3,
    pub trans: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self::new(Mat3::IDENTITY, Vec3::ZERO);

    #[must_use]
    pub const fn new(rot: Mat3, trans: Vec3) -> Self {
        Self { rot, trans }
    }

    #[must_use]
    pub const fn from_translation(trans: Vec3) -> Self {
        Self::new(Mat3::IDENTITY, trans)
    }

    /// Build from row-major 3×4 storage (`[r00 r01 r02 t0 r10 ... t2]`).
    #[must_use]
    pub const fn from_row_major(a: [f32; 12]) -> Self {
        Self::new(
            Mat3::from_rows([[a[0], a[1], a[2]], [a[4], a[5], a[6]], [a[8], a[9], a[10]]]),
            Vec3::new(a[3], a[7], a[11]),
        )
    }

    #[must_use]
    pub const fn to_row_major(&self) -> [f32; 12] {
        let m = &self.rot.m;
        let t = self.trans;
        [
            m[0][0], m[0][1], m[0][2], t.x, //
            m[1][0], m[1][1], m[1][2], t.y, //
            m[2][0], m[2][1], m[2][2], t.z,
        ]
    }

    /// Tool z direction (third rotation column).
    #[must_use]
    pub const fn z_axis(&self) -> Vec3 {
        self.rot.column(2)
    }

    /// Product `self · rhs` with the implicit `(0,0,0,1)` row.
    #[must_use]
    pub fn compose(&self, rhs: &Self) -> Self {
        Self::new(self.rot * rhs.rot, self.rot.mul_vec(rhs.trans) + self.trans)
    }

    /// Inverse of a rigid transform: `[Rᵀ | −Rᵀt]`.
    #[must_use]
    pub fn inverse_rigid(&self) -> Self {
        let rt = self.rot.transpose();
        Self::new(rt, -rt.mul_vec(self.trans))
    }

    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rot.mul_vec(p) + self.trans
    }

    /// Copy with every entry of magnitude below [`NEAR_ZERO`] set to 0.
    #[must_use]
    pub fn without_near_zero(&self) -> Self {
        let mut a = self.to_row_major();
        for v in &mut a {
            if v.abs() < NEAR_ZERO {
                *v = 0.0;
            }
        }
        Self::from_row_major(a)
    }

    /// Largest absolute entry difference over the stored 3×4 block.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        self.to_row_major()
            .iter()
            .zip(other.to_row_major().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

impl Mul for Transform {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
