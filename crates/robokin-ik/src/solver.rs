//! Closed-form inverse kinematics for the CoreXY five-axis chain.
//!
//! The rotary pair (C plus A or B) is recovered from the tool z direction
//! alone. The prismatic axes then fall out of
//!
//! ```text
//! e^(−AB) · e^(−C) · T · M⁻¹ = e^(Z) · e^(X) · e^(Y)
//! ```
//!
//! whose translation is projected onto each prismatic axis.

use heapless::Vec as HVec;
use robokin_core::{
    AbSign, AxisKind, AxisLetter, MAX_AXES, RADIANS_TO_DEGREES, SolveError, SpecialMethod, Wiring,
};

use crate::chain::AxisChain;
use crate::linalg::{Transform, Vec3};

/// Joint values in chain order.
pub type JointVector = HVec<f32, MAX_AXES>;

/// Rotary angles recovered from a tool direction, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub c: f32,
    /// A for AC wiring, B for BC wiring.
    pub tilt: f32,
    /// The mirrored solution was taken to honor the sign preference.
    pub flipped: bool,
}

/// Result of an inverse solve.
#[derive(Debug, Clone, PartialEq)]
pub struct IkResult {
    /// Joint values in chain order, references applied.
    pub joints: JointVector,
    /// Effective rotary angles (before references).
    pub orientation: Orientation,
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// C and tilt angles that point the tool z axis along `z`.
///
/// When `z` is exactly vertical C is undetermined and `preferred_c` is used.
/// A tilt that violates `ab_sign` is replaced by the mirrored solution
/// `(C ± 180°, −tilt)`, which yields the same direction.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn solve_orientation(
    z: Vec3,
    wiring: Wiring,
    ab_sign: AbSign,
    preferred_c: f32,
) -> Orientation {
    let c = if z.x == 0.0 && z.y == 0.0 {
        preferred_c
    } else {
        match wiring {
            Wiring::Ac => z.x.atan2(-z.y) * RADIANS_TO_DEGREES,
            Wiring::Bc => z.y.atan2(z.x) * RADIANS_TO_DEGREES,
        }
    };
    let tilt = z.z.clamp(-1.0, 1.0).acos() * RADIANS_TO_DEGREES;

    if ab_sign.accepts(tilt) {
        return Orientation {
            c,
            tilt,
            flipped: false,
        };
    }
    Orientation {
        c: if c < 0.0 { c + 180.0 } else { c - 180.0 },
        tilt: -tilt,
        flipped: true,
    }
}

// ---------------------------------------------------------------------------
// Chain solves
// ---------------------------------------------------------------------------

pub(crate) fn require_corexy(chain: &AxisChain) -> Result<(), SolveError> {
    if chain.num_axes() == 0 {
        return Err(SolveError::NotConfigured);
    }
    match chain.special().method {
        Some(SpecialMethod::CoreXy) => Ok(()),
        _ => Err(SolveError::UnsupportedMethod),
    }
}

fn reference_of(chain: &AxisChain, letter: AxisLetter) -> Result<f32, SolveError> {
    chain
        .record_of(letter)
        .map(|r| r.reference)
        .ok_or(SolveError::MissingAxis(letter.as_char()))
}

/// Rotation the chain produces for rotary joints `tilt` and `c`, including
/// the endpoint rotation, placed at `position`.
pub fn oriented_pose(
    chain: &AxisChain,
    position: Vec3,
    tilt: f32,
    c: f32,
) -> Result<Transform, SolveError> {
    require_corexy(chain)?;
    let e_c = chain.axis_transform(AxisLetter::C, c)?;
    let e_tilt = chain.axis_transform(chain.special().wiring.tilt_letter(), tilt)?;
    Ok(Transform::new((e_c * e_tilt).rot * chain.endpoint().rot, position))
}

/// Joint values for a target with known rotary joints.
///
/// Only the target position is used; the orientation is rebuilt from `tilt`
/// and `c`. Prismatic values are projections of the residual translation.
pub fn joints_for_orientation(
    chain: &AxisChain,
    target: &Transform,
    tilt: f32,
    c: f32,
) -> Result<JointVector, SolveError> {
    require_corexy(chain)?;
    let tilt_letter = chain.special().wiring.tilt_letter();
    let e_c = chain.axis_transform(AxisLetter::C, c)?;
    let e_tilt = chain.axis_transform(tilt_letter, tilt)?;
    let rebuilt = Transform::new((e_c * e_tilt).rot * chain.endpoint().rot, target.trans);
    let residual =
        e_tilt.inverse_rigid() * e_c.inverse_rigid() * rebuilt * *chain.endpoint_inverse();

    let mut joints = JointVector::new();
    for (slot, record) in chain.records().iter().enumerate() {
        let value = match (chain.letter_at(slot), record.kind) {
            (Some(AxisLetter::C), _) => c,
            (Some(letter), _) if letter == tilt_letter => tilt,
            (_, AxisKind::Prismatic) => residual.trans.dot(record.screw.omega) + record.reference,
            (_, AxisKind::Rotary) => return Err(SolveError::UnsupportedMethod),
        };
        let _ = joints.push(value);
    }
    Ok(joints)
}

/// Rotary joint values `(tilt, c)` for `target`, references applied.
fn rotary_joints(
    chain: &AxisChain,
    target: &Transform,
    preferred_c: f32,
) -> Result<(Orientation, f32, f32), SolveError> {
    require_corexy(chain)?;
    let special = chain.special();
    let c_ref = reference_of(chain, AxisLetter::C)?;
    let tilt_ref = reference_of(chain, special.wiring.tilt_letter())?;
    let z = (*target * *chain.endpoint_inverse()).z_axis();
    let o = solve_orientation(z, special.wiring, special.ab_sign, preferred_c - c_ref);
    Ok((o, o.tilt + tilt_ref, o.c + c_ref))
}

/// Full inverse solve of `target`.
///
/// `preferred_c` is the C joint value to keep when the tool points straight
/// along z, normally the current C position.
pub fn inverse(
    chain: &AxisChain,
    target: &Transform,
    preferred_c: f32,
) -> Result<IkResult, SolveError> {
    let (orientation, tilt, c) = rotary_joints(chain, target, preferred_c)?;
    let joints = joints_for_orientation(chain, target, tilt, c)?;
    Ok(IkResult { joints, orientation })
}

// ---------------------------------------------------------------------------
// Pose helpers
// ---------------------------------------------------------------------------

/// Machine-order `[x, y, z, a|b, c]` to a tool pose.
pub fn pose_from_xyzab(chain: &AxisChain, xyzab: &[f32; 5]) -> Result<Transform, SolveError> {
    oriented_pose(chain, Vec3::new(xyzab[0], xyzab[1], xyzab[2]), xyzab[3], xyzab[4])
}

/// Tool pose to machine-order `[x, y, z, a|b, c]`.
pub fn pose_to_xyzab(
    chain: &AxisChain,
    pose: &Transform,
    preferred_c: f32,
) -> Result<[f32; 5], SolveError> {
    let (_, tilt, c) = rotary_joints(chain, pose, preferred_c)?;
    Ok([pose.trans.x, pose.trans.y, pose.trans.z, tilt, c])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;
    use robokin_test_utils::{corexy5ac_config, corexy5bc_config, seeded_rng};

    fn chain_from(config: &robokin_core::RobotConfig) -> AxisChain {
        let mut chain = AxisChain::new();
        chain.apply_config(config).unwrap();
        chain
    }

    fn canonical_ac() -> AxisChain {
        let mut chain = AxisChain::new();
        chain.set_robot_type("CoreXY5AC").unwrap();
        for (letter, fields) in [
            (AxisLetter::C, [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
            (AxisLetter::A, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (AxisLetter::Z, [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
            (AxisLetter::X, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (AxisLetter::Y, [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        ] {
            chain.set_screw(letter, fields).unwrap();
        }
        chain
    }

    fn assert_joints_close(got: &[f32], expected: &[f32], eps: f32) {
        assert_eq!(got.len(), expected.len());
        for (i, (g, e)) in got.iter().zip(expected).enumerate() {
            assert!(
                (g - e).abs() < eps,
                "joint {i}: got {g}, expected {e} ({got:?} vs {expected:?})"
            );
        }
    }

    #[test]
    fn vertical_tool_keeps_preferred_c() {
        let o = solve_orientation(Vec3::Z, Wiring::Ac, AbSign::NonNegative, 37.0);
        assert_eq!(o.c, 37.0);
        assert_eq!(o.tilt, 0.0);
        assert!(!o.flipped);
    }

    #[test]
    fn vertical_tool_is_never_flipped() {
        for sign in [AbSign::NonNegative, AbSign::NonPositive, AbSign::DontCare] {
            let o = solve_orientation(Vec3::Z, Wiring::Bc, sign, -12.0);
            assert!(!o.flipped, "{sign:?}");
            assert_eq!(o.c, -12.0);
        }
    }

    #[test]
    fn ac_orientation_from_direction() {
        // Rz(30°)·Rx(40°)·ez
        let (a, c) = (40.0_f32.to_radians(), 30.0_f32.to_radians());
        let z = Vec3::new(c.sin() * a.sin(), -c.cos() * a.sin(), a.cos());
        let o = solve_orientation(z, Wiring::Ac, AbSign::NonNegative, 0.0);
        assert_relative_eq!(o.c, 30.0, epsilon = 1e-3);
        assert_relative_eq!(o.tilt, 40.0, epsilon = 1e-3);
    }

    #[test]
    fn bc_orientation_from_direction() {
        // Rz(−60°)·Ry(25°)·ez
        let (b, c) = (25.0_f32.to_radians(), (-60.0_f32).to_radians());
        let z = Vec3::new(c.cos() * b.sin(), c.sin() * b.sin(), b.cos());
        let o = solve_orientation(z, Wiring::Bc, AbSign::DontCare, 0.0);
        assert_relative_eq!(o.c, -60.0, epsilon = 1e-3);
        assert_relative_eq!(o.tilt, 25.0, epsilon = 1e-3);
    }

    #[test]
    fn non_positive_preference_flips_branch() {
        let (a, c) = (40.0_f32.to_radians(), 30.0_f32.to_radians());
        let z = Vec3::new(c.sin() * a.sin(), -c.cos() * a.sin(), a.cos());
        let o = solve_orientation(z, Wiring::Ac, AbSign::NonPositive, 0.0);
        assert!(o.flipped);
        assert_relative_eq!(o.c, -150.0, epsilon = 1e-3);
        assert_relative_eq!(o.tilt, -40.0, epsilon = 1e-3);

        let z = Vec3::new(-z.x, -z.y, z.z);
        let o = solve_orientation(z, Wiring::Ac, AbSign::NonPositive, 0.0);
        assert!(o.flipped);
        assert_relative_eq!(o.c, 30.0, epsilon = 1e-3);
    }

    #[test]
    fn out_of_range_cosine_is_clamped() {
        let z = Vec3::new(0.0, 0.0, 1.000_001);
        let o = solve_orientation(z, Wiring::Ac, AbSign::DontCare, 0.0);
        assert_eq!(o.tilt, 0.0);
        let o = solve_orientation(Vec3::new(0.0, 0.0, -1.5), Wiring::Ac, AbSign::DontCare, 0.0);
        assert_relative_eq!(o.tilt, 180.0, epsilon = 1e-3);
    }

    #[test]
    fn identity_pose_gives_zero_joints() {
        let chain = canonical_ac();
        assert!(chain.forward(&[0.0; 5]).unwrap().max_abs_diff(&Transform::IDENTITY) < 1e-6);
        let ik = inverse(&chain, &Transform::IDENTITY, 0.0).unwrap();
        assert_joints_close(&ik.joints, &[0.0; 5], 1e-6);
    }

    #[test]
    fn forward_inverse_round_trip_ac() {
        let chain = chain_from(&corexy5ac_config());
        let mut rng = seeded_rng(21);
        for _ in 0..100 {
            let joints = [
                rng.gen_range(-170.0..170.0),
                rng.gen_range(1.0..80.0),
                rng.gen_range(-20.0..60.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
            ];
            let pose = chain.forward(&joints).unwrap();
            let ik = inverse(&chain, &pose, 0.0).unwrap();
            assert_joints_close(&ik.joints, &joints, 1e-2);
        }
    }

    #[test]
    fn forward_inverse_round_trip_bc() {
        let chain = chain_from(&corexy5bc_config());
        let mut rng = seeded_rng(22);
        for _ in 0..100 {
            let joints = [
                rng.gen_range(-170.0..170.0),
                rng.gen_range(1.0..80.0),
                rng.gen_range(-20.0..60.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
            ];
            let pose = chain.forward(&joints).unwrap();
            let ik = inverse(&chain, &pose, 0.0).unwrap();
            assert_joints_close(&ik.joints, &joints, 1e-2);
        }
    }

    #[test]
    fn flipped_branch_reaches_same_pose() {
        let mut chain = chain_from(&corexy5ac_config());
        chain.set_ab_sign(AbSign::NonPositive);
        let pose = chain.forward(&[30.0, 40.0, 10.0, 20.0, -15.0]).unwrap();
        let ik = inverse(&chain, &pose, 0.0).unwrap();
        assert!(ik.orientation.flipped);
        assert!(ik.joints[1] <= 0.0);
        let again = chain.forward(&ik.joints).unwrap();
        assert!(again.trans.max_abs_diff(pose.trans) < 1e-2);
        assert!(again.z_axis().max_abs_diff(pose.z_axis()) < 1e-4);
    }

    #[test]
    fn degenerate_pose_uses_preferred_c() {
        let chain = chain_from(&corexy5ac_config());
        let pose = chain.forward(&[0.0, 0.0, 5.0, 12.0, -7.0]).unwrap();
        assert_eq!(pose.z_axis(), Vec3::Z);
        let ik = inverse(&chain, &pose, 0.0).unwrap();
        assert_joints_close(&ik.joints, &[0.0, 0.0, 5.0, 12.0, -7.0], 1e-3);
    }

    #[test]
    fn references_are_added_back() {
        let mut chain = canonical_ac();
        chain.set_references(&[10.0, 5.0, 1.0, 2.0, 3.0]).unwrap();
        let joints = [40.0, 35.0, 11.0, -8.0, 23.0];
        let pose = chain.forward(&joints).unwrap();
        let ik = inverse(&chain, &pose, 0.0).unwrap();
        assert_joints_close(&ik.joints, &joints, 1e-3);
        assert_relative_eq!(ik.orientation.tilt, 30.0, epsilon = 1e-3);
    }

    #[test]
    fn endpoint_offset_is_removed() {
        let mut config = corexy5ac_config();
        config.endpoint = Some([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -30.0]);
        let chain = chain_from(&config);
        let joints = [15.0, 20.0, 0.0, 10.0, 10.0];
        let pose = chain.forward(&joints).unwrap();
        let ik = inverse(&chain, &pose, 0.0).unwrap();
        assert_joints_close(&ik.joints, &joints, 1e-2);
    }

    #[test]
    fn pose_helpers_round_trip() {
        for config in [corexy5ac_config(), corexy5bc_config()] {
            let chain = chain_from(&config);
            let xyzab = [12.0, -40.0, 33.0, 25.0, -70.0];
            let pose = pose_from_xyzab(&chain, &xyzab).unwrap();
            let back = pose_to_xyzab(&chain, &pose, 0.0).unwrap();
            assert_joints_close(&back, &xyzab, 1e-3);
        }
    }

    #[test]
    fn unsupported_method_is_reported() {
        let mut chain = canonical_ac();
        chain.set_forward_chain("C_5bar(XY)").unwrap();
        assert_eq!(inverse(&chain, &Transform::IDENTITY, 0.0), Err(SolveError::UnsupportedMethod));
        assert_eq!(
            inverse(&AxisChain::new(), &Transform::IDENTITY, 0.0),
            Err(SolveError::NotConfigured)
        );
    }
}
