//! Pole-angle solving.
//!
//! An IK chain is rotationally ambiguous about its primary axis; the pole
//! target resolves the ambiguity, and the constraint's pole angle says how
//! far around that axis the solver should swing to honor it. This module
//! computes the pole angle that makes the solver's pole vector reproduce a
//! given FK geometry, so authority can switch without the chain jumping.
//!
//! Degenerate geometry — effector tail coincident with the chain root
//! head, or a pole position collinear with the root axis — collapses the
//! cross products below to zero vectors and the angle is undefined: the
//! result is unspecified rather than guarded. Callers own that
//! precondition.

use nalgebra::Vector3;

use rigsnap_rig::{Armature, BoneId};

/// Cross-to-normal angle below which the signed angle flips negative, in
/// radians.
///
/// Observed behavior carried over as-is: a coarse alignment heuristic, not
/// a perpendicularity test. Do not tune.
pub const SIGN_FLIP_THRESHOLD: f32 = 1.0;

/// Angle between `u` and `v` with a sign chosen by `normal`.
///
/// The magnitude is the unsigned angle in `[0, π]`; it is negated when
/// `u × v` lies within [`SIGN_FLIP_THRESHOLD`] of `normal`.
pub fn signed_angle(u: &Vector3<f32>, v: &Vector3<f32>, normal: &Vector3<f32>) -> f32 {
    let angle = u.angle(v);
    if u.cross(v).angle(normal) < SIGN_FLIP_THRESHOLD {
        -angle
    } else {
        angle
    }
}

/// Pole angle reproducing the given pole position against the chain's
/// current posed geometry.
///
/// The angle is measured about the chain root's primary (head→tail) axis,
/// from the root's X axis to the projection of the pole direction onto the
/// plane perpendicular to that axis:
///
/// 1. `pole_normal = (tail(effector) − head(root)) × (pole_position − head(root))`
/// 2. `projected_pole_axis = pole_normal × (tail(root) − head(root))`
/// 3. `signed_angle(x_axis(root), projected_pole_axis, tail(root) − head(root))`
///
/// All bone geometry is read from the armature's committed pose state.
pub fn pole_angle(
    armature: &Armature,
    chain_root: BoneId,
    effector: BoneId,
    pole_position: &Vector3<f32>,
) -> f32 {
    let root_head = armature.head(chain_root);
    let root_axis = armature.tail(chain_root) - root_head;

    let pole_normal = (armature.tail(effector) - root_head).cross(&(pole_position - root_head));
    let projected_pole_axis = pole_normal.cross(&root_axis);

    signed_angle(&armature.x_axis(chain_root), &projected_pole_axis, &root_axis)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rigsnap_test_utils::bent_arm;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn signed_angle_magnitude_matches_unsigned_angle() {
        let u = Vector3::new(1.0, 0.0, 0.0);
        let v = Vector3::new(0.0, 1.0, 0.0);
        let n = Vector3::new(0.0, 0.0, -1.0);
        // Cross points along +Z, far from -Z: sign stays positive.
        assert_relative_eq!(signed_angle(&u, &v, &n), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(signed_angle(&u, &v, &n).abs(), u.angle(&v), epsilon = 1e-6);
    }

    #[test]
    fn signed_angle_flips_when_cross_aligns_with_normal() {
        let u = Vector3::new(1.0, 0.0, 0.0);
        let v = Vector3::new(0.0, 1.0, 0.0);
        let n = Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(signed_angle(&u, &v, &n), -FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn signed_angle_is_antisymmetric() {
        let u = Vector3::new(1.0, 0.2, 0.0);
        let v = Vector3::new(-0.3, 1.0, 0.4);
        let n = Vector3::new(0.1, -0.2, 1.0);
        assert_relative_eq!(
            signed_angle(&u, &v, &n),
            -signed_angle(&v, &u, &n),
            epsilon = 1e-6
        );
    }

    #[test]
    fn sign_flip_threshold_is_one_radian() {
        let u = Vector3::new(1.0, 0.0, 0.0);
        let v = Vector3::new(0.0, 1.0, 0.0);
        // u × v = +Z. Tilt the normal just inside, then just outside, the
        // one-radian cone around +Z.
        let inside = Vector3::new(0.9f32.sin(), 0.0, 0.9f32.cos());
        let outside = Vector3::new(1.1f32.sin(), 0.0, 1.1f32.cos());
        assert!(signed_angle(&u, &v, &inside) < 0.0);
        assert!(signed_angle(&u, &v, &outside) > 0.0);
    }

    #[test]
    fn coplanar_pole_on_x_side_reads_zero() {
        let arm = bent_arm();
        let upper = arm.bone("upper").unwrap();
        let forearm = arm.bone("forearm").unwrap();
        // Pole in the plane of the root axis and the effector, on the +X
        // side the root's X axis points to.
        let pole = Vector3::new(1.0, 0.5, 0.0);
        assert_relative_eq!(pole_angle(&arm, upper, forearm, &pole), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn coplanar_pole_on_far_side_reads_pi() {
        let arm = bent_arm();
        let upper = arm.bone("upper").unwrap();
        let forearm = arm.bone("forearm").unwrap();
        let pole = Vector3::new(-1.0, 0.5, 0.0);
        assert_relative_eq!(
            pole_angle(&arm, upper, forearm, &pole).abs(),
            PI,
            epsilon = 1e-5
        );
    }

    #[test]
    fn out_of_plane_pole_reads_between_zero_and_pi() {
        let arm = bent_arm();
        let upper = arm.bone("upper").unwrap();
        let forearm = arm.bone("forearm").unwrap();
        // Pole pushed toward -Z; the projected pole axis swings off +X.
        let pole = Vector3::new(0.5, 0.5, -0.5);
        let angle = pole_angle(&arm, upper, forearm, &pole);
        assert!(angle.is_finite());
        assert!(angle.abs() > 1e-3 && angle.abs() < PI - 1e-3);
    }
}
