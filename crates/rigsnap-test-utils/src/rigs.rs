//! Canonical rig fixtures shared by the workspace's test suites.
//!
//! Two small arms with an IK constraint on the forearm: one with a
//! straight rest chain along +Y, one with the elbow already bent at rest
//! so the pole geometry is non-degenerate from the start.

use rigsnap_rig::{parse_string, Armature};

/// Straight two-bone arm along +Y, plus handle and pole control bones.
pub const TWO_BONE_ARM: &str = r#"
    name = "arm"

    [[bones]]
    name = "upper"
    head = [0.0, 0.0, 0.0]
    tail = [0.0, 1.0, 0.0]

    [[bones]]
    name = "forearm"
    parent = "upper"
    head = [0.0, 1.0, 0.0]
    tail = [0.0, 2.0, 0.0]

    [[bones]]
    name = "hand_ik"
    head = [0.2, 1.8, 0.0]
    tail = [0.2, 2.0, 0.0]

    [[bones]]
    name = "elbow_pole"
    head = [0.0, 1.0, 1.0]
    tail = [0.0, 1.2, 1.0]

    [[constraints]]
    bone = "forearm"
    target = "hand_ik"
    pole = "elbow_pole"
    chain_length = 2
"#;

/// Two-bone arm with the forearm bent 90° off the root axis at rest.
pub const BENT_ARM: &str = r#"
    name = "bent_arm"

    [[bones]]
    name = "upper"
    head = [0.0, 0.0, 0.0]
    tail = [0.0, 1.0, 0.0]

    [[bones]]
    name = "forearm"
    parent = "upper"
    head = [0.0, 1.0, 0.0]
    tail = [1.0, 1.0, 0.0]

    [[bones]]
    name = "hand_ik"
    head = [1.2, 0.8, 0.0]
    tail = [1.2, 1.0, 0.0]

    [[bones]]
    name = "elbow_pole"
    head = [0.5, 0.5, 0.8]
    tail = [0.5, 0.7, 0.8]

    [[constraints]]
    bone = "forearm"
    target = "hand_ik"
    pole = "elbow_pole"
    chain_length = 2
"#;

/// Build the straight two-bone arm.
pub fn two_bone_arm() -> Armature {
    Armature::from_model(&parse_string(TWO_BONE_ARM).expect("fixture parses"))
        .expect("fixture builds")
}

/// Build the bent two-bone arm.
pub fn bent_arm() -> Armature {
    Armature::from_model(&parse_string(BENT_ARM).expect("fixture parses")).expect("fixture builds")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_build() {
        assert_eq!(two_bone_arm().bone_count(), 4);
        assert_eq!(bent_arm().bone_count(), 4);
    }

    #[test]
    fn fixtures_carry_one_constraint() {
        let arm = two_bone_arm();
        let forearm = arm.bone("forearm").unwrap();
        assert!(arm.ik_constraint(forearm).is_some());
        assert_eq!(arm.constraints().len(), 1);
    }
}
