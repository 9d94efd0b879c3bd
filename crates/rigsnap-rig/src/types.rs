//! Core data types for the in-memory rig description.
//!
//! These types are the crate's canonical representation of a rig,
//! independent of the TOML parsing layer. Bone geometry is authored as
//! head/tail points plus a roll angle, the way rigging tools expose it;
//! the [`Armature`](crate::armature::Armature) runtime converts that into
//! rest isometries.

use serde::{Deserialize, Serialize};

use crate::error::RigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_roll() -> f32 {
    0.0
}
const fn default_chain_length() -> usize {
    2
}

// ---------------------------------------------------------------------------
// BoneSpec
// ---------------------------------------------------------------------------

/// One bone of the rig, in armature space at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneSpec {
    /// Unique bone name.
    pub name: String,
    /// Parent bone name. `None` for root bones. Parents must be declared
    /// before their children.
    #[serde(default)]
    pub parent: Option<String>,
    /// Rest head position `[x, y, z]`.
    pub head: [f32; 3],
    /// Rest tail position `[x, y, z]`. Must differ from `head`.
    pub tail: [f32; 3],
    /// Roll about the head→tail axis, in radians (default: 0).
    #[serde(default = "default_roll")]
    pub roll: f32,
}

// ---------------------------------------------------------------------------
// IkConstraintSpec
// ---------------------------------------------------------------------------

/// An IK constraint record attached to an effector bone.
///
/// The constraint itself is solved by the host; this record only carries
/// the solver's inputs: the handle ("target") bone, the pole bone, how many
/// bones the chain covers, and the influence/pole-angle values the
/// synchronizer maintains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IkConstraintSpec {
    /// Name of the effector bone the constraint is attached to.
    pub bone: String,
    /// Name of the handle bone the solver pulls the effector tail toward.
    pub target: String,
    /// Name of the pole target bone.
    pub pole: String,
    /// Number of bones in the chain, counted from the effector upward
    /// (default: 2).
    #[serde(default = "default_chain_length")]
    pub chain_length: usize,
    /// Blend weight between FK and IK contributions, in [0, 1] (default: 0).
    #[serde(default)]
    pub influence: f32,
    /// Rotation about the chain's primary axis aligning the solver's pole
    /// vector, in radians (default: 0).
    #[serde(default)]
    pub pole_angle: f32,
}

// ---------------------------------------------------------------------------
// RigModel
// ---------------------------------------------------------------------------

/// Complete rig description loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigModel {
    /// Rig name.
    pub name: String,
    /// Bones in declaration order, parents before children.
    #[serde(default)]
    pub bones: Vec<BoneSpec>,
    /// IK constraint records.
    #[serde(default)]
    pub constraints: Vec<IkConstraintSpec>,
}

impl RigModel {
    /// Validate the description. Returns `Err` on the first defect.
    ///
    /// Checks names are unique, every bone has a usable primary axis, and
    /// influence values are in range. Cross-references (parent names,
    /// constraint bone names) are checked when the armature is built.
    pub fn validate(&self) -> Result<(), RigError> {
        let mut seen = std::collections::HashSet::new();
        for bone in &self.bones {
            if !seen.insert(bone.name.as_str()) {
                return Err(RigError::DuplicateBone(bone.name.clone()));
            }
            let d = [
                bone.tail[0] - bone.head[0],
                bone.tail[1] - bone.head[1],
                bone.tail[2] - bone.head[2],
            ];
            if d[0] == 0.0 && d[1] == 0.0 && d[2] == 0.0 {
                return Err(RigError::ZeroLengthBone(bone.name.clone()));
            }
        }
        for constraint in &self.constraints {
            if !(0.0..=1.0).contains(&constraint.influence) {
                return Err(RigError::InvalidInfluence {
                    bone: constraint.bone.clone(),
                    value: constraint.influence,
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn bone(name: &str, head: [f32; 3], tail: [f32; 3]) -> BoneSpec {
        BoneSpec {
            name: name.into(),
            parent: None,
            head,
            tail,
            roll: 0.0,
        }
    }

    #[test]
    fn validate_ok() {
        let model = RigModel {
            name: "arm".into(),
            bones: vec![bone("upper", [0.0; 3], [0.0, 1.0, 0.0])],
            constraints: vec![],
        };
        assert!(model.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let model = RigModel {
            name: "arm".into(),
            bones: vec![
                bone("upper", [0.0; 3], [0.0, 1.0, 0.0]),
                bone("upper", [0.0; 3], [1.0, 0.0, 0.0]),
            ],
            constraints: vec![],
        };
        assert!(matches!(
            model.validate(),
            Err(RigError::DuplicateBone(name)) if name == "upper"
        ));
    }

    #[test]
    fn validate_rejects_zero_length_bone() {
        let model = RigModel {
            name: "arm".into(),
            bones: vec![bone("stub", [1.0, 2.0, 3.0], [1.0, 2.0, 3.0])],
            constraints: vec![],
        };
        assert!(matches!(
            model.validate(),
            Err(RigError::ZeroLengthBone(name)) if name == "stub"
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_influence() {
        let model = RigModel {
            name: "arm".into(),
            bones: vec![bone("upper", [0.0; 3], [0.0, 1.0, 0.0])],
            constraints: vec![IkConstraintSpec {
                bone: "upper".into(),
                target: "t".into(),
                pole: "p".into(),
                chain_length: 2,
                influence: 1.5,
                pole_angle: 0.0,
            }],
        };
        assert!(matches!(
            model.validate(),
            Err(RigError::InvalidInfluence { value, .. }) if (value - 1.5).abs() < f32::EPSILON
        ));
    }

    #[test]
    fn bone_spec_toml_defaults() {
        let spec: BoneSpec = toml::from_str(
            r#"
            name = "upper"
            head = [0.0, 0.0, 0.0]
            tail = [0.0, 1.0, 0.0]
        "#,
        )
        .unwrap();
        assert!(spec.parent.is_none());
        assert!(spec.roll.abs() < f32::EPSILON);
    }

    #[test]
    fn constraint_spec_toml_defaults() {
        let spec: IkConstraintSpec = toml::from_str(
            r#"
            bone = "forearm"
            target = "hand_ik"
            pole = "elbow_pole"
        "#,
        )
        .unwrap();
        assert_eq!(spec.chain_length, 2);
        assert!(spec.influence.abs() < f32::EPSILON);
        assert!(spec.pole_angle.abs() < f32::EPSILON);
    }
}
