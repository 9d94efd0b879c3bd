//! In-memory armature runtime built from a [`RigModel`].
//!
//! An [`Armature`] owns the immutable rest data of every bone, the mutable
//! per-bone pose offsets, and a cache of armature-space ("world") pose
//! transforms. The cache is the authoritative read surface for posed
//! geometry and is refreshed only by [`Armature::commit_pose_edit`]:
//! assigning a pose offset does not move anything until the edit is
//! committed, mirroring a host scene graph whose dependency graph is
//! flushed explicitly.
//!
//! World transforms obey the recursion
//!
//! ```text
//! world(bone) = world(parent) ∘ rest(parent)⁻¹ ∘ rest(bone) ∘ pose(bone)
//! world(root) = rest(root) ∘ pose(root)
//! ```
//!
//! where `rest` is the bone's armature-space rest isometry and `pose` is
//! its offset in its own rest frame.

use std::collections::HashMap;

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use crate::error::RigError;
use crate::types::RigModel;

// ---------------------------------------------------------------------------
// BoneId
// ---------------------------------------------------------------------------

/// Identifier of a bone within one [`Armature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneId(pub usize);

// ---------------------------------------------------------------------------
// IkConstraint
// ---------------------------------------------------------------------------

/// Runtime IK constraint record attached to an effector bone.
///
/// The chain solver consuming these values lives in the host; this record
/// only stores its inputs. `influence` and `pole_angle` are the two fields
/// the synchronizer rewrites.
#[derive(Debug, Clone)]
pub struct IkConstraint {
    /// Effector bone the constraint is attached to.
    pub owner: BoneId,
    /// Handle bone the solver pulls the effector tail toward.
    pub target: BoneId,
    /// Pole target bone.
    pub pole: BoneId,
    /// Number of bones in the chain, counted from the effector upward.
    pub chain_length: usize,
    /// Blend weight between FK and IK contributions, in [0, 1].
    pub influence: f32,
    /// Rotation about the chain's primary axis, in radians.
    pub pole_angle: f32,
}

// ---------------------------------------------------------------------------
// Armature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct BoneNode {
    name: String,
    parent: Option<BoneId>,
    /// Bone space → armature space at rest.
    rest: Isometry3<f32>,
    /// Rest head→tail distance.
    length: f32,
    /// Bone space → own rest frame. The authored pose.
    pose: Isometry3<f32>,
}

/// Posable bone hierarchy with cached world transforms.
#[derive(Debug, Clone)]
pub struct Armature {
    bones: Vec<BoneNode>,
    by_name: HashMap<String, BoneId>,
    /// Cached armature-space pose transforms, one per bone.
    world: Vec<Isometry3<f32>>,
    constraints: Vec<IkConstraint>,
}

impl Armature {
    /// Build an armature from a validated [`RigModel`].
    ///
    /// Bones are taken in declaration order; a bone naming a parent that
    /// has not been declared yet is an error. Constraint bone references
    /// are resolved here.
    pub fn from_model(model: &RigModel) -> Result<Self, RigError> {
        let mut armature = Self {
            bones: Vec::with_capacity(model.bones.len()),
            by_name: HashMap::with_capacity(model.bones.len()),
            world: Vec::with_capacity(model.bones.len()),
            constraints: Vec::with_capacity(model.constraints.len()),
        };

        for spec in &model.bones {
            let parent = match &spec.parent {
                Some(name) => Some(*armature.by_name.get(name).ok_or_else(|| {
                    RigError::UnknownParent {
                        bone: spec.name.clone(),
                        parent: name.clone(),
                    }
                })?),
                None => None,
            };

            let head = Vector3::from(spec.head);
            let direction = Vector3::from(spec.tail) - head;
            let rest = Isometry3::from_parts(
                Translation3::from(head),
                rest_orientation(&direction, spec.roll),
            );

            let id = BoneId(armature.bones.len());
            armature.by_name.insert(spec.name.clone(), id);
            armature.bones.push(BoneNode {
                name: spec.name.clone(),
                parent,
                rest,
                length: direction.norm(),
                pose: Isometry3::identity(),
            });
        }

        for spec in &model.constraints {
            let constraint = IkConstraint {
                owner: armature.bone(&spec.bone)?,
                target: armature.bone(&spec.target)?,
                pole: armature.bone(&spec.pole)?,
                chain_length: spec.chain_length,
                influence: spec.influence,
                pole_angle: spec.pole_angle,
            };
            armature.constraints.push(constraint);
        }

        // Declaration order puts parents first, so one forward pass fills
        // the cache consistently.
        for i in 0..armature.bones.len() {
            let world = armature.evaluate_world(BoneId(i));
            armature.world.push(world);
        }

        Ok(armature)
    }

    // -- Identity and traversal --

    /// Number of bones.
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Look up a bone by name.
    pub fn bone(&self, name: &str) -> Result<BoneId, RigError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RigError::MissingBone(name.to_string()))
    }

    /// Name of a bone.
    pub fn name(&self, bone: BoneId) -> &str {
        &self.bones[bone.0].name
    }

    /// Parent of a bone, `None` for roots.
    pub fn parent(&self, bone: BoneId) -> Option<BoneId> {
        self.bones[bone.0].parent
    }

    /// Walk from a bone's parent up to the root.
    pub fn ancestors(&self, bone: BoneId) -> impl Iterator<Item = BoneId> + '_ {
        std::iter::successors(self.bones[bone.0].parent, move |b| self.bones[b.0].parent)
    }

    // -- Rest data (immutable after construction) --

    /// Bone space → armature space rest isometry.
    pub fn rest(&self, bone: BoneId) -> &Isometry3<f32> {
        &self.bones[bone.0].rest
    }

    /// Rest head→tail distance.
    pub fn rest_length(&self, bone: BoneId) -> f32 {
        self.bones[bone.0].length
    }

    // -- Posed reads (served from the committed cache) --

    /// Current pose offset (bone space → own rest frame).
    pub fn pose_offset(&self, bone: BoneId) -> &Isometry3<f32> {
        &self.bones[bone.0].pose
    }

    /// Committed armature-space pose transform.
    pub fn world_transform(&self, bone: BoneId) -> &Isometry3<f32> {
        &self.world[bone.0]
    }

    /// Committed head position (the world translation).
    pub fn head(&self, bone: BoneId) -> Vector3<f32> {
        self.world[bone.0].translation.vector
    }

    /// Committed tail position: head plus the bone length along the posed
    /// primary (Y) axis.
    pub fn tail(&self, bone: BoneId) -> Vector3<f32> {
        let w = &self.world[bone.0];
        w.translation.vector + w.rotation * (Vector3::y() * self.bones[bone.0].length)
    }

    /// Committed X axis direction.
    pub fn x_axis(&self, bone: BoneId) -> Vector3<f32> {
        self.world[bone.0].rotation * Vector3::x()
    }

    // -- Pose mutation --

    /// Replace a bone's pose offset. The world cache is untouched until
    /// [`commit_pose_edit`](Self::commit_pose_edit).
    pub fn set_pose_offset(&mut self, bone: BoneId, pose: Isometry3<f32>) {
        self.bones[bone.0].pose = pose;
    }

    /// Replace only the translation of a bone's pose offset, leaving its
    /// rotation untouched. The world cache is untouched until
    /// [`commit_pose_edit`](Self::commit_pose_edit).
    pub fn set_pose_location(&mut self, bone: BoneId, location: Vector3<f32>) {
        self.bones[bone.0].pose.translation = Translation3::from(location);
    }

    /// Flush a bone's pose edit: recompute the cached world transform of
    /// the bone and all its descendants from current pose state.
    ///
    /// Until this is called, [`world_transform`](Self::world_transform) and
    /// the `head`/`tail`/`x_axis` readers keep returning the pre-edit
    /// values. Ancestors are never touched.
    pub fn commit_pose_edit(&mut self, bone: BoneId) {
        self.world[bone.0] = self.evaluate_world(bone);
        let children: Vec<BoneId> = (0..self.bones.len())
            .map(BoneId)
            .filter(|c| self.bones[c.0].parent == Some(bone))
            .collect();
        for child in children {
            self.commit_pose_edit(child);
        }
    }

    /// World recursion against the parent's *cached* transform.
    fn evaluate_world(&self, bone: BoneId) -> Isometry3<f32> {
        let node = &self.bones[bone.0];
        let local = node.rest * node.pose;
        match node.parent {
            Some(p) => self.world[p.0] * self.bones[p.0].rest.inverse() * local,
            None => local,
        }
    }

    // -- IK constraints --

    /// All constraint records.
    pub fn constraints(&self) -> &[IkConstraint] {
        &self.constraints
    }

    /// The IK constraint attached to a bone, if any.
    pub fn ik_constraint(&self, bone: BoneId) -> Option<&IkConstraint> {
        self.constraints.iter().find(|c| c.owner == bone)
    }

    /// Index of the IK constraint attached to a bone, if any.
    pub fn constraint_index(&self, bone: BoneId) -> Option<usize> {
        self.constraints.iter().position(|c| c.owner == bone)
    }

    /// Constraint record by index.
    pub fn constraint(&self, index: usize) -> &IkConstraint {
        &self.constraints[index]
    }

    /// Mutable constraint record by index.
    pub fn constraint_mut(&mut self, index: usize) -> &mut IkConstraint {
        &mut self.constraints[index]
    }
}

/// Orientation taking the rest +Y axis onto `direction`, then rolled about
/// the bone's own primary axis.
fn rest_orientation(direction: &Vector3<f32>, roll: f32) -> UnitQuaternion<f32> {
    let align = UnitQuaternion::rotation_between(&Vector3::y(), direction).unwrap_or_else(|| {
        // Antiparallel: pitch straight over.
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI)
    });
    align * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), roll)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
