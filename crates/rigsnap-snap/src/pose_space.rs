//! Pose-space transform math.
//!
//! Converts between a bone's armature-space ("world") transform and its
//! pose offset, the transform authored relative to the bone's own rest
//! frame. These are the two directions of the world recursion documented
//! on [`Armature`]:
//!
//! ```text
//! world(bone) = world(parent) ∘ rest(parent)⁻¹ ∘ rest(bone) ∘ pose(bone)
//! ```
//!
//! All functions are pure and operate on immutable isometry values, so a
//! caller can snapshot any number of transforms before applying edits
//! without aliasing concerns. The round trip
//! `pose_from_world(.., world_from_pose(.., p)) == p` holds to float
//! tolerance as long as the parent's world transform is the same in both
//! calls; callers spanning several bones must capture every parent world
//! they need before mutating any of them (see `sync`).

use nalgebra::Isometry3;

use rigsnap_rig::{Armature, BoneId};

/// Solve the world recursion for a bone's pose offset, given the world
/// transform the bone should end up with.
///
/// `parent` carries the parent's `(world, rest)` pair, or `None` for a
/// root bone.
pub fn pose_from_world(
    rest: &Isometry3<f32>,
    parent: Option<(&Isometry3<f32>, &Isometry3<f32>)>,
    world_target: &Isometry3<f32>,
) -> Isometry3<f32> {
    match parent {
        Some((parent_world, parent_rest)) => {
            rest.inverse() * parent_rest * parent_world.inverse() * world_target
        }
        None => rest.inverse() * world_target,
    }
}

/// Forward direction of the same recursion: the world transform a bone
/// takes on under the given pose offset.
pub fn world_from_pose(
    rest: &Isometry3<f32>,
    parent: Option<(&Isometry3<f32>, &Isometry3<f32>)>,
    pose: &Isometry3<f32>,
) -> Isometry3<f32> {
    let local = rest * pose;
    match parent {
        Some((parent_world, parent_rest)) => parent_world * parent_rest.inverse() * local,
        None => local,
    }
}

/// [`pose_from_world`] against a bone's rest data and its parent's
/// *current committed* world transform.
pub fn solve_pose_offset(
    armature: &Armature,
    bone: BoneId,
    world_target: &Isometry3<f32>,
) -> Isometry3<f32> {
    let parent = armature
        .parent(bone)
        .map(|p| (armature.world_transform(p), armature.rest(p)));
    pose_from_world(armature.rest(bone), parent, world_target)
}

/// [`world_from_pose`] against a bone's rest data and its parent's
/// *current committed* world transform. Reads the hierarchy without
/// mutating it.
pub fn effective_world(armature: &Armature, bone: BoneId, pose: &Isometry3<f32>) -> Isometry3<f32> {
    let parent = armature
        .parent(bone)
        .map(|p| (armature.world_transform(p), armature.rest(p)));
    world_from_pose(armature.rest(bone), parent, pose)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
