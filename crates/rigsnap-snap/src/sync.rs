//! Chain synchronization commands.
//!
//! A [`SnapSession`] binds an armature to one effector bone carrying an IK
//! constraint and exposes the four user-facing commands: match the IK
//! targets to the current FK pose, match the FK pose to the current
//! IK-solved pose, and the two narrower pole re-alignment commands. Each
//! command returns a short status line for the host UI.
//!
//! The one correctness discipline in here is temporal: within a command,
//! every world transform used as an assignment target is captured before
//! any bone is mutated. The armature's cache makes a violation loud — a
//! read after an uncommitted write returns stale data, and a read after a
//! commit returns the half-mutated hierarchy — so the commands never
//! re-read a transform they are about to overwrite.

use nalgebra::{Isometry3, Translation3, UnitQuaternion};

use rigsnap_rig::{Armature, BoneId};

use crate::error::SnapError;
use crate::mode::KinematicMode;
use crate::pole;
use crate::pose_space;

// ---------------------------------------------------------------------------
// SnapSession
// ---------------------------------------------------------------------------

/// One armature + effector bone bound for synchronization commands.
///
/// Construction fails unless the bone carries an IK constraint; the
/// constraint's bone references are fixed for the session's lifetime.
pub struct SnapSession<'a> {
    armature: &'a mut Armature,
    effector: BoneId,
    target: BoneId,
    pole: BoneId,
    chain_length: usize,
    constraint_index: usize,
}

impl<'a> SnapSession<'a> {
    /// Open a session on the given effector bone.
    pub fn new(armature: &'a mut Armature, effector: BoneId) -> Result<Self, SnapError> {
        let Some(constraint_index) = armature.constraint_index(effector) else {
            return Err(SnapError::NoIkConstraint {
                bone: armature.name(effector).to_string(),
            });
        };
        let constraint = armature.constraint(constraint_index);
        let (target, pole, chain_length) =
            (constraint.target, constraint.pole, constraint.chain_length);
        Ok(Self {
            armature,
            effector,
            target,
            pole,
            chain_length,
            constraint_index,
        })
    }

    /// Open a session on an effector bone looked up by name.
    pub fn from_name(armature: &'a mut Armature, name: &str) -> Result<Self, SnapError> {
        let effector = armature.bone(name)?;
        Self::new(armature, effector)
    }

    /// Whether the commands apply to this bone: it must carry an IK
    /// constraint. Mirrors the host-side visibility check.
    pub fn available(armature: &Armature, bone: BoneId) -> bool {
        armature.ik_constraint(bone).is_some()
    }

    /// The effector bone this session operates on.
    pub fn effector(&self) -> BoneId {
        self.effector
    }

    // -- Mode control --

    /// Displayed mode, derived from the constraint's influence.
    pub fn mode(&self) -> KinematicMode {
        KinematicMode::from_influence(self.armature.constraint(self.constraint_index).influence)
    }

    /// Write a mode's endpoint influence value.
    pub fn set_mode(&mut self, mode: KinematicMode) {
        self.armature.constraint_mut(self.constraint_index).influence = mode.influence();
    }

    // -- Commands --

    /// Make the IK targets reproduce the current FK pose, then hand
    /// authority to IK.
    ///
    /// Moves the handle bone onto the effector's tail (translation only;
    /// the handle's rotation is left as authored), moves the pole bone
    /// onto the effector's head, recomputes the pole angle against the
    /// re-placed pole, and sets influence to 1. The chain bones themselves
    /// are untouched; the external solver reproduces them from these
    /// targets.
    ///
    /// # Panics
    ///
    /// Panics if the constraint's chain length is below 2 or exceeds the
    /// effector's ancestor depth.
    pub fn match_fk_to_ik(&mut self) -> &'static str {
        // Capture the FK tail before any edit.
        let tail_target = Isometry3::from_parts(
            Translation3::from(self.armature.tail(self.effector)),
            UnitQuaternion::identity(),
        );
        let handle_pose = pose_space::solve_pose_offset(self.armature, self.target, &tail_target);
        self.armature
            .set_pose_location(self.target, handle_pose.translation.vector);
        self.armature.commit_pose_edit(self.target);

        self.place_pole();
        self.realign_pole_angle();
        self.armature.constraint_mut(self.constraint_index).influence = 1.0;
        "IK pose now matches FK pose"
    }

    /// Make the FK pose reproduce the current IK-solved pose, then hand
    /// authority to FK.
    ///
    /// Snapshots the world transform of every chain bone (and the chain
    /// root's parent) before mutating anything, zeroes the influence, then
    /// re-derives each chain bone's pose offset from its own snapshot
    /// against the snapshotted parent worlds. Assignment order across the
    /// chain is free precisely because no world transform is re-read after
    /// the snapshot. Finishes by recomputing the pole angle against the
    /// new FK geometry.
    ///
    /// # Panics
    ///
    /// Panics if the constraint's chain length is below 2 or exceeds the
    /// effector's ancestor depth.
    pub fn match_ik_to_fk(&mut self) -> &'static str {
        // Leaf-to-root chain walk, snapshotting before any mutation.
        let mut chain = Vec::with_capacity(self.chain_length);
        let mut bone = self.effector;
        chain.push(bone);
        for _ in 1..self.chain_length {
            bone = self
                .armature
                .parent(bone)
                .expect("IK chain length exceeds the effector's ancestor depth");
            chain.push(bone);
        }
        let root_bone = chain[chain.len() - 1];

        let worlds: Vec<Isometry3<f32>> = chain
            .iter()
            .map(|&b| *self.armature.world_transform(b))
            .collect();
        let outer_parent = self
            .armature
            .parent(root_bone)
            .map(|p| (*self.armature.world_transform(p), *self.armature.rest(p)));

        self.armature.constraint_mut(self.constraint_index).influence = 0.0;

        for (i, &bone) in chain.iter().enumerate() {
            let parent = if i + 1 < chain.len() {
                Some((worlds[i + 1], *self.armature.rest(chain[i + 1])))
            } else {
                outer_parent
            };
            let pose = pose_space::pose_from_world(
                self.armature.rest(bone),
                parent.as_ref().map(|(w, r)| (w, r)),
                &worlds[i],
            );
            self.armature.set_pose_offset(bone, pose);
        }
        self.armature.commit_pose_edit(root_bone);

        self.realign_pole_angle();
        "FK pose now matches IK pose"
    }

    /// Recompute only the pole angle from the current pose, so switching
    /// representations does not swing the chain.
    ///
    /// # Panics
    ///
    /// Panics if the constraint's chain length is below 2 or exceeds the
    /// effector's ancestor depth.
    pub fn adjust_pole_angle(&mut self) -> &'static str {
        self.realign_pole_angle();
        "Pole angle now matches the FK pose"
    }

    /// Re-place only the pole bone at the effector's head.
    pub fn adjust_pole_location(&mut self) -> &'static str {
        self.place_pole();
        "Pole target now sits at the FK effector's head"
    }

    // -- Shared steps --

    /// Move the pole bone's pose translation onto the effector's current
    /// world transform and flush the edit.
    fn place_pole(&mut self) {
        let effector_world = *self.armature.world_transform(self.effector);
        let pole_pose = pose_space::solve_pose_offset(self.armature, self.pole, &effector_world);
        self.armature
            .set_pose_location(self.pole, pole_pose.translation.vector);
        self.armature.commit_pose_edit(self.pole);
    }

    /// Recompute the constraint's pole angle from the pole bone's
    /// committed position.
    fn realign_pole_angle(&mut self) {
        let root = self.chain_root();
        let pole_position = self.armature.head(self.pole);
        let angle = pole::pole_angle(self.armature, root, self.effector, &pole_position);
        self.armature.constraint_mut(self.constraint_index).pole_angle = angle;
    }

    /// Last bone of the chain, `chain_length − 1` parents above the
    /// effector.
    fn chain_root(&self) -> BoneId {
        self.armature
            .ancestors(self.effector)
            .nth(self.chain_length - 2)
            .expect("IK chain length exceeds the effector's ancestor depth")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
