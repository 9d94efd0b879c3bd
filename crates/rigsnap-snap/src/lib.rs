//! FK/IK pose synchronization for rigsnap armatures.
//!
//! Keeps the forward-kinematic and inverse-kinematic representations of a
//! bone chain numerically aligned so that handing authority from one to
//! the other never jumps the pose.
//!
//! # Architecture
//!
//! ```text
//! Armature ──► pose_space (offset ⇄ world) ──► sync (commands)
//!          ──► pole (pole-angle solve)     ──┘
//! ```
//!
//! [`pose_space`] solves the hierarchy recursion for a single bone in
//! either direction. [`pole`] computes the signed pole angle that makes an
//! IK solver's pole vector reproduce FK geometry. [`sync::SnapSession`]
//! composes the two across a chain and maintains the constraint's
//! influence, with [`mode::KinematicMode`] as the lossy FK/IK display
//! adapter over that influence. The iterative IK solve itself belongs to
//! the host; this crate only produces the targets it consumes.

pub mod error;
pub mod mode;
pub mod pole;
pub mod pose_space;
pub mod sync;

pub use error::SnapError;
pub use mode::KinematicMode;
pub use pole::{pole_angle, signed_angle, SIGN_FLIP_THRESHOLD};
pub use pose_space::{effective_world, pose_from_world, solve_pose_offset, world_from_pose};
pub use sync::SnapSession;
