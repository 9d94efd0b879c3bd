//! Error type for the snap command surface.

use rigsnap_rig::RigError;
use thiserror::Error;

/// Errors raised while opening or driving a snap session.
///
/// Only host-level lookup failures surface here. Geometric preconditions
/// (chain length vs. ancestor depth, degenerate pole geometry) are
/// documented contracts on the individual operations, not errors.
#[derive(Debug, Error)]
pub enum SnapError {
    /// A bone lookup against the armature failed.
    #[error(transparent)]
    Rig(#[from] RigError),

    /// The session bone carries no IK constraint.
    #[error("bone '{bone}' has no IK constraint")]
    NoIkConstraint { bone: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_error_passes_through() {
        let e: SnapError = RigError::MissingBone("hand".into()).into();
        assert_eq!(e.to_string(), "missing bone: hand");
    }

    #[test]
    fn no_constraint_message() {
        let e = SnapError::NoIkConstraint {
            bone: "forearm".into(),
        };
        assert_eq!(e.to_string(), "bone 'forearm' has no IK constraint");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_is_send_sync() {
        assert_send_sync::<SnapError>();
    }
}
