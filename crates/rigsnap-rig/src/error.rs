//! Error types for rig description parsing and armature construction.

use std::path::PathBuf;

/// Errors that can occur while loading a rig description or building an
/// armature from it.
#[derive(Debug, thiserror::Error)]
pub enum RigError {
    /// Failed to read the rig description file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the rig description TOML.
    #[error("rig parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A referenced bone was not found in the rig.
    #[error("missing bone: {0}")]
    MissingBone(String),

    /// Two bones share the same name.
    #[error("duplicate bone name: {0}")]
    DuplicateBone(String),

    /// A bone names a parent that was not declared before it.
    #[error("unknown parent '{parent}' for bone '{bone}'")]
    UnknownParent { bone: String, parent: String },

    /// A bone's head and tail coincide, leaving it without a primary axis.
    #[error("zero-length bone: {0}")]
    ZeroLengthBone(String),

    /// An IK constraint's influence is outside [0, 1].
    #[error("invalid influence {value} on constraint for bone '{bone}' (must be in [0, 1])")]
    InvalidInfluence { bone: String, value: f32 },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
