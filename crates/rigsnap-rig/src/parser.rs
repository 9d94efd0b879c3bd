//! Rig description parsing from TOML.
//!
//! Converts TOML text into the crate's canonical [`RigModel`]
//! representation and runs the load-time validation pass.

use std::path::Path;

use crate::error::RigError;
use crate::types::RigModel;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a rig description file from disk into a [`RigModel`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<RigModel, RigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| RigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_string(&content)
}

/// Parse a rig description TOML string into a [`RigModel`].
pub fn parse_string(text: &str) -> Result<RigModel, RigError> {
    let model: RigModel = toml::from_str(text)?;
    model.validate()?;
    Ok(model)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BONE_ARM: &str = r#"
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

    #[test]
    fn parse_two_bone_arm() {
        let model = parse_string(TWO_BONE_ARM).unwrap();
        assert_eq!(model.name, "arm");
        assert_eq!(model.bones.len(), 4);
        assert_eq!(model.constraints.len(), 1);
        assert_eq!(model.bones[1].parent.as_deref(), Some("upper"));
        assert_eq!(model.constraints[0].chain_length, 2);
    }

    #[test]
    fn parse_rejects_bad_toml() {
        let result = parse_string("name = ");
        assert!(matches!(result, Err(RigError::Parse(_))));
    }

    #[test]
    fn parse_runs_validation() {
        let result = parse_string(
            r#"
            name = "bad"

            [[bones]]
            name = "stub"
            head = [0.0, 0.0, 0.0]
            tail = [0.0, 0.0, 0.0]
        "#,
        );
        assert!(matches!(result, Err(RigError::ZeroLengthBone(_))));
    }

    #[test]
    fn parse_file_not_found() {
        let result = parse_file("/nonexistent/path/rig.toml");
        assert!(matches!(result, Err(RigError::Io { .. })));
    }

    #[test]
    fn parse_file_roundtrip() {
        let dir = std::env::temp_dir().join("rigsnap_test_parse_file");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("arm.toml");
        std::fs::write(&path, TWO_BONE_ARM).unwrap();

        let model = parse_file(&path).unwrap();
        assert_eq!(model.bones.len(), 4);

        // Cleanup
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }
}
