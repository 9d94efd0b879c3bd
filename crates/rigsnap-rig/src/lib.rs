//! Rig description and armature runtime for rigsnap.
//!
//! Provides the TOML rig description format, its parser/validator, and the
//! in-memory [`Armature`] runtime: rest transforms, pose offsets, cached
//! world transforms with explicit commit semantics, and IK constraint
//! records.
//!
//! # Architecture
//!
//! ```text
//! rig TOML ──► RigModel ──► Armature ──► posed reads / pose edits
//! ```
//!
//! The [`RigModel`] is a declarative description checked at load time
//! (unique names, usable bone axes, resolvable references). The
//! [`Armature`] built from it is the surface the synchronization commands
//! in `rigsnap-snap` read and mutate.

pub mod armature;
pub mod error;
pub mod parser;
pub mod types;

pub use armature::{Armature, BoneId, IkConstraint};
pub use error::RigError;
pub use parser::{parse_file, parse_string};
pub use types::{BoneSpec, IkConstraintSpec, RigModel};
