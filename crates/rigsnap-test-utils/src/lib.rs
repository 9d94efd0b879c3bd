//! Shared test fixtures and utilities for rigsnap crates.
//!
//! Provides canonical rig descriptions, armature builders, transform
//! comparison helpers, and deterministic RNG setup.

pub mod compare;
pub mod rigs;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use compare::assert_iso_close;
pub use rigs::{bent_arm, two_bone_arm, BENT_ARM, TWO_BONE_ARM};
pub use rng::{random_isometry, seeded_rng};
