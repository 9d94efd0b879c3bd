//! Comparison helpers for transform-heavy assertions.

use nalgebra::Isometry3;

/// Assert two isometries agree: translations componentwise within `eps`,
/// rotations within `eps` radians.
///
/// # Panics
///
/// Panics with both transforms in the message when they differ.
pub fn assert_iso_close(a: &Isometry3<f32>, b: &Isometry3<f32>, eps: f32) {
    let dt = (a.translation.vector - b.translation.vector).amax();
    let dr = a.rotation.angle_to(&b.rotation);
    assert!(
        dt <= eps && dr <= eps,
        "isometries differ (dt={dt}, dr={dr}):\n  left:  {a:?}\n  right: {b:?}"
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
