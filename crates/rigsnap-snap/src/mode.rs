//! FK/IK mode as a display adapter over the constraint's influence.
//!
//! The underlying value is continuous; the mode shown to a user is a
//! two-way label derived from it. The mapping is intentionally lossy:
//! *any* non-zero influence reads as IK, and setting a mode writes only
//! the endpoint values `0.0` / `1.0`. A fractional influence therefore
//! round-trips to an endpoint, never back to itself.

use std::fmt;

// ---------------------------------------------------------------------------
// KinematicMode
// ---------------------------------------------------------------------------

/// Which representation currently has authority over the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KinematicMode {
    /// Pose authored bone by bone; the IK solver contributes nothing.
    Fk,
    /// Pose driven by the IK solver's handle and pole targets.
    Ik,
}

impl KinematicMode {
    /// Derive the displayed mode from an influence value.
    ///
    /// ```
    /// use rigsnap_snap::KinematicMode;
    ///
    /// assert_eq!(KinematicMode::from_influence(0.0), KinematicMode::Fk);
    /// assert_eq!(KinematicMode::from_influence(1.0), KinematicMode::Ik);
    /// // Lossy on purpose: fractional influence still displays as IK.
    /// assert_eq!(KinematicMode::from_influence(0.5), KinematicMode::Ik);
    /// ```
    pub fn from_influence(influence: f32) -> Self {
        if influence > 0.0 {
            Self::Ik
        } else {
            Self::Fk
        }
    }

    /// The influence value this mode writes back: `1.0` for IK, `0.0` for FK.
    pub const fn influence(self) -> f32 {
        match self {
            Self::Ik => 1.0,
            Self::Fk => 0.0,
        }
    }

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fk => "FK",
            Self::Ik => "IK",
        }
    }
}

impl fmt::Display for KinematicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_influence_is_fk() {
        assert_eq!(KinematicMode::from_influence(0.0), KinematicMode::Fk);
    }

    #[test]
    fn full_influence_is_ik() {
        assert_eq!(KinematicMode::from_influence(1.0), KinematicMode::Ik);
    }

    #[test]
    fn fractional_influence_displays_as_ik() {
        assert_eq!(KinematicMode::from_influence(0.5), KinematicMode::Ik);
        assert_eq!(KinematicMode::from_influence(f32::EPSILON), KinematicMode::Ik);
    }

    #[test]
    fn modes_write_endpoint_influences() {
        assert!((KinematicMode::Fk.influence() - 0.0).abs() < f32::EPSILON);
        assert!((KinematicMode::Ik.influence() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn display_labels() {
        assert_eq!(KinematicMode::Fk.to_string(), "FK");
        assert_eq!(KinematicMode::Ik.to_string(), "IK");
    }
}
