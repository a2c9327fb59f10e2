//! # Exposure Group Module
//!
//! An exposure group binds a named exposure-time constraint to the raw frame sets that share it.
//! Several raw frame sets may reference the same group, in which case adjusting the group's
//! exposure time retimes all of them together.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use derive_more::{Display, From};

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Index of an [`ExposureGroup`] within its use case definition's ordered group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
pub struct ExposureGroupId(pub usize);

/// A named exposure-time constraint shared by one or more raw frame sets.
///
/// All times are in microseconds. The limits pair is `(min, max)`, both inclusive. No validation
/// happens on construction; [`crate::UseCaseDefinition::validate`] checks that the current time
/// lies within the limits, and the exposure setters refuse out-of-limit updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureGroup {
    /// Name of the group, unique within one use case definition.
    pub name: String,

    /// Minimum and maximum exposure time accepted for this group [us].
    pub exposure_limits: (u32, u32),

    /// The currently configured exposure time [us].
    pub exposure_time: u32,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl ExposureGroup {
    /// Create a new exposure group.
    pub fn new<S: Into<String>>(name: S, exposure_limits: (u32, u32), exposure_time: u32) -> Self {
        Self {
            name: name.into(),
            exposure_limits,
            exposure_time,
        }
    }

    /// True if `time` lies within this group's inclusive limits.
    pub fn accepts(&self, time: u32) -> bool {
        self.exposure_limits.0 <= time && time <= self.exposure_limits.1
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    /// Equality must be sensitive to each of the three fields.
    #[test]
    fn test_equality() {
        let group = ExposureGroup::new("mod", (50, 1000), 500);

        assert_eq!(group, group);
        assert_eq!(group, ExposureGroup::new("mod", (50, 1000), 500));
        assert_eq!(ExposureGroup::new("mod", (50, 1000), 500), group);

        assert_ne!(group, ExposureGroup::new("gray", (50, 1000), 500));
        assert_ne!(group, ExposureGroup::new("mod", (51, 1000), 500));
        assert_ne!(group, ExposureGroup::new("mod", (50, 999), 500));

        // An exposure adjustment alone changes structural identity
        let mut adjusted = group.clone();
        adjusted.exposure_time = 501;
        assert_ne!(group, adjusted);
    }

    #[test]
    fn test_accepts_limits_inclusive() {
        let group = ExposureGroup::new("mod", (50, 1000), 500);

        assert!(group.accepts(50));
        assert!(group.accepts(1000));
        assert!(!group.accepts(49));
        assert!(!group.accepts(1001));
    }
}
