//! # Flow Control Strategy Module
//!
//! A flow control strategy picks the raw capture frame rate for a use case. Modules whose
//! transport bandwidth depends on the exposure configuration inspect the use case's exposure
//! limits; others just run at a fixed rate. The strategy is injected into the capture core, it is
//! not owned by the use case definition.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::usecase::UseCaseDefinition;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Exposure-limit boundary [us] between the fast and the slow raw frame rate. A group whose
/// upper limit reaches this value (inclusive) forces the slow rate.
pub const SLOW_EXPOSURE_THRESHOLD: u32 = 1000;

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

/// Policy selecting the raw sensor capture frame rate for a use case.
pub trait FlowControlStrategy {
    /// The raw frame rate [Hz] to program for the given use case.
    fn raw_frame_rate(&self, use_case: &UseCaseDefinition) -> u16;
}

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Always returns a configured constant rate, regardless of the use case.
pub struct FlowControlStrategyFixed {
    rate: u16,
}

/// Rate selection for modules limited to roughly 100k raw frames of bandwidth per second: long
/// exposures leave enough readout slack for the slow rate, while a use case whose exposure groups
/// are all capped below [`SLOW_EXPOSURE_THRESHOLD`] must fall back to the fast rate.
pub struct FlowControlStrategy100k {
    slow_rate: u16,
    fast_rate: u16,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl FlowControlStrategyFixed {
    pub fn new(rate: u16) -> Self {
        Self { rate }
    }
}

impl FlowControlStrategy for FlowControlStrategyFixed {
    fn raw_frame_rate(&self, _use_case: &UseCaseDefinition) -> u16 {
        self.rate
    }
}

impl FlowControlStrategy100k {
    pub fn new(slow_rate: u16, fast_rate: u16) -> Self {
        Self {
            slow_rate,
            fast_rate,
        }
    }
}

impl FlowControlStrategy for FlowControlStrategy100k {
    /// An existential scan: the first group whose upper exposure limit reaches
    /// [`SLOW_EXPOSURE_THRESHOLD`] decides for the slow rate.
    fn raw_frame_rate(&self, use_case: &UseCaseDefinition) -> u16 {
        for (_, (_, max)) in use_case.exposure_limits() {
            if max >= SLOW_EXPOSURE_THRESHOLD {
                return self.slow_rate;
            }
        }
        self.fast_rate
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;
    use crate::builder::UseCaseBuilder;
    use crate::rawframe::{ExposureGray, RawFrameSet, MODFREQ_AUTO};

    /// A one-group grayscale use case with the given exposure limits.
    fn gray_use_case(limits: (u32, u32)) -> UseCaseDefinition {
        let mut b = UseCaseBuilder::new("GrayScale", 5);
        let gray = b.exposure_group("gray", limits, limits.1).unwrap();
        b.non_mixed(vec![RawFrameSet::gray(gray, ExposureGray::Off, MODFREQ_AUTO)])
            .unwrap();
        b.build().unwrap()
    }

    /// Three groups, upper limits as given.
    fn three_group_use_case(maxes: [u32; 3]) -> UseCaseDefinition {
        let mut b = UseCaseBuilder::new("ThreeGroups", 5);
        let mut sets = Vec::new();
        for (i, &max) in maxes.iter().enumerate() {
            let group = b
                .exposure_group(&format!("mod{}", i + 1), (1, max), max)
                .unwrap();
            sets.push(RawFrameSet::modulated(group, 30_000_000));
        }
        b.non_mixed(sets).unwrap();
        b.build().unwrap()
    }

    /// Strategies must cope with a degenerate definition that has no groups at all.
    #[test]
    fn test_degenerate_use_case() {
        let empty = UseCaseDefinition::new("Empty", 5);

        assert_eq!(FlowControlStrategyFixed::new(450).raw_frame_rate(&empty), 450);
        assert_eq!(FlowControlStrategy100k::new(300, 600).raw_frame_rate(&empty), 600);
    }

    #[test]
    fn test_fixed_rate_ignores_use_case() {
        let strategy = FlowControlStrategyFixed::new(450);

        assert_eq!(strategy.raw_frame_rate(&gray_use_case((1, 100))), 450);
        assert_eq!(strategy.raw_frame_rate(&gray_use_case((1, 5000))), 450);
        assert_eq!(strategy.raw_frame_rate(&three_group_use_case([999, 999, 999])), 450);
    }

    /// The boundary is at exactly 1000 us, inclusive.
    #[test]
    fn test_100k_exposure_boundary() {
        let strategy = FlowControlStrategy100k::new(300, 600);

        assert_eq!(strategy.raw_frame_rate(&gray_use_case((1, 1000))), 300);
        assert_eq!(strategy.raw_frame_rate(&gray_use_case((1, 999))), 600);
        assert_eq!(strategy.raw_frame_rate(&gray_use_case((1, 1001))), 300);
    }

    /// One long-exposure group among short ones is enough for the slow rate.
    #[test]
    fn test_100k_is_existential_over_groups() {
        let strategy = FlowControlStrategy100k::new(300, 600);

        assert_eq!(strategy.raw_frame_rate(&three_group_use_case([999, 999, 999])), 600);
        assert_eq!(strategy.raw_frame_rate(&three_group_use_case([999, 1000, 999])), 300);
        assert_eq!(strategy.raw_frame_rate(&three_group_use_case([1000, 1000, 1000])), 300);
    }
}
