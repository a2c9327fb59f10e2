//! # Raw Frame Set Module
//!
//! A raw frame set is a burst of raw sensor captures sharing one exposure and modulation
//! configuration. A grayscale set contains a single unmodulated frame, a four-phase modulated set
//! contains four frames at 90 degree phase offsets.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use derive_more::{Display, From};
use serde::Deserialize;

use crate::exposure::ExposureGroupId;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Value for [`RawFrameSet::modulation_frequency`] which lets the imager pick a frequency itself.
pub const MODFREQ_AUTO: u32 = 0;

/// Phase angles captured by a four-phase modulated set [degrees].
const MODULATED_4PH_ANGLES: [u16; 4] = [0, 90, 180, 270];

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Index of a [`RawFrameSet`] within its use case definition's capture sequence.
///
/// This is an ordinal position, not a stable name: any structural edit of the definition
/// invalidates previously obtained ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
pub struct RawFrameSetId(pub usize);

/// Whether a raw frame set is modulated or grayscale only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseDefinition {
    /// One unmodulated raw frame.
    Grayscale,

    /// Four raw frames captured with continuous-wave modulation.
    Modulated4PhaseCw,
}

/// Illumination signal duty cycle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyCycle {
    /// Let the imager use the duty cycle from its module configuration.
    Auto,
    Dc0,
    Dc25,
    Dc37_5,
    Dc50,
    Dc75,
    Dc100,
}

/// How a raw frame set is positioned within the measurement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Spread evenly over the measurement sequence. In a non-mixed use case only the first raw
    /// frame set is clock aligned; in a mixed-mode use case one set per frame group of the master
    /// stream is, and all other sets are placed relative to these.
    ClockAligned,

    /// Starts immediately after the previous raw frame set in the sequence.
    StartAligned,

    /// Ends immediately before the next raw frame set in the sequence.
    StopAligned,
}

/// Whether the illumination is active during grayscale captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ExposureGray {
    Off,
    On,
}

impl Default for ExposureGray {
    fn default() -> Self {
        ExposureGray::Off
    }
}

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A group of raw sensor captures sharing one exposure and phase configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrameSet {
    /// Frequency of the modulation PLL [Hz], or [`MODFREQ_AUTO`].
    pub modulation_frequency: u32,

    /// Indicates if the raw frames are modulated or gray scale only.
    pub phase_definition: PhaseDefinition,

    /// Illumination signal duty cycle configuration.
    pub duty_cycle: DutyCycle,

    /// The exposure group this set belongs to.
    pub exposure_group: ExposureGroupId,

    /// How this set is aligned within the measurement sequence.
    pub alignment: Alignment,

    /// Minimum guaranteed gap between the end of this set's last exposure and the start of the
    /// next set's first exposure [s]. Consumed by eye-safety verification.
    pub eye_safety_gap: f64,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl RawFrameSet {
    /// Create a grayscale set with the typical arguments: illumination duty cycle [`DutyCycle::Auto`]
    /// when the exposure is active, [`DutyCycle::Dc0`] otherwise.
    pub fn gray(
        exposure_group: ExposureGroupId,
        expo_on: ExposureGray,
        modulation_frequency: u32,
    ) -> Self {
        Self {
            modulation_frequency,
            phase_definition: PhaseDefinition::Grayscale,
            duty_cycle: match expo_on {
                ExposureGray::On => DutyCycle::Auto,
                ExposureGray::Off => DutyCycle::Dc0,
            },
            exposure_group,
            alignment: Alignment::StartAligned,
            eye_safety_gap: 0.,
        }
    }

    /// Create a four-phase continuous-wave modulated set.
    pub fn modulated(exposure_group: ExposureGroupId, modulation_frequency: u32) -> Self {
        Self {
            modulation_frequency,
            phase_definition: PhaseDefinition::Modulated4PhaseCw,
            duty_cycle: DutyCycle::Auto,
            exposure_group,
            alignment: Alignment::StartAligned,
            eye_safety_gap: 0.,
        }
    }

    pub fn is_modulated(&self) -> bool {
        self.phase_definition == PhaseDefinition::Modulated4PhaseCw
    }

    pub fn is_grayscale(&self) -> bool {
        self.phase_definition == PhaseDefinition::Grayscale
    }

    /// Number of raw frames captured by this set.
    pub fn raw_frame_count(&self) -> usize {
        match self.phase_definition {
            PhaseDefinition::Grayscale => 1,
            PhaseDefinition::Modulated4PhaseCw => 4,
        }
    }

    /// The phase angles of the raw frames in this set, empty for grayscale sets.
    pub fn phase_angles(&self) -> &'static [u16] {
        match self.phase_definition {
            PhaseDefinition::Grayscale => &[],
            PhaseDefinition::Modulated4PhaseCw => &MODULATED_4PH_ANGLES,
        }
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_raw_frame_counts() {
        let gray = RawFrameSet::gray(ExposureGroupId(0), ExposureGray::Off, MODFREQ_AUTO);
        let modulated = RawFrameSet::modulated(ExposureGroupId(0), 30_000_000);

        assert_eq!(gray.raw_frame_count(), 1);
        assert_eq!(modulated.raw_frame_count(), 4);

        assert!(gray.is_grayscale());
        assert!(!gray.is_modulated());
        assert!(modulated.is_modulated());

        assert!(gray.phase_angles().is_empty());
        assert_eq!(modulated.phase_angles(), &[0, 90, 180, 270]);
    }

    /// Gray sets only illuminate when the exposure is explicitly turned on.
    #[test]
    fn test_gray_duty_cycle() {
        let off = RawFrameSet::gray(ExposureGroupId(0), ExposureGray::Off, MODFREQ_AUTO);
        let on = RawFrameSet::gray(ExposureGroupId(0), ExposureGray::On, 20_200_000);

        assert_eq!(off.duty_cycle, DutyCycle::Dc0);
        assert_eq!(on.duty_cycle, DutyCycle::Auto);
    }

    /// Equality must notice a change in any single field.
    #[test]
    fn test_equality() {
        let rfs = RawFrameSet {
            modulation_frequency: 30_000_000,
            phase_definition: PhaseDefinition::Modulated4PhaseCw,
            duty_cycle: DutyCycle::Dc25,
            exposure_group: ExposureGroupId(0),
            alignment: Alignment::ClockAligned,
            eye_safety_gap: 0.,
        };

        assert_eq!(rfs, rfs.clone());

        let mut other = rfs.clone();
        other.modulation_frequency = 20_200_000;
        assert_ne!(rfs, other);

        let mut other = rfs.clone();
        other.phase_definition = PhaseDefinition::Grayscale;
        assert_ne!(rfs, other);

        let mut other = rfs.clone();
        other.duty_cycle = DutyCycle::Dc50;
        assert_ne!(rfs, other);

        let mut other = rfs.clone();
        other.exposure_group = ExposureGroupId(1);
        assert_ne!(rfs, other);

        let mut other = rfs.clone();
        other.alignment = Alignment::StartAligned;
        assert_ne!(rfs, other);

        let mut other = rfs.clone();
        other.eye_safety_gap = 1.;
        assert_ne!(rfs, other);
    }
}
