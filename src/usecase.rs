//! # Use Case Definition Module
//!
//! A use case definition describes one capture mode of a time-of-flight camera: which exposure
//! groups exist, which raw frame sets are captured in sequence, and how those sets are grouped
//! into the streams delivered to consumers. The imager driver reads it to program hardware
//! timing, the processing pipeline reads it to map captured raw frames onto output streams, and
//! the auto-exposure controller adjusts exposure times through it.
//!
//! A definition is assembled once per capture-mode selection (see [`crate::UseCaseBuilder`] and
//! [`crate::modes`]) and is structurally immutable afterwards; only exposure times, the target
//! rate and duty cycles can be adjusted, and every setter takes `&mut self` so that concurrent
//! readers are excluded by the borrow checker rather than by a lock.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::exposure::{ExposureGroup, ExposureGroupId};
use crate::rawframe::{DutyCycle, RawFrameSet, RawFrameSetId};
use crate::stream::{Stream, StreamId};

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Raw frame counters on the pseudo-data path are 12 bit wide; a sequence at or beyond this many
/// frames could wrap within one capture cycle and confuse frame reordering.
const MAX_RAW_FRAMES: usize = 2047;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// The sequence structure, frame rates and exposure configuration of one capture mode.
#[derive(Debug, Clone, PartialEq)]
pub struct UseCaseDefinition {
    pub(crate) type_name: String,
    pub(crate) target_rate: u16,
    pub(crate) min_rate: u16,
    pub(crate) max_rate: u16,
    pub(crate) image_columns: u16,
    pub(crate) image_rows: u16,
    pub(crate) exposure_groups: Vec<ExposureGroup>,
    pub(crate) raw_frame_sets: Vec<RawFrameSet>,
    pub(crate) streams: Vec<Stream>,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl UseCaseDefinition {
    /// Create an empty definition with the given rate limit. The minimum allowed rate is 1 and
    /// the target rate starts at `max_rate`; [`UseCaseDefinition::validate`] will reject the
    /// definition until streams and frames have been added.
    pub(crate) fn new<S: Into<String>>(type_name: S, max_rate: u16) -> Self {
        Self {
            type_name: type_name.into(),
            target_rate: max_rate,
            min_rate: 1,
            max_rate,
            image_columns: 0,
            image_rows: 0,
            exposure_groups: Vec::new(),
            raw_frame_sets: Vec::new(),
            streams: Vec::new(),
        }
    }

    /// Human readable name of the capture mode, for debugging and log files. Not necessarily
    /// unique per device.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The rate [Hz] that clock-aligned raw frame sets aim for.
    pub fn target_rate(&self) -> u16 {
        self.target_rate
    }

    /// The minimal rate allowed for this use case [Hz].
    pub fn min_rate(&self) -> u16 {
        self.min_rate
    }

    /// The maximal rate allowed for this use case [Hz].
    pub fn max_rate(&self) -> u16 {
        self.max_rate
    }

    /// Width and height of the region of interest delivered to processing.
    pub fn image(&self) -> (u16, u16) {
        (self.image_columns, self.image_rows)
    }

    /// All exposure groups of this definition, in creation order.
    pub fn exposure_groups(&self) -> &[ExposureGroup] {
        &self.exposure_groups
    }

    /// Look up an exposure group by name.
    pub fn exposure_group(&self, name: &str) -> Option<&ExposureGroup> {
        self.exposure_groups.iter().find(|g| g.name == name)
    }

    /// The exposure limits of every group as `(name, (min, max))` pairs, in group order.
    ///
    /// This is computed from the live groups on every call, never from a snapshot, so it reflects
    /// adjustments made since construction. Flow-control and eye-safety logic iterate this.
    pub fn exposure_limits(&self) -> Vec<(&str, (u32, u32))> {
        self.exposure_groups
            .iter()
            .map(|g| (g.name.as_str(), g.exposure_limits))
            .collect()
    }

    /// The current exposure time of every group [us], in group order.
    pub fn exposure_times(&self) -> Vec<u32> {
        self.exposure_groups.iter().map(|g| g.exposure_time).collect()
    }

    /// The current exposure time [us] of the group that `set` belongs to.
    ///
    /// `set` must be part of this definition; a foreign set with a dangling group index is a
    /// caller error and will panic.
    pub fn exposure_time_for_set(&self, set: &RawFrameSet) -> u32 {
        debug_assert!(set.exposure_group.0 < self.exposure_groups.len());
        self.exposure_groups[set.exposure_group.0].exposure_time
    }

    /// The exposure range accepted by every modulated raw frame set of the given stream, i.e. the
    /// intersection of the limits of their exposure groups. Grayscale sets are ignored.
    pub fn stream_exposure_limits(&self, stream: StreamId) -> Result<(u32, u32)> {
        let set_ids = self.raw_frame_set_indices(stream, 0)?;
        if set_ids.is_empty() {
            return Err(Error::NoExposureLimits(stream));
        }

        let mut limits = (u32::min_value(), u32::max_value());
        for id in set_ids {
            let set = &self.raw_frame_sets[id.0];
            if set.is_modulated() {
                let group = &self.exposure_groups[set.exposure_group.0];
                limits.0 = limits.0.max(group.exposure_limits.0);
                limits.1 = limits.1.min(group.exposure_limits.1);
            }
        }

        if limits.0 > limits.1 {
            return Err(Error::NoExposureLimits(stream));
        }

        Ok(limits)
    }

    /// All raw frame sets of this definition, in capture-sequence order, regardless of which
    /// stream each set belongs to. Indexable by [`RawFrameSetId`].
    pub fn raw_frame_sets(&self) -> &[RawFrameSet] {
        &self.raw_frame_sets
    }

    /// Total number of raw frames captured per cycle, summed over every frame group of every
    /// stream. A raw frame set referenced more than once counts once per reference, which is what
    /// bandwidth and timing calculations need.
    pub fn raw_frame_count(&self) -> usize {
        self.streams
            .iter()
            .flat_map(|s| s.frame_groups())
            .flat_map(|g| g.frame_set_ids())
            .map(|id| self.raw_frame_sets[id.0].raw_frame_count())
            .sum()
    }

    /// The ids of all streams, in creation order.
    pub fn stream_ids(&self) -> Vec<StreamId> {
        self.streams.iter().map(|s| s.id()).collect()
    }

    /// Fetch the stream with the given id.
    pub fn stream(&self, id: StreamId) -> Result<&Stream> {
        self.streams
            .iter()
            .find(|s| s.id() == id)
            .ok_or(Error::UnknownStream(id))
    }

    pub(crate) fn stream_mut(&mut self, id: StreamId) -> Result<&mut Stream> {
        self.streams
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(Error::UnknownStream(id))
    }

    /// Number of frame groups in the given stream.
    pub fn frame_group_count(&self, stream: StreamId) -> Result<usize> {
        Ok(self.stream(stream)?.frame_groups().len())
    }

    /// The raw-frame-set ids referenced by one frame group of the given stream, in capture order.
    ///
    /// All frame groups of a stream have the same structure, so callers that only need
    /// per-stream information can always pass `group` 0.
    pub fn raw_frame_set_indices(
        &self,
        stream: StreamId,
        group: usize,
    ) -> Result<Vec<RawFrameSetId>> {
        let s = self.stream(stream)?;
        let frame_group = s
            .frame_groups()
            .get(group)
            .ok_or(Error::UnknownFrameGroup { stream, group })?;
        Ok(frame_group.frame_set_ids().to_vec())
    }

    /// The exposure group ids used by any frame group of the given stream, one entry per raw
    /// frame set in the group. Duplicates appear when sets share an exposure group.
    pub fn exposure_indices_for_stream(&self, stream: StreamId) -> Result<Vec<ExposureGroupId>> {
        Ok(self
            .raw_frame_set_indices(stream, 0)?
            .iter()
            .map(|id| self.raw_frame_sets[id.0].exposure_group)
            .collect())
    }

    /// Positions of the given set's raw frames in a depth-first traversal of the capture
    /// sequence. For a 1+4 sequence, set 0 yields `[0]` and set 1 yields `[1, 2, 3, 4]`.
    pub fn sequence_indices(&self, set: RawFrameSetId) -> Result<Vec<u16>> {
        if set.0 >= self.raw_frame_sets.len() {
            return Err(Error::UnknownRawFrameSet(set.0));
        }

        let first: usize = self.raw_frame_sets[..set.0]
            .iter()
            .map(RawFrameSet::raw_frame_count)
            .sum();

        Ok((0..self.raw_frame_sets[set.0].raw_frame_count())
            .map(|i| (first + i) as u16)
            .collect())
    }

    /// Set the target rate [Hz] for clock-aligned raw frame sets. Must stay within the rate
    /// limits fixed at construction.
    pub fn set_target_rate(&mut self, rate: u16) -> Result<()> {
        if rate < self.min_rate || rate > self.max_rate {
            return Err(Error::TargetRateOutOfRange {
                rate,
                min: self.min_rate,
                max: self.max_rate,
            });
        }
        self.target_rate = rate;
        Ok(())
    }

    /// Set the exposure time [us] of one named group. This is the auto-exposure entry point; the
    /// new time must lie within the group's limits.
    pub fn set_exposure_time(&mut self, group: &str, time: u32) -> Result<()> {
        let group = self
            .exposure_groups
            .iter_mut()
            .find(|g| g.name == group)
            .ok_or_else(|| Error::UnknownExposureGroup(group.to_owned()))?;

        if !group.accepts(time) {
            return Err(Error::ExposureOutOfLimits {
                group: group.name.clone(),
                time,
                limits: group.exposure_limits,
            });
        }

        group.exposure_time = time;
        Ok(())
    }

    /// Set the exposure time [us] for every modulated raw frame set of one stream. Grayscale
    /// sets keep their configured time. Nothing is changed unless the time is acceptable to all
    /// affected groups.
    pub fn set_stream_exposure_time(&mut self, stream: StreamId, time: u32) -> Result<()> {
        let group_ids: Vec<ExposureGroupId> = self
            .raw_frame_set_indices(stream, 0)?
            .iter()
            .map(|id| &self.raw_frame_sets[id.0])
            .filter(|set| set.is_modulated())
            .map(|set| set.exposure_group)
            .collect();

        for id in &group_ids {
            let group = &self.exposure_groups[id.0];
            if !group.accepts(time) {
                return Err(Error::ExposureOutOfLimits {
                    group: group.name.clone(),
                    time,
                    limits: group.exposure_limits,
                });
            }
        }

        for id in group_ids {
            self.exposure_groups[id.0].exposure_time = time;
        }
        Ok(())
    }

    /// Set the exposure time of every group at once, in the order given by
    /// [`UseCaseDefinition::exposure_groups`]. Nothing is changed unless every time is within its
    /// group's limits.
    pub fn set_exposure_times(&mut self, times: &[u32]) -> Result<()> {
        if times.len() != self.exposure_groups.len() {
            return Err(Error::ExposureTimesMismatch {
                expected: self.exposure_groups.len(),
                actual: times.len(),
            });
        }

        for (group, &time) in self.exposure_groups.iter().zip(times) {
            if !group.accepts(time) {
                return Err(Error::ExposureOutOfLimits {
                    group: group.name.clone(),
                    time,
                    limits: group.exposure_limits,
                });
            }
        }

        for (group, &time) in self.exposure_groups.iter_mut().zip(times) {
            group.exposure_time = time;
        }
        Ok(())
    }

    /// Set the illumination duty cycle of every raw frame set. Only the discrete settings
    /// supported by the illumination driver are accepted: 0, 25, 37.5, 50, 75 or 100 percent.
    pub fn set_duty_cycle(&mut self, percent: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(Error::UnsupportedDutyCycle(percent));
        }

        let duty_cycle = match (percent * 100.0) as u32 {
            0 => DutyCycle::Dc0,
            2500 => DutyCycle::Dc25,
            3750 => DutyCycle::Dc37_5,
            5000 => DutyCycle::Dc50,
            7500 => DutyCycle::Dc75,
            10000 => DutyCycle::Dc100,
            _ => return Err(Error::UnsupportedDutyCycle(percent)),
        };

        for set in &mut self.raw_frame_sets {
            set.duty_cycle = duty_cycle;
        }
        Ok(())
    }

    /// Consistency checks for the assembled structure: at least one stream, at least one frame
    /// group per stream, every referenced index in bounds, all frame groups of a stream
    /// structurally identical, exposure times within their limits, and so on.
    ///
    /// The named mode constructors run this before returning, so a definition obtained from them
    /// is always consistent; callers assembling definitions through [`crate::UseCaseBuilder`]
    /// get the same check from [`crate::UseCaseBuilder::build`].
    pub fn validate(&self) -> Result<()> {
        if self.type_name.is_empty() {
            return Err(invalid("unnamed use case"));
        }
        if self.target_rate > self.max_rate || self.min_rate > self.max_rate {
            return Err(invalid(format!(
                "target rate {} Hz outside the allowed range {}..={} Hz",
                self.target_rate, self.min_rate, self.max_rate
            )));
        }
        if self.raw_frame_sets.is_empty() {
            return Err(invalid("no raw frame sets"));
        }
        if self.streams.is_empty() {
            return Err(invalid("no streams"));
        }
        if self.exposure_groups.is_empty() {
            return Err(invalid("no exposure groups"));
        }

        let mut group_used = vec![false; self.exposure_groups.len()];
        for set in &self.raw_frame_sets {
            match group_used.get_mut(set.exposure_group.0) {
                Some(used) => *used = true,
                None => {
                    return Err(invalid(format!(
                        "raw frame set references out-of-bounds exposure group {}",
                        set.exposure_group
                    )))
                }
            }
        }
        if let Some(idx) = group_used.iter().position(|used| !used) {
            return Err(invalid(format!(
                "exposure group {:?} is not referenced by any raw frame set",
                self.exposure_groups[idx].name
            )));
        }

        let mut names = HashSet::new();
        for group in &self.exposure_groups {
            if group.name.is_empty() {
                return Err(invalid("unnamed exposure group"));
            }
            if !names.insert(group.name.as_str()) {
                return Err(invalid(format!("duplicate exposure group {:?}", group.name)));
            }
            if group.exposure_limits.0 > group.exposure_limits.1 {
                return Err(invalid(format!(
                    "exposure limits of group {:?} are reversed",
                    group.name
                )));
            }
            if !group.accepts(group.exposure_time) {
                return Err(invalid(format!(
                    "exposure time {} us of group {:?} is outside its limits {:?}",
                    group.exposure_time, group.name, group.exposure_limits
                )));
            }
        }

        let mut stream_ids = HashSet::new();
        for stream in &self.streams {
            if stream.id() == 0 {
                return Err(invalid("stream id 0 is not valid"));
            }
            if !stream_ids.insert(stream.id()) {
                return Err(invalid(format!("duplicate stream id {:#x}", stream.id())));
            }

            let groups = stream.frame_groups();
            let first = match groups.first() {
                Some(g) => g,
                None => {
                    return Err(invalid(format!(
                        "stream {:#x} has no frame groups",
                        stream.id()
                    )))
                }
            };
            if first.is_empty() {
                return Err(invalid(format!(
                    "empty frame group in stream {:#x}",
                    stream.id()
                )));
            }

            for group in groups {
                for id in group.frame_set_ids() {
                    if id.0 >= self.raw_frame_sets.len() {
                        return Err(invalid(format!(
                            "frame group references out-of-bounds raw frame set {}",
                            id
                        )));
                    }
                }
            }

            // Every frame group of a stream must capture the same sequence of set
            // configurations, otherwise the frames cannot be combined into one output
            for group in &groups[1..] {
                let same = group.len() == first.len()
                    && first
                        .frame_set_ids()
                        .iter()
                        .zip(group.frame_set_ids())
                        .all(|(a, b)| self.raw_frame_sets[a.0] == self.raw_frame_sets[b.0]);
                if !same {
                    return Err(invalid(format!(
                        "mismatched frame groups in stream {:#x}",
                        stream.id()
                    )));
                }
            }
        }

        // Counting frames dereferences the set ids, so this has to run after the bounds checks
        if self.raw_frame_count() >= MAX_RAW_FRAMES {
            return Err(invalid(format!(
                "{} raw frames per cycle cannot be tracked by 12-bit frame counters",
                self.raw_frame_count()
            )));
        }

        Ok(())
    }
}

// -----------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// -----------------------------------------------------------------------------------------------

fn invalid<S: Into<String>>(reason: S) -> Error {
    Error::InvalidUseCase(reason.into())
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;
    use crate::builder::UseCaseBuilder;
    use crate::rawframe::{ExposureGray, MODFREQ_AUTO};
    use crate::stream::{FrameGroupId, DEFAULT_STREAM_ID};

    /// A minimal modulated-plus-gray use case, the smallest shape that passes validation.
    fn small_use_case() -> UseCaseDefinition {
        let mut b = UseCaseBuilder::new("FourPhase", 45).image(176, 120);
        let modulation = b.exposure_group("mod", (50, 1000), 1000).unwrap();
        let gray = b.exposure_group("gray", (50, 1000), 1000).unwrap();
        b.non_mixed(vec![
            RawFrameSet::modulated(modulation, 30_000_000),
            RawFrameSet::gray(gray, ExposureGray::Off, MODFREQ_AUTO),
        ])
        .unwrap();
        b.build().unwrap()
    }

    #[test]
    fn test_validate_accepts_small_use_case() {
        assert!(small_use_case().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_stream() {
        let mut ucd = small_use_case();
        ucd.streams.push(Stream::new(DEFAULT_STREAM_ID + 1));
        assert!(matches!(ucd.validate(), Err(Error::InvalidUseCase(_))));
    }

    #[test]
    fn test_validate_rejects_mismatched_frame_group() {
        let mut ucd = small_use_case();
        // A second frame group with only the modulated set differs from the first
        let group = ucd.streams[0].create_frame_group();
        ucd.streams[0]
            .frame_group_mut(group)
            .unwrap()
            .add_frame_set(RawFrameSetId(0));
        assert!(matches!(ucd.validate(), Err(Error::InvalidUseCase(_))));
    }

    #[test]
    fn test_validate_rejects_empty_frame_group() {
        let mut ucd = small_use_case();
        ucd.streams[0].create_frame_group();
        assert!(matches!(ucd.validate(), Err(Error::InvalidUseCase(_))));
    }

    #[test]
    fn test_validate_rejects_excessive_target_rate() {
        let mut ucd = small_use_case();
        ucd.target_rate = ucd.max_rate + 1;
        assert!(matches!(ucd.validate(), Err(Error::InvalidUseCase(_))));
    }

    #[test]
    fn test_validate_rejects_dangling_exposure_group() {
        let mut ucd = small_use_case();
        ucd.raw_frame_sets[1].exposure_group = ExposureGroupId(2);
        assert!(matches!(ucd.validate(), Err(Error::InvalidUseCase(_))));
    }

    #[test]
    fn test_validate_rejects_unused_exposure_group() {
        let mut ucd = small_use_case();
        for set in &mut ucd.raw_frame_sets {
            set.exposure_group = ExposureGroupId(0);
        }
        assert!(matches!(ucd.validate(), Err(Error::InvalidUseCase(_))));
    }

    #[test]
    fn test_validate_rejects_dangling_raw_frame_set() {
        let mut ucd = small_use_case();
        ucd.streams[0]
            .frame_group_mut(FrameGroupId(0))
            .unwrap()
            .add_frame_set(RawFrameSetId(9));
        assert!(matches!(ucd.validate(), Err(Error::InvalidUseCase(_))));
    }

    #[test]
    fn test_sequence_indices() {
        let ucd = small_use_case();

        assert_eq!(ucd.sequence_indices(RawFrameSetId(0)).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(ucd.sequence_indices(RawFrameSetId(1)).unwrap(), vec![4]);
        assert!(matches!(
            ucd.sequence_indices(RawFrameSetId(2)),
            Err(Error::UnknownRawFrameSet(2))
        ));
    }

    #[test]
    fn test_raw_frame_count_counts_each_reference() {
        let mut ucd = small_use_case();
        assert_eq!(ucd.raw_frame_count(), 5);

        // Referencing the gray set a second time adds one more frame to the cycle even though
        // no new raw frame set exists
        ucd.streams[0]
            .frame_group_mut(FrameGroupId(0))
            .unwrap()
            .add_frame_set(RawFrameSetId(1));
        assert_eq!(ucd.raw_frame_sets().len(), 2);
        assert_eq!(ucd.raw_frame_count(), 6);
    }

    #[test]
    fn test_exposure_limits_reflect_live_groups() {
        let ucd = small_use_case();
        assert_eq!(
            ucd.exposure_limits(),
            vec![("mod", (50, 1000)), ("gray", (50, 1000))]
        );

        let mut narrowed = ucd.clone();
        narrowed.exposure_groups[0].exposure_limits = (50, 400);
        assert_eq!(
            narrowed.exposure_limits(),
            vec![("mod", (50, 400)), ("gray", (50, 1000))]
        );
    }

    #[test]
    fn test_stream_exposure_limits_intersection() {
        let mut b = UseCaseBuilder::new("TwoRanges", 10);
        let m1 = b.exposure_group("m1", (50, 1000), 500).unwrap();
        let m2 = b.exposure_group("m2", (100, 800), 500).unwrap();
        b.non_mixed(vec![
            RawFrameSet::modulated(m1, 30_000_000),
            RawFrameSet::modulated(m2, 20_200_000),
        ])
        .unwrap();
        let ucd = b.build().unwrap();

        assert_eq!(
            ucd.stream_exposure_limits(DEFAULT_STREAM_ID).unwrap(),
            (100, 800)
        );
    }

    #[test]
    fn test_set_exposure_time() {
        let mut ucd = small_use_case();

        ucd.set_exposure_time("mod", 321).unwrap();
        assert_eq!(ucd.exposure_group("mod").unwrap().exposure_time, 321);
        assert_eq!(ucd.exposure_times(), vec![321, 1000]);

        assert!(matches!(
            ucd.set_exposure_time("mod", 1001),
            Err(Error::ExposureOutOfLimits { .. })
        ));
        assert!(matches!(
            ucd.set_exposure_time("nope", 500),
            Err(Error::UnknownExposureGroup(_))
        ));
    }

    #[test]
    fn test_set_stream_exposure_time_only_touches_modulated_groups() {
        let mut ucd = small_use_case();

        ucd.set_stream_exposure_time(DEFAULT_STREAM_ID, 200).unwrap();
        assert_eq!(ucd.exposure_group("mod").unwrap().exposure_time, 200);
        assert_eq!(ucd.exposure_group("gray").unwrap().exposure_time, 1000);
    }

    #[test]
    fn test_set_exposure_times_is_all_or_nothing() {
        let mut ucd = small_use_case();

        assert!(matches!(
            ucd.set_exposure_times(&[500]),
            Err(Error::ExposureTimesMismatch { .. })
        ));

        // Second entry is out of limits, so the first must not be applied either
        assert!(ucd.set_exposure_times(&[500, 1001]).is_err());
        assert_eq!(ucd.exposure_times(), vec![1000, 1000]);

        ucd.set_exposure_times(&[500, 600]).unwrap();
        assert_eq!(ucd.exposure_times(), vec![500, 600]);
    }

    #[test]
    fn test_exposure_time_for_set() {
        let mut ucd = small_use_case();
        ucd.set_exposure_time("gray", 123).unwrap();

        let gray = ucd.raw_frame_sets()[1].clone();
        assert_eq!(ucd.exposure_time_for_set(&gray), 123);
    }

    #[test]
    fn test_set_target_rate_respects_limits() {
        let mut ucd = small_use_case();

        ucd.set_target_rate(30).unwrap();
        assert_eq!(ucd.target_rate(), 30);

        assert!(matches!(
            ucd.set_target_rate(46),
            Err(Error::TargetRateOutOfRange { .. })
        ));
        assert!(matches!(
            ucd.set_target_rate(0),
            Err(Error::TargetRateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_set_duty_cycle() {
        let mut ucd = small_use_case();

        for &(percent, expected) in &[
            (0.0, DutyCycle::Dc0),
            (25.0, DutyCycle::Dc25),
            (37.5, DutyCycle::Dc37_5),
            (50.0, DutyCycle::Dc50),
            (75.0, DutyCycle::Dc75),
            (100.0, DutyCycle::Dc100),
        ] {
            ucd.set_duty_cycle(percent).unwrap();
            assert!(ucd.raw_frame_sets().iter().all(|s| s.duty_cycle == expected));
        }

        assert!(matches!(
            ucd.set_duty_cycle(24.999),
            Err(Error::UnsupportedDutyCycle(_))
        ));
    }
}
