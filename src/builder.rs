//! # `UseCaseBuilder` implementation
//!
//! This module implements the assembly arena that the named capture modes are built on. The
//! builder owns a [`UseCaseDefinition`] while it is structurally incomplete; exposure groups,
//! streams and frame groups are referenced through index handles, and
//! [`UseCaseBuilder::build`] only releases the definition after it has passed validation, so an
//! inconsistent definition never reaches the imager driver.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use log::debug;

use crate::error::{Error, Result};
use crate::exposure::{ExposureGroup, ExposureGroupId};
use crate::rawframe::{Alignment, RawFrameSet, RawFrameSetId};
use crate::stream::{FrameGroupId, StreamId, DEFAULT_STREAM_ID};
use crate::usecase::UseCaseDefinition;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Assembles a [`UseCaseDefinition`] step by step.
///
/// The typical call sequence is: create the builder, create exposure groups, then either
/// [`UseCaseBuilder::non_mixed`] for a single-stream use case or a combination of
/// [`UseCaseBuilder::stream`] and [`UseCaseBuilder::frame_group`] for mixed-mode ones, and
/// finally [`UseCaseBuilder::build`].
pub struct UseCaseBuilder {
    def: UseCaseDefinition,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl UseCaseBuilder {
    /// Start a definition with the given type name and maximum frame rate [Hz]. The minimum
    /// rate is fixed at 1 and the target rate starts out at `max_rate`.
    pub fn new(type_name: &str, max_rate: u16) -> Self {
        Self {
            def: UseCaseDefinition::new(type_name, max_rate),
        }
    }

    /// Set the size of the region of interest delivered to processing.
    pub fn image(mut self, columns: u16, rows: u16) -> Self {
        self.def.image_columns = columns;
        self.def.image_rows = rows;

        self
    }

    /// Set a target rate below the maximum rate given to [`UseCaseBuilder::new`].
    pub fn target_rate(mut self, rate: u16) -> Self {
        self.def.target_rate = rate;

        self
    }

    /// Create a new exposure group and return its index. Group names must be unique within one
    /// definition.
    pub fn exposure_group(
        &mut self,
        name: &str,
        limits: (u32, u32),
        exposure_time: u32,
    ) -> Result<ExposureGroupId> {
        if self.def.exposure_groups.iter().any(|g| g.name == name) {
            return Err(Error::DuplicateExposureGroup(name.to_owned()));
        }

        self.def
            .exposure_groups
            .push(ExposureGroup::new(name, limits, exposure_time));

        Ok(ExposureGroupId(self.def.exposure_groups.len() - 1))
    }

    /// Create a new stream with an automatically allocated id: the first stream gets
    /// [`DEFAULT_STREAM_ID`], further ones count upwards from the highest id in use.
    pub fn stream(&mut self) -> Result<StreamId> {
        let id = if self.def.streams.is_empty() {
            DEFAULT_STREAM_ID
        } else {
            let highest = self
                .def
                .streams
                .iter()
                .map(|s| s.id())
                .max()
                .unwrap_or(DEFAULT_STREAM_ID);
            highest.checked_add(1).ok_or(Error::StreamIdsExhausted)?
        };

        self.stream_with_id(id)
    }

    /// Create a new stream with an explicit id. Zero is reserved and rejected, as is any id
    /// already in use.
    pub fn stream_with_id(&mut self, id: StreamId) -> Result<StreamId> {
        if id == 0 {
            return Err(Error::InvalidUseCase("stream id 0 is not valid".into()));
        }
        if self.def.streams.iter().any(|s| s.id() == id) {
            return Err(Error::DuplicateStream(id));
        }

        self.def.streams.push(crate::stream::Stream::new(id));

        Ok(id)
    }

    /// Append the given raw frame sets to the definition's capture sequence and reference them
    /// from a new frame group of `stream`.
    ///
    /// The sets' alignments are overwritten according to `alignment`: a clock-aligned group gets
    /// its first set clock aligned and the rest start aligned; start- and stop-aligned groups tag
    /// every set accordingly. The very first raw frame set of a definition must be clock aligned,
    /// since the rest of the sequence is placed relative to it.
    pub fn frame_group(
        &mut self,
        stream: StreamId,
        sets: Vec<RawFrameSet>,
        alignment: Alignment,
    ) -> Result<FrameGroupId> {
        self.push_group(stream, sets, alignment, false)
    }

    /// Append the given sets to `stream`'s most recent frame group instead of creating a new
    /// one. This supports interleaved use cases whose frame groups are assembled in two steps.
    pub fn append_to_last_group(
        &mut self,
        stream: StreamId,
        sets: Vec<RawFrameSet>,
        alignment: Alignment,
    ) -> Result<FrameGroupId> {
        self.push_group(stream, sets, alignment, true)
    }

    /// Convenience for non-mixed use cases: creates the single default stream and one
    /// clock-aligned frame group containing all of `sets`. Must be the first structural call on
    /// this builder.
    pub fn non_mixed(&mut self, sets: Vec<RawFrameSet>) -> Result<StreamId> {
        if !self.def.streams.is_empty() {
            return Err(Error::InvalidUseCase(
                "non-mixed assembly requires that no stream exists yet".into(),
            ));
        }
        if !self.def.raw_frame_sets.is_empty() {
            return Err(Error::InvalidUseCase(
                "non-mixed assembly requires an empty capture sequence".into(),
            ));
        }

        let stream = self.stream_with_id(DEFAULT_STREAM_ID)?;
        self.frame_group(stream, sets, Alignment::ClockAligned)?;

        Ok(stream)
    }

    /// Validate the assembled definition and hand it over.
    pub fn build(self) -> Result<UseCaseDefinition> {
        self.def.validate()?;

        debug!(
            "assembled use case {:?}: {} raw frame sets, {} raw frames, {} stream(s)",
            self.def.type_name(),
            self.def.raw_frame_sets().len(),
            self.def.raw_frame_count(),
            self.def.stream_ids().len()
        );

        Ok(self.def)
    }

    fn push_group(
        &mut self,
        stream: StreamId,
        sets: Vec<RawFrameSet>,
        alignment: Alignment,
        append: bool,
    ) -> Result<FrameGroupId> {
        let first_idx = self.def.raw_frame_sets.len();
        if first_idx == 0 && alignment != Alignment::ClockAligned {
            return Err(Error::InvalidUseCase(
                "the first raw frame set of a use case must be clock aligned".into(),
            ));
        }

        // Resolve the target group before touching the capture sequence, so a bad stream id
        // cannot leave orphaned sets behind
        let target = self.def.stream(stream)?;
        let group = if append {
            match target.frame_groups().len() {
                0 => return Err(Error::UnknownFrameGroup { stream, group: 0 }),
                n => FrameGroupId(n - 1),
            }
        } else {
            self.def.stream_mut(stream)?.create_frame_group()
        };

        let mut ids = Vec::with_capacity(sets.len());
        for (i, mut set) in sets.into_iter().enumerate() {
            set.alignment = match alignment {
                Alignment::ClockAligned if i == 0 => Alignment::ClockAligned,
                Alignment::StopAligned => Alignment::StopAligned,
                _ => Alignment::StartAligned,
            };
            self.def.raw_frame_sets.push(set);
            ids.push(RawFrameSetId(first_idx + i));
        }

        let target = self.def.stream_mut(stream)?;
        let frame_group = target
            .frame_group_mut(group)
            .ok_or(Error::UnknownFrameGroup {
                stream,
                group: group.0,
            })?;
        for id in ids {
            frame_group.add_frame_set(id);
        }

        Ok(group)
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
