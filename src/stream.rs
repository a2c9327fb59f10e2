//! # Stream and Frame Group Module
//!
//! A stream is one independently consumable output channel of a use case (for example a depth
//! stream next to a grayscale stream). Each stream cycles through an ordered list of frame
//! groups; a frame group is an ordered list of raw-frame-set references executed as one burst.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use derive_more::{Display, From};

use crate::rawframe::RawFrameSetId;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Identifier for one stream of a use case. Zero is not a valid id.
pub type StreamId = u16;

/// The id given to the first stream of a use case.
pub const DEFAULT_STREAM_ID: StreamId = 0xdefa;

/// Conventional upper bound on the number of streams per use case. Not enforced by
/// [`crate::UseCaseDefinition`] itself; callers assembling definitions must check it.
pub const MAX_STREAMS: usize = 3;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Index of a [`FrameGroup`] within its stream.
///
/// Handed out by [`Stream::create_frame_group`] instead of a reference, so that growing the
/// stream's storage can never invalidate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
pub struct FrameGroupId(pub usize);

/// An ordered sequence of raw-frame-set references captured as one repeatable cycle unit.
///
/// The same id may legitimately appear more than once, within one group or across groups, when an
/// exposure/phase configuration is reused for bandwidth reasons; duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameGroup {
    frame_set_ids: Vec<RawFrameSetId>,
}

/// One output channel of a use case, built from an ordered sequence of frame groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub(crate) id: StreamId,
    pub(crate) frame_groups: Vec<FrameGroup>,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl FrameGroup {
    /// Append a raw-frame-set reference. Insertion order is capture order.
    pub fn add_frame_set(&mut self, id: RawFrameSetId) {
        self.frame_set_ids.push(id);
    }

    /// The referenced set ids in capture order, including any duplicates.
    pub fn frame_set_ids(&self) -> &[RawFrameSetId] {
        &self.frame_set_ids
    }

    pub fn is_empty(&self) -> bool {
        self.frame_set_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frame_set_ids.len()
    }
}

impl Stream {
    pub(crate) fn new(id: StreamId) -> Self {
        Self {
            id,
            frame_groups: Vec::new(),
        }
    }

    pub fn id(&self) -> StreamId {
        self.id
    }

    /// Append a new empty frame group and return its index handle.
    pub fn create_frame_group(&mut self) -> FrameGroupId {
        self.frame_groups.push(FrameGroup::default());
        FrameGroupId(self.frame_groups.len() - 1)
    }

    pub fn frame_groups(&self) -> &[FrameGroup] {
        &self.frame_groups
    }

    pub fn frame_group(&self, id: FrameGroupId) -> Option<&FrameGroup> {
        self.frame_groups.get(id.0)
    }

    pub(crate) fn frame_group_mut(&mut self, id: FrameGroupId) -> Option<&mut FrameGroup> {
        self.frame_groups.get_mut(id.0)
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
