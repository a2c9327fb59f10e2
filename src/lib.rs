//! # Time-of-Flight use case scheduling
//!
//! This crate models the capture modes ("use cases") of time-of-flight depth cameras: how raw
//! sensor exposures are grouped into raw frame sets, frame groups and output streams, under
//! per-group exposure-time limits and a raw-frame-rate budget. The resulting
//! [`UseCaseDefinition`] is pure data — it is consumed by an imager driver to program hardware
//! timing and by a processing pipeline to map captured raw frames onto output streams, but it
//! performs no hardware access itself.
//!
//! ## Model
//!
//! - An [`ExposureGroup`] is a named exposure-time constraint (limits plus current value).
//! - A [`RawFrameSet`] is a burst of raw captures sharing one exposure/phase configuration.
//! - A [`FrameGroup`] is an ordered cycle of raw-frame-set references executed repeatedly.
//! - A [`Stream`] is one independently consumable output channel built from frame groups.
//! - A [`UseCaseDefinition`] aggregates all of the above for one capture mode and validates the
//!   structure before it can reach a driver.
//! - A [`FlowControlStrategy`] picks the raw capture frame rate from the exposure limits.
//!
//! ## Usage
//!
//! Use cases are normally obtained from the named constructors in [`modes`], either with
//! parameters from code or loaded from a preset file:
//!
//! ```rust
//! use tof_usecase::prelude::*;
//! use tof_usecase::modes::{self, GrayScaleParams};
//!
//! let mut use_case = modes::gray_scale(&GrayScaleParams {
//!     target_rate: 30,
//!     exposure_limits: (1, 1000),
//!     exposure_gray: 500,
//!     expo_on_for_gray: ExposureGray::Off,
//!     image: (176, 120),
//! })
//! .expect("Failed to assemble the grayscale use case");
//!
//! // A bandwidth-limited module picks its raw frame rate from the exposure limits
//! let strategy = FlowControlStrategy100k::new(300, 600);
//! assert_eq!(strategy.raw_frame_rate(&use_case), 300);
//!
//! // Auto-exposure adjusts a group within its limits
//! use_case
//!     .set_exposure_time("gray", 800)
//!     .expect("Exposure time is within the configured limits");
//! ```
//!
//! Additional modes can be assembled with [`UseCaseBuilder`], which hands out index handles for
//! exposure groups, streams and frame groups and refuses to release a definition that fails
//! validation.
//!
//! ## Threading
//!
//! None of these types lock internally. A built definition is read-mostly shared data: share it
//! by reference with any number of consumers, and route the occasional exposure-time update
//! through the single `&mut` holder (typically the auto-exposure loop).

#[deny(missing_docs)]

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use crate::builder::UseCaseBuilder;
pub use crate::error::{Error, Result};
pub use crate::exposure::{ExposureGroup, ExposureGroupId};
pub use crate::flow::{
    FlowControlStrategy, FlowControlStrategy100k, FlowControlStrategyFixed,
    SLOW_EXPOSURE_THRESHOLD,
};
pub use crate::rawframe::{
    Alignment, DutyCycle, ExposureGray, PhaseDefinition, RawFrameSet, RawFrameSetId, MODFREQ_AUTO,
};
pub use crate::stream::{
    FrameGroup, FrameGroupId, Stream, StreamId, DEFAULT_STREAM_ID, MAX_STREAMS,
};
pub use crate::usecase::UseCaseDefinition;

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

mod builder;
mod error;
mod exposure;
mod flow;
pub mod modes;
mod rawframe;
mod stream;
mod usecase;

pub mod prelude {
    pub use crate::{Error, Result};
    pub use crate::{ExposureGroup, ExposureGroupId};
    pub use crate::{
        Alignment, DutyCycle, ExposureGray, PhaseDefinition, RawFrameSet, RawFrameSetId,
        MODFREQ_AUTO,
    };
    pub use crate::{FrameGroup, FrameGroupId, Stream, StreamId, DEFAULT_STREAM_ID, MAX_STREAMS};
    pub use crate::{UseCaseBuilder, UseCaseDefinition};
    pub use crate::{
        FlowControlStrategy, FlowControlStrategy100k, FlowControlStrategyFixed,
        SLOW_EXPOSURE_THRESHOLD,
    };
}
