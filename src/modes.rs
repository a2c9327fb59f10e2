//! # Named Capture Modes
//!
//! This module provides the canonical capture modes as pure constructor functions: each one
//! assembles a [`UseCaseDefinition`] from a parameter struct and only returns it once it has
//! passed validation. Parameter structs are deserialisable, so module configurations can ship
//! their capture modes as preset files and load them with [`params_from_file`].

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_any;

use crate::builder::UseCaseBuilder;
use crate::error::{Error, Result};
use crate::exposure::ExposureGroupId;
use crate::rawframe::{Alignment, ExposureGray, RawFrameSet, MODFREQ_AUTO};
use crate::usecase::UseCaseDefinition;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Extra target rate given to a slave device, in percent of the master's rate (at least +1 Hz).
/// The slave has to finish its cycle before the master's next trigger arrives.
pub const SLAVE_RATE_HEADROOM_PERCENT: u16 = 5;

/// Scale applied to every exposure ceiling of a slave, in percent. The shorter slave cycle
/// leaves less illumination cooling time per frame, so the ceilings come down with it.
pub const SLAVE_EXPOSURE_SCALE_PERCENT: u32 = 90;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Whether the intensity (grayscale) capture runs before or after the modulated phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum IntensityPhaseOrder {
    IntensityLastPhase,
    IntensityFirstPhase,
}

impl Default for IntensityPhaseOrder {
    fn default() -> Self {
        IntensityPhaseOrder::IntensityLastPhase
    }
}

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Parameters for [`gray_scale`].
#[derive(Debug, Clone, Deserialize)]
pub struct GrayScaleParams {
    /// Target frame rate [Hz].
    pub target_rate: u16,

    /// Exposure limits `(min, max)` for the gray captures [us].
    pub exposure_limits: (u32, u32),

    /// Initial gray exposure time [us].
    pub exposure_gray: u32,

    /// Whether the illumination is active during the gray captures.
    #[serde(default)]
    pub expo_on_for_gray: ExposureGray,

    /// Region of interest `(columns, rows)`.
    #[serde(default = "default_image")]
    pub image: (u16, u16),
}

/// Parameters for [`four_phase`].
#[derive(Debug, Clone, Deserialize)]
pub struct FourPhaseParams {
    pub target_rate: u16,

    /// Modulation PLL frequency [Hz].
    pub modulation_frequency: u32,

    /// Exposure limits `(min, max)` shared by all groups of this mode [us].
    pub exposure_limits: (u32, u32),

    /// Initial exposure time of the modulated set [us].
    pub exposure_modulation: u32,

    /// Initial exposure time of the gray set [us]; zero omits the gray set entirely.
    pub exposure_gray: u32,

    #[serde(default)]
    pub expo_on_for_gray: ExposureGray,

    #[serde(default)]
    pub intensity_order: IntensityPhaseOrder,

    #[serde(default = "default_image")]
    pub image: (u16, u16),
}

/// Parameters for [`eight_phase`], the 4+4+1 dual-frequency mode.
#[derive(Debug, Clone, Deserialize)]
pub struct EightPhaseParams {
    pub target_rate: u16,

    pub modulation_frequency_1: u32,
    pub modulation_frequency_2: u32,

    pub exposure_limits: (u32, u32),

    pub exposure_modulation_1: u32,
    pub exposure_modulation_2: u32,

    /// Initial exposure time of the gray set [us]; zero omits the gray set entirely.
    pub exposure_gray: u32,

    #[serde(default)]
    pub expo_on_for_gray: ExposureGray,

    #[serde(default)]
    pub intensity_order: IntensityPhaseOrder,

    #[serde(default = "default_image")]
    pub image: (u16, u16),
}

/// Parameters for [`mixed_xht`], the mixed mode interleaving a high-throughput stream with an
/// eye-safe dual-frequency stream.
#[derive(Debug, Clone, Deserialize)]
pub struct MixedXhtParams {
    pub target_rate: u16,

    /// Number of high-throughput frame groups per eye-safe frame group. Must not be zero.
    pub ratio: u16,

    pub modulation_frequency_ht: u32,
    pub modulation_frequency_es1: u32,
    pub modulation_frequency_es2: u32,

    pub exposure_limits_ht: (u32, u32),
    pub exposure_limits_es: (u32, u32),

    pub exposure_modulation_ht: u32,
    pub exposure_modulation_es1: u32,
    pub exposure_modulation_es2: u32,

    /// Initial gray exposure time per stream [us]; zero omits that stream's gray set.
    pub exposure_gray_ht: u32,
    pub exposure_gray_es: u32,

    #[serde(default)]
    pub expo_on_for_gray_ht: ExposureGray,
    #[serde(default)]
    pub expo_on_for_gray_es: ExposureGray,

    #[serde(default)]
    pub intensity_order: IntensityPhaseOrder,

    #[serde(default = "default_image")]
    pub image: (u16, u16),
}

/// Parameters for [`face_id`].
#[derive(Debug, Clone, Deserialize)]
pub struct FaceIdParams {
    pub target_rate: u16,

    pub modulation_frequency: u32,

    /// Exposure limits `(min, max)` shared by all three groups of this mode [us].
    pub exposure_limits: (u32, u32),

    /// Initial exposure time of the modulated set [us].
    pub exposure_modulation: u32,

    /// Initial exposure time of the flood and dot captures [us].
    pub exposure_gray: u32,

    #[serde(default = "default_face_image")]
    pub image: (u16, u16),
}

// -----------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Load mode parameters from a preset file.
///
/// The file type is guessed at runtime; any format supported by
/// [`serde_any`](https://docs.rs/serde_any/0.5.0/serde_any/) works, as long as it deserialises
/// into the requested parameter struct.
pub fn params_from_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    if !path.as_ref().exists() {
        return Err(Error::FileNotFound(path.as_ref().to_path_buf()));
    }

    serde_any::from_file(path).map_err(|e| Error::DeserialisationError(e))
}

/// A pure grayscale mode: one exposure group, one gray raw frame set, one stream.
pub fn gray_scale(params: &GrayScaleParams) -> Result<UseCaseDefinition> {
    let mut b = UseCaseBuilder::new("GrayScale", params.target_rate)
        .image(params.image.0, params.image.1);

    let gray = b.exposure_group("gray", params.exposure_limits, params.exposure_gray)?;
    b.non_mixed(vec![gray_rfs(gray, params.expo_on_for_gray, MODFREQ_AUTO)])?;

    b.build()
}

/// A single-frequency depth mode: one modulated four-phase set, optionally preceded or followed
/// by a gray set.
pub fn four_phase(params: &FourPhaseParams) -> Result<UseCaseDefinition> {
    let mut b = UseCaseBuilder::new("FourPhase", params.target_rate)
        .image(params.image.0, params.image.1);

    let mut sets = Vec::new();

    if params.intensity_order == IntensityPhaseOrder::IntensityFirstPhase && params.exposure_gray > 0
    {
        let gray = b.exposure_group("gray", params.exposure_limits, params.exposure_gray)?;
        sets.push(gray_rfs(gray, params.expo_on_for_gray, params.modulation_frequency));
    }

    let modulation = b.exposure_group("mod", params.exposure_limits, params.exposure_modulation)?;
    sets.push(RawFrameSet::modulated(modulation, params.modulation_frequency));

    if params.intensity_order == IntensityPhaseOrder::IntensityLastPhase && params.exposure_gray > 0
    {
        let gray = b.exposure_group("gray", params.exposure_limits, params.exposure_gray)?;
        sets.push(gray_rfs(gray, params.expo_on_for_gray, params.modulation_frequency));
    }

    b.non_mixed(sets)?;
    b.build()
}

/// The 4+4+1 dual-frequency depth mode: two modulated four-phase sets at different frequencies,
/// optionally with a gray set.
pub fn eight_phase(params: &EightPhaseParams) -> Result<UseCaseDefinition> {
    let mut b = UseCaseBuilder::new("EightPhase", params.target_rate)
        .image(params.image.0, params.image.1);

    let mut sets = Vec::new();

    if params.intensity_order == IntensityPhaseOrder::IntensityFirstPhase && params.exposure_gray > 0
    {
        let gray = b.exposure_group("gray", params.exposure_limits, params.exposure_gray)?;
        sets.push(gray_rfs(gray, params.expo_on_for_gray, params.modulation_frequency_2));
    }

    let mod1 = b.exposure_group("mod1", params.exposure_limits, params.exposure_modulation_1)?;
    sets.push(RawFrameSet::modulated(mod1, params.modulation_frequency_1));
    let mod2 = b.exposure_group("mod2", params.exposure_limits, params.exposure_modulation_2)?;
    sets.push(RawFrameSet::modulated(mod2, params.modulation_frequency_2));

    if params.intensity_order == IntensityPhaseOrder::IntensityLastPhase && params.exposure_gray > 0
    {
        let gray = b.exposure_group("gray", params.exposure_limits, params.exposure_gray)?;
        sets.push(gray_rfs(gray, params.expo_on_for_gray, params.modulation_frequency_2));
    }

    b.non_mixed(sets)?;
    b.build()
}

/// A mixed mode with two streams: `ratio` high-throughput frame groups captured for every
/// eye-safe dual-frequency frame group.
pub fn mixed_xht(params: &MixedXhtParams) -> Result<UseCaseDefinition> {
    if params.ratio == 0 {
        return Err(Error::InvalidUseCase(
            "a mixed use case needs at least one high-throughput frame group".into(),
        ));
    }

    let mut b = UseCaseBuilder::new(&format!("MixedXHT_{}", params.ratio), params.target_rate)
        .image(params.image.0, params.image.1);

    let ht_stream = b.stream()?;
    let es_stream = b.stream()?;

    let ht = b.exposure_group("ht", params.exposure_limits_ht, params.exposure_modulation_ht)?;
    let es1 = b.exposure_group("es1", params.exposure_limits_es, params.exposure_modulation_es1)?;
    let es2 = b.exposure_group("es2", params.exposure_limits_es, params.exposure_modulation_es2)?;

    let mut group_ht = vec![RawFrameSet::modulated(ht, params.modulation_frequency_ht)];
    let mut group_es = vec![
        RawFrameSet::modulated(es1, params.modulation_frequency_es1),
        RawFrameSet::modulated(es2, params.modulation_frequency_es2),
    ];

    if params.exposure_gray_ht > 0 {
        let gray = b.exposure_group("grayHt", params.exposure_limits_ht, params.exposure_gray_ht)?;
        let rfs = gray_rfs(gray, params.expo_on_for_gray_ht, MODFREQ_AUTO);
        match params.intensity_order {
            IntensityPhaseOrder::IntensityFirstPhase => group_ht.insert(0, rfs),
            IntensityPhaseOrder::IntensityLastPhase => group_ht.push(rfs),
        }
    }

    if params.exposure_gray_es > 0 {
        let gray = b.exposure_group("grayEs", params.exposure_limits_es, params.exposure_gray_es)?;
        let rfs = gray_rfs(gray, params.expo_on_for_gray_es, MODFREQ_AUTO);
        match params.intensity_order {
            IntensityPhaseOrder::IntensityFirstPhase => group_es.insert(0, rfs),
            IntensityPhaseOrder::IntensityLastPhase => group_es.push(rfs),
        }
    }

    for _ in 0..params.ratio {
        b.frame_group(ht_stream, group_ht.clone(), Alignment::ClockAligned)?;
    }
    b.frame_group(es_stream, group_es, Alignment::StartAligned)?;

    b.build()
}

/// The face-identification mode: a depth stream (dot-pattern reference image plus one modulated
/// burst) next to an infrared stream (flood image for detection, dot image for registration).
/// The dot captures of both streams share one exposure group, so auto-exposure keeps them
/// comparable.
pub fn face_id(params: &FaceIdParams) -> Result<UseCaseDefinition> {
    let mut b = UseCaseBuilder::new("FaceID", params.target_rate)
        .image(params.image.0, params.image.1);

    let depth_stream = b.stream()?;
    let ir_stream = b.stream()?;

    let modulation = b.exposure_group("mod", params.exposure_limits, params.exposure_modulation)?;
    let flood = b.exposure_group("flood", params.exposure_limits, params.exposure_gray)?;
    let dot = b.exposure_group("dot", params.exposure_limits, params.exposure_gray)?;

    b.frame_group(
        depth_stream,
        vec![
            RawFrameSet::gray(dot, ExposureGray::On, params.modulation_frequency),
            RawFrameSet::modulated(modulation, params.modulation_frequency),
        ],
        Alignment::ClockAligned,
    )?;
    b.frame_group(
        ir_stream,
        vec![
            RawFrameSet::gray(flood, ExposureGray::On, params.modulation_frequency),
            RawFrameSet::gray(dot, ExposureGray::On, params.modulation_frequency),
        ],
        Alignment::StartAligned,
    )?;

    b.build()
}

/// Derive the slave variant of a master definition, for synchronised multi-camera setups.
///
/// The slave's target (and, where needed, maximum) frame rate is raised by
/// [`SLAVE_RATE_HEADROOM_PERCENT`] and every exposure ceiling is scaled down by
/// [`SLAVE_EXPOSURE_SCALE_PERCENT`], without ever dropping below the group's minimum; exposure
/// times above a lowered ceiling are pulled down onto it.
pub fn slave(master: &UseCaseDefinition) -> Result<UseCaseDefinition> {
    let mut def = master.clone();
    def.type_name = format!("{}_SLAVE", master.type_name());

    let target = master.target_rate();
    let headroom = ((u32::from(target) * u32::from(SLAVE_RATE_HEADROOM_PERCENT)) / 100).max(1);
    let raised = target
        .checked_add(headroom as u16)
        .ok_or_else(|| Error::InvalidUseCase("slave target rate overflows".into()))?;
    def.target_rate = raised;
    def.max_rate = def.max_rate.max(raised);

    for group in &mut def.exposure_groups {
        let (min, max) = group.exposure_limits;
        let scaled = ((u64::from(max) * u64::from(SLAVE_EXPOSURE_SCALE_PERCENT)) / 100) as u32;
        let new_max = scaled.max(min);
        group.exposure_limits = (min, new_max);
        if group.exposure_time > new_max {
            group.exposure_time = new_max;
        }
    }

    def.validate()?;
    Ok(def)
}

// -----------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// A gray set keeps the modulation PLL running at the given frequency while it illuminates;
/// without illumination the frequency is left to the imager.
fn gray_rfs(group: ExposureGroupId, expo_on: ExposureGray, modulation_frequency: u32) -> RawFrameSet {
    match expo_on {
        ExposureGray::On => RawFrameSet::gray(group, expo_on, modulation_frequency),
        ExposureGray::Off => RawFrameSet::gray(group, expo_on, MODFREQ_AUTO),
    }
}

fn default_image() -> (u16, u16) {
    (176, 120)
}

fn default_face_image() -> (u16, u16) {
    (224, 172)
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
