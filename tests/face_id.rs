//! # Face Identification Use Case Test
//!
//! End-to-end checks of the face-identification capture mode, its interaction with flow control
//! and the master/slave transform, through the public API only.

use tof_usecase::modes::{self, FaceIdParams};
use tof_usecase::prelude::*;

fn face_id_params() -> FaceIdParams {
    FaceIdParams {
        target_rate: 15,
        modulation_frequency: 80_320_000,
        exposure_limits: (1, 1000),
        exposure_modulation: 1000,
        exposure_gray: 1000,
        image: (224, 172),
    }
}

/// Three exposure groups limited to (1, 1000) and a gray exposure of 1000 must come out as
/// exactly 4 raw frame sets, 7 raw frames per cycle and 2 distinct streams.
#[test]
fn face_id_structure() {
    let ucd = modes::face_id(&face_id_params()).expect("Failed to assemble the FaceID use case");

    assert_eq!(ucd.raw_frame_sets().len(), 4);
    assert_eq!(ucd.raw_frame_count(), 7);

    let stream_ids = ucd.stream_ids();
    assert_eq!(stream_ids.len(), 2);
    assert_ne!(stream_ids[0], stream_ids[1]);
    assert!(stream_ids.len() <= MAX_STREAMS);

    assert_eq!(ucd.exposure_groups().len(), 3);
    for (_, limits) in ucd.exposure_limits() {
        assert_eq!(limits, (1, 1000));
    }

    // Depth stream: dot reference image plus the modulated burst
    let depth_sets = ucd.raw_frame_set_indices(stream_ids[0], 0).unwrap();
    assert_eq!(depth_sets.len(), 2);
    assert!(ucd.raw_frame_sets()[depth_sets[0].0].is_grayscale());
    assert!(ucd.raw_frame_sets()[depth_sets[1].0].is_modulated());

    // Infrared stream: flood and dot images
    let ir_sets = ucd.raw_frame_set_indices(stream_ids[1], 0).unwrap();
    assert_eq!(ir_sets.len(), 2);
    assert!(ir_sets
        .iter()
        .all(|id| ucd.raw_frame_sets()[id.0].is_grayscale()));

    // The dot captures of both streams share an exposure group
    let depth_groups = ucd.exposure_indices_for_stream(stream_ids[0]).unwrap();
    let ir_groups = ucd.exposure_indices_for_stream(stream_ids[1]).unwrap();
    assert!(ir_groups.contains(&depth_groups[0]));
}

#[test]
fn face_id_flow_control() {
    let ucd = modes::face_id(&face_id_params()).unwrap();

    // An exposure ceiling of exactly 1000 us selects the slow raw frame rate
    let hundred_k = FlowControlStrategy100k::new(300, 600);
    assert_eq!(hundred_k.raw_frame_rate(&ucd), 300);

    // With every ceiling strictly below the threshold the fast rate applies
    let mut params = face_id_params();
    params.exposure_limits = (1, 999);
    params.exposure_modulation = 999;
    params.exposure_gray = 999;
    let short = modes::face_id(&params).unwrap();
    assert_eq!(hundred_k.raw_frame_rate(&short), 600);

    // A fixed strategy does not look at the use case at all
    let fixed = FlowControlStrategyFixed::new(450);
    assert_eq!(fixed.raw_frame_rate(&ucd), 450);
    assert_eq!(fixed.raw_frame_rate(&short), 450);
}

#[test]
fn face_id_slave_transform() {
    let master = modes::face_id(&face_id_params()).unwrap();
    let slave = modes::slave(&master).expect("Failed to derive the slave use case");

    assert!(slave.target_rate() > master.target_rate());
    for ((_, master_limits), (_, slave_limits)) in
        master.exposure_limits().iter().zip(slave.exposure_limits())
    {
        assert!(slave_limits.1 < master_limits.1);
        assert!(slave_limits.0 <= slave_limits.1);
    }

    // The slave still validates and keeps the master's structure
    assert_eq!(slave.raw_frame_sets().len(), master.raw_frame_sets().len());
    assert_eq!(slave.stream_ids(), master.stream_ids());
}

#[test]
fn face_id_exposure_adjustment() {
    let mut ucd = modes::face_id(&face_id_params()).unwrap();

    // Auto-exposure pulls the dot captures down; flood and depth are unaffected
    ucd.set_exposure_time("dot", 250).unwrap();
    assert_eq!(ucd.exposure_group("dot").unwrap().exposure_time, 250);
    assert_eq!(ucd.exposure_group("flood").unwrap().exposure_time, 1000);
    assert_eq!(ucd.exposure_group("mod").unwrap().exposure_time, 1000);

    // The limits always reflect the live groups
    assert!(matches!(
        ucd.set_exposure_time("dot", 1001),
        Err(Error::ExposureOutOfLimits { .. })
    ));
}

/// Presets load from files in any supported format; omitted fields take their defaults.
#[test]
fn face_id_params_from_preset_file() {
    let params: FaceIdParams =
        modes::params_from_file("res/face_id_15fps.toml").expect("Cannot load the preset file");

    assert_eq!(params.target_rate, 15);
    assert_eq!(params.exposure_limits, (1, 1000));
    assert_eq!(params.image, (224, 172));

    let ucd = modes::face_id(&params).unwrap();
    assert_eq!(ucd, modes::face_id(&face_id_params()).unwrap());
}
