//! Integration tests for the four augmentation modes.

mod common;

use common::{
    BASELINE, MemorySource, assert_sixty_second_steps, house_series, synthetic_series,
};
use nilm_augment::DatasetError;
use nilm_augment::pipeline::types::APPLIANCE_CHANNELS;
use nilm_augment::pipeline::{Mode, Orchestrator, RepeatFactors, RunningClock, aggregate, extract};

/// Houses A (3 rows) and B (2 rows) with factors {A: 2, B: 3}, synthetic
/// shower data of 4 rows.
fn two_house_setup() -> (Orchestrator, MemorySource) {
    let orchestrator = Orchestrator::new(
        vec!["A".to_string(), "B".to_string()],
        RepeatFactors::from_pairs([("A", 2), ("B", 3)]),
        vec!["shower".to_string()],
        BASELINE,
    );
    let source = MemorySource::default()
        .with_house("A", house_series(3, 1.0))
        .with_house("B", house_series(2, 2.0))
        .with_synthetic("shower", synthetic_series(4, 9.0));
    (orchestrator, source)
}

#[test]
fn aggregated_rows_follow_house_then_pass_order() {
    let (_, source) = two_house_setup();
    let houses = vec!["A".to_string(), "B".to_string()];
    let factors = RepeatFactors::from_pairs([("A", 2), ("B", 3)]);
    let mut clock = RunningClock::starting_at(BASELINE);

    let combined = aggregate(&source, &houses, &factors, &mut clock).expect("aggregation");
    assert_eq!(combined.len(), 12);

    let origin: Vec<f64> = combined.rows().map(|r| r[1][0]).collect();
    assert_eq!(
        origin,
        vec![
            1000.0, 1001.0, 1002.0, // A pass 1
            1000.0, 1001.0, 1002.0, // A pass 2
            2000.0, 2001.0, // B pass 1
            2000.0, 2001.0, // B pass 2
            2000.0, 2001.0, // B pass 3
        ]
    );

    for (k, t) in combined.timestamps().enumerate() {
        assert_eq!(t, (BASELINE + 60 * (k as i64 + 1)) as f64);
    }
}

#[test]
fn default_mode_yields_three_five_row_arrays() {
    let (orchestrator, source) = two_house_setup();
    let out = orchestrator.build(Mode::Default, &source).expect("default run");
    assert_eq!(out.len(), 3);
    for (_, s) in out.iter() {
        assert_eq!(s.shape(), (5, 3, 2));
    }
}

#[test]
fn extraction_preserves_timestamp_and_aggregate() {
    let (_, source) = two_house_setup();
    let mut clock = RunningClock::starting_at(BASELINE);
    let combined = aggregate(
        &source,
        &["A".to_string(), "B".to_string()],
        &RepeatFactors::uniform(),
        &mut clock,
    )
    .expect("aggregation");
    let out = extract(&combined, APPLIANCE_CHANNELS).expect("extraction");
    for (appliance, s) in out.iter() {
        for (src, dst) in combined.rows().zip(s.rows()) {
            assert_eq!(&src[0..2], &dst[0..2], "{appliance}");
        }
    }
}

#[test]
fn merged_mode_appends_synthetic_rows_for_that_appliance_only() {
    let (orchestrator, source) = two_house_setup();
    let real = orchestrator.build(Mode::RandomAssign, &source).expect("random_assign run");
    let merged = orchestrator.build(Mode::Merged, &source).expect("merged run");

    for (appliance, fused) in merged.iter() {
        let real_seg = real.get(appliance).expect("same appliances");
        let extra = if appliance == "shower" { 4 } else { 0 };
        assert_eq!(fused.len(), real_seg.len() + extra, "{appliance}");
        for i in 0..real_seg.len() {
            assert_eq!(fused.row(i), real_seg.row(i), "{appliance} row {i}");
        }
    }

    let shower = merged.get("shower").expect("shower output");
    let last_real = real.get("shower").and_then(|s| s.timestamps().last()).unwrap_or(0.0);
    let ts: Vec<f64> = shower.timestamps().collect();
    assert!(ts[12..].iter().all(|&t| t > last_real));
    assert_sixty_second_steps(&ts);
    let first_synth = synthetic_series(4, 9.0);
    assert_eq!(shower.row(12).map(|r| &r[1..]), first_synth.row(0).map(|r| &r[1..]));
}

#[test]
fn synthetic_modelling_continues_after_plain_aggregation() {
    let (orchestrator, source) = two_house_setup();
    let out = orchestrator
        .build(Mode::SyntheticModelling, &source)
        .expect("synthetic_modelling run");
    let shower: Vec<f64> = out.get("shower").expect("shower").timestamps().collect();
    assert_eq!(shower.len(), 9);
    assert_eq!(shower[5], (BASELINE + 6 * 60) as f64);
    assert_sixty_second_steps(&shower);
}

#[test]
fn synthetic_appliances_never_share_timestamps() {
    let orchestrator = Orchestrator::new(
        vec!["A".to_string()],
        RepeatFactors::uniform(),
        vec!["refrigerator".to_string(), "air_conditioner".to_string()],
        BASELINE,
    );
    let source = MemorySource::default()
        .with_house("A", house_series(2, 1.0))
        .with_synthetic("refrigerator", synthetic_series(3, 5.0))
        .with_synthetic("air_conditioner", synthetic_series(2, 6.0));
    let out = orchestrator.build(Mode::Merged, &source).expect("merged run");

    let mut synthetic_ts: Vec<f64> = Vec::new();
    for appliance in ["refrigerator", "air_conditioner"] {
        let s = out.get(appliance).expect("appliance output");
        synthetic_ts.extend(s.timestamps().skip(2));
    }
    assert_eq!(synthetic_ts.len(), 5);
    assert_sixty_second_steps(&synthetic_ts);
}

#[test]
fn determinism_two_runs_are_identical() {
    let (orchestrator, source) = two_house_setup();
    for mode in Mode::ALL {
        let a = orchestrator.build(mode, &source).expect("first run");
        let b = orchestrator.build(mode, &source).expect("second run");
        assert_eq!(a, b, "{mode}");
    }
}

#[test]
fn missing_house_fails_whole_run() {
    let (orchestrator, _) = two_house_setup();
    let source = MemorySource::default().with_house("A", house_series(3, 1.0));
    let err = orchestrator.build(Mode::Default, &source).unwrap_err();
    assert!(matches!(err, DatasetError::Load { .. }));
}

#[test]
fn wide_synthetic_series_is_shape_mismatch() {
    let (orchestrator, _) = two_house_setup();
    let source = MemorySource::default()
        .with_house("A", house_series(3, 1.0))
        .with_house("B", house_series(2, 2.0))
        .with_synthetic("shower", house_series(4, 3.0));
    let err = orchestrator.build(Mode::SyntheticModelling, &source).unwrap_err();
    assert!(matches!(err, DatasetError::ShapeMismatch { expected: 3, got: 5, .. }));
}
