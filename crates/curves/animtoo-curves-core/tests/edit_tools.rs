mod common;

use animtoo_curves::{
    host::selected_curves, loop_curves, loop_selection, offset_curves, offset_curves_in_range,
    offset_selection, round_key_values, CurveError, CurveHandle, ObjectHandle, OffsetMode,
};
use common::{curve_times, curve_values, load_scene, single_curve_scene, FlakyHost};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn round_values_on_selection() {
    let mut scene = load_scene("stepped-blocking");
    let (_, curves) = selected_curves(&scene).unwrap();
    let report = round_key_values(&mut scene, &curves);
    assert_eq!(report.edited, 4);
    assert_eq!(report.curves, 3);
    assert_eq!(
        curve_values(&scene, "hero_head_rotateX"),
        vec![-10.0, 5.0, 12.0, -4.0]
    );
    // Already whole: untouched.
    assert_eq!(curve_values(&scene, "hero_ctrl_rotateY"), vec![45.0, 45.0, 90.0]);
}

#[test]
fn round_failure_keeps_earlier_edits() {
    let (scene, handle) = single_curve_scene(&[(0.0, 0.4), (1.0, 1.6), (2.0, 2.7)]);
    let mut host = FlakyHost::new(scene, "obj_attr", 2);
    let report = round_key_values(&mut host, &[handle]);
    assert_eq!(report.edited, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].completed, 2);
    assert_eq!(curve_values(&host.inner, "obj_attr"), vec![0.0, 2.0, 2.7]);
}

#[test]
fn fixed_offset_moves_every_selected_curve() {
    let mut scene = load_scene("crowd-stagger");
    let mut rng = StdRng::seed_from_u64(1);
    let report = offset_selection(&mut scene, &OffsetMode::Fixed { offset: 5.0 }, &mut rng).unwrap();
    assert_eq!(report.edited, 4);
    assert!(report.is_clean());
    assert_eq!(curve_times(&scene, "extra_01_translateX"), vec![6.0, 29.0]);
    assert_eq!(curve_times(&scene, "extra_03_rotateY"), vec![6.0, 17.0, 29.0]);
    assert_eq!(curve_times(&scene, "camera1_translateZ"), vec![1.0, 48.0]);

    assert!(scene.undo());
    assert_eq!(curve_times(&scene, "extra_01_translateX"), vec![1.0, 24.0]);
}

#[test]
fn progressive_offset_staggers_in_selection_order() {
    let mut scene = load_scene("crowd-stagger");
    let mut rng = StdRng::seed_from_u64(99);
    offset_selection(
        &mut scene,
        &OffsetMode::Progressive { min: 1, max: 6 },
        &mut rng,
    )
    .unwrap();

    let starts: Vec<f64> = ["extra_01_translateX", "extra_02_translateX", "extra_03_translateX"]
        .iter()
        .map(|c| curve_times(&scene, c)[0])
        .collect();
    assert!(starts[0] >= 2.0 && starts[0] <= 7.0);
    assert!(starts[1] > starts[0] && starts[2] > starts[1]);
    // Curves on the same object share its offset.
    assert_eq!(curve_times(&scene, "extra_03_rotateY")[0], starts[2]);
}

#[test]
fn bad_range_edits_nothing() {
    let mut scene = load_scene("crowd-stagger");
    let mut rng = StdRng::seed_from_u64(0);
    let err = offset_selection(&mut scene, &OffsetMode::Random { max: 0 }, &mut rng).unwrap_err();
    assert!(matches!(err, CurveError::InvalidOffsetRange { .. }));
    assert_eq!(curve_times(&scene, "extra_01_translateX"), vec![1.0, 24.0]);
    assert!(!scene.can_undo());
}

#[test]
fn offset_curves_reports_missing_curve() {
    let mut scene = load_scene("crowd-stagger");
    let report = offset_curves(
        &mut scene,
        &[CurveHandle::from("ghost"), CurveHandle::from("camera1_translateZ")],
        -1.0,
    );
    assert_eq!(report.edited, 1);
    assert_eq!(report.failures[0].error.command, "shiftKeys");
    assert_eq!(curve_times(&scene, "camera1_translateZ"), vec![0.0, 47.0]);
}

#[test]
fn progressive_offset_follows_pick_order() {
    let mut scene = load_scene("crowd-stagger");
    scene.select(&[ObjectHandle::from("extra_03"), ObjectHandle::from("extra_01")]);
    let mut rng = StdRng::seed_from_u64(4);
    let report = offset_selection(
        &mut scene,
        &OffsetMode::Progressive { min: 1, max: 6 },
        &mut rng,
    )
    .unwrap();
    assert_eq!(report.edited, 3);

    let first_picked = curve_times(&scene, "extra_03_translateX")[0];
    let second_picked = curve_times(&scene, "extra_01_translateX")[0];
    assert!(first_picked < second_picked);
    // Not picked.
    assert_eq!(curve_times(&scene, "extra_02_translateX"), vec![1.0, 24.0]);
}

#[test]
fn keep_range_offset_slides_motion_inside_range() {
    let mut scene = load_scene("crowd-stagger");
    let mut rng = StdRng::seed_from_u64(0);
    let report = offset_selection(
        &mut scene,
        &OffsetMode::KeepRange { offset: 2.0 },
        &mut rng,
    )
    .unwrap();
    assert_eq!(report.edited, 4);
    assert!(report.is_clean());

    assert_eq!(
        curve_times(&scene, "extra_03_rotateY"),
        vec![1.0, 3.0, 12.0, 14.0, 24.0]
    );
    let expected = [0.0, 0.0, 810.0 / 11.0, 90.0, 165.0];
    for (got, want) in curve_values(&scene, "extra_03_rotateY").iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
    assert_eq!(curve_times(&scene, "extra_01_translateX"), vec![1.0, 3.0, 24.0]);
    assert_eq!(curve_times(&scene, "camera1_translateZ"), vec![1.0, 48.0]);

    assert!(scene.undo());
    assert_eq!(curve_times(&scene, "extra_03_rotateY"), vec![1.0, 12.0, 24.0]);
}

#[test]
fn keep_range_negative_offset_holds_last_value() {
    let (mut scene, handle) = single_curve_scene(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]);
    let report = offset_curves_in_range(&mut scene, &[handle], -5.0);
    assert_eq!(report.edited, 1);
    assert_eq!(curve_times(&scene, "obj_attr"), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
    assert_eq!(curve_values(&scene, "obj_attr"), vec![5.0, 10.0, 5.0, 0.0, 0.0]);
}

#[test]
fn keep_range_failure_is_per_curve() {
    let scene = load_scene("crowd-stagger");
    let mut host = FlakyHost::new(scene, "extra_01_translateX", 1);
    let curves = [
        CurveHandle::from("extra_01_translateX"),
        CurveHandle::from("extra_02_translateX"),
    ];
    let report = offset_curves_in_range(&mut host, &curves, 2.0);
    assert_eq!(report.edited, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].error.command, "insertKey");
    assert_eq!(curve_times(&host.inner, "extra_02_translateX"), vec![1.0, 3.0, 24.0]);
}

#[test]
fn loop_appends_one_cycle_on_selection() {
    let mut scene = load_scene("walk-cycle");
    let report = loop_selection(&mut scene).unwrap();
    assert_eq!(report.curves, 3);
    assert_eq!(report.edited, 4);
    assert!(report.is_clean());

    assert_eq!(
        curve_times(&scene, "hips_translateZ"),
        vec![1.0, 13.0, 25.0, 37.0, 49.0]
    );
    assert_eq!(
        curve_values(&scene, "hips_translateZ"),
        vec![0.0, 5.0, 10.0, 15.0, 20.0]
    );
    assert_eq!(
        curve_values(&scene, "hips_rotateY"),
        vec![-10.0, 10.0, -10.0, 10.0, -10.0]
    );
    // A single key has no cycle to repeat.
    assert_eq!(curve_times(&scene, "prop_visibility"), vec![1.0]);

    assert!(scene.undo());
    assert_eq!(curve_times(&scene, "hips_translateZ"), vec![1.0, 13.0, 25.0]);
}

#[test]
fn loop_failure_keeps_keys_already_added() {
    let scene = load_scene("walk-cycle");
    let mut host = FlakyHost::new(scene, "hips_translateZ", 1);
    let curves = [
        CurveHandle::from("hips_translateZ"),
        CurveHandle::from("hips_rotateY"),
    ];
    let report = loop_curves(&mut host, &curves);
    assert_eq!(report.edited, 3);
    assert_eq!(report.failures[0].completed, 1);
    assert_eq!(report.failures[0].error.command, "setKeyframe");
    assert_eq!(
        curve_times(&host.inner, "hips_translateZ"),
        vec![1.0, 13.0, 25.0, 37.0]
    );
}
