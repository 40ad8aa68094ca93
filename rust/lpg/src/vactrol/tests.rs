use assert_approx_eq::assert_approx_eq;
use more_asserts::{assert_gt, assert_lt};
use proptest::prelude::*;

use super::*;

fn timing() -> Timing {
    Timing::new(48000.0)
}

/// Number of samples until `done` holds, giving up after a second.
fn samples_until(
    vactrol: &mut Vactrol,
    current: f32,
    mut done: impl FnMut(&Vactrol) -> bool,
) -> usize {
    let timing = timing();
    for n in 0..48000 {
        vactrol.process(current, &timing);
        if done(&*vactrol) {
            return n + 1;
        }
    }
    panic!("never finished");
}

#[test]
fn direction_of_sign() {
    assert_eq!(Direction::of(0.5), Direction::Rising);
    assert_eq!(Direction::of(-1e-9), Direction::Falling);
    assert_eq!(Direction::of(0.0), Direction::Steady);
}

#[test]
fn stays_dark_without_drive() {
    let timing = timing();
    let mut vactrol = Vactrol::new();
    for _ in 0..100 {
        let r = vactrol.process(0.0, &timing);
        assert_approx_eq!(r, resistance(0.0));
    }
    assert_approx_eq!(vactrol.cutoff(), 0.0);
    assert_approx_eq!(vactrol.envelope(), 0.0);
}

#[test]
fn constant_current_holds_cutoff() {
    let timing = timing();
    let mut vactrol = Vactrol::new();
    vactrol.process(0.01, &timing);
    let attack = vactrol.cutoff();
    assert_approx_eq!(attack, attack_cutoff(0.01));
    for _ in 0..200 {
        vactrol.process(0.01, &timing);
        assert_eq!(vactrol.cutoff(), attack);
    }
}

#[test]
fn ramp_keeps_first_attack_cutoff() {
    let timing = timing();
    let mut vactrol = Vactrol::new();
    vactrol.process(0.001, &timing);
    let first = vactrol.cutoff();
    for step in 2..40 {
        vactrol.process(0.001 * step as f32, &timing);
        assert_eq!(vactrol.cutoff(), first);
    }
}

#[test]
fn decay_cutoff_uses_envelope() {
    let timing = timing();
    let mut vactrol = Vactrol::new();
    for _ in 0..100 {
        vactrol.process(0.02, &timing);
    }
    let attack = vactrol.cutoff();
    let envelope = vactrol.envelope();
    // Still charging, so the light level lags the drive.
    assert_lt!(envelope, 0.02);

    vactrol.process(0.0, &timing);
    let decay = vactrol.cutoff();
    assert_approx_eq!(decay, decay_cutoff(envelope));
    assert_gt!((decay - decay_cutoff(0.0)).abs(), 1.0);
    assert_gt!((attack - decay).abs(), 1.0);
}

#[test]
fn attack_is_faster_than_decay() {
    let mut vactrol = Vactrol::new();
    let attack_samples = samples_until(&mut vactrol, MAX_CURRENT, |v| {
        v.envelope() > 0.9 * MAX_CURRENT
    });
    let peak = vactrol.envelope();
    let decay_samples = samples_until(&mut vactrol, 0.0, |v| v.envelope() < 0.1 * peak);
    assert_gt!(decay_samples, 5 * attack_samples);
}

#[test]
fn settles_on_drive_current() {
    let timing = timing();
    let mut vactrol = Vactrol::new();
    let mut r = 0.0;
    for _ in 0..48000 {
        r = vactrol.process(0.01, &timing);
    }
    assert_approx_eq!(vactrol.envelope(), 0.01, 1e-6);
    assert_approx_eq!(r / resistance(0.01), 1.0, 1e-3);
}

#[test]
fn more_light_less_resistance() {
    assert_gt!(resistance(1e-4), resistance(1e-3));
    assert_gt!(resistance(1e-3), resistance(MAX_CURRENT));
    assert_gt!(resistance(MAX_CURRENT), B_VAC);
}

#[test]
fn floor_bounds_resistance() {
    assert_eq!(resistance(0.0), resistance(ENVELOPE_FLOOR));
    assert_eq!(resistance(-1.0), resistance(ENVELOPE_FLOOR));
    assert!(resistance(0.0).is_finite());
}

#[test]
fn reset() {
    let timing = timing();
    let drive: Vec<f32> = (0..200)
        .map(|n| if n < 80 { 0.03 } else { 0.005 })
        .collect();
    let mut vactrol = Vactrol::new();
    let first: Vec<f32> = drive.iter().map(|c| vactrol.process(*c, &timing)).collect();
    vactrol.reset();
    let second: Vec<f32> = drive.iter().map(|c| vactrol.process(*c, &timing)).collect();
    for (a, b) in first.iter().zip(second.iter()) {
        assert_approx_eq!(a, b);
    }
}

proptest! {
    #[test]
    fn resistance_is_positive(envelope in 0.0f32..1000.0) {
        prop_assert!(resistance(envelope) > 0.0);
    }
}
