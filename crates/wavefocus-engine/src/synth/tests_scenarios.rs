//! Acoustic scenarios with literal expected outputs.

use super::*;
use crate::config::{Execution, SynthesisConfig, Windowing};
use crate::geometry::{make_grid, SpeakerArray, Vec3};
use crate::propagation::{propagate, SPEED_OF_SOUND_M_S};
use crate::track::Track;

fn sequential(windowing: Windowing) -> SynthesisConfig {
    SynthesisConfig::default()
        .with_windowing(windowing)
        .with_execution(Execution::Sequential)
}

fn impulse(len: usize, sample_rate: u32) -> Track {
    let mut samples = vec![0.0; len];
    samples[0] = 1.0;
    Track::new(samples, sample_rate).unwrap()
}

fn pair() -> SpeakerArray {
    SpeakerArray::new(vec![Vec3::new(-0.05, 0.0, 0.0), Vec3::new(0.05, 0.0, 0.0)]).unwrap()
}

fn rms(samples: &[f64]) -> f64 {
    (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
}

#[test]
fn test_two_speaker_impulse_reconstructs_at_sample_zero() {
    let target = Vec3::new(0.0, 0.0, 5.0);
    let beams = [Beam::new(impulse(100, 8000), target)];

    for windowing in [Windowing::Uniform, Windowing::Tapered] {
        let output = synthesize(
            &pair(),
            &beams,
            &Listener::Fixed(target),
            &sequential(windowing),
        )
        .unwrap();

        // Listener delay cancels the focal pre-delay for both speakers, and
        // each contributes attenuation ratio 1.
        let ratio = 1.0;
        let expected = 2.0 * ratio / output.normalization;
        assert_eq!(output.normalization, 2.0);
        assert!((output.samples[0] - expected).abs() < 1e-12);
        assert!(output.samples[1..].iter().all(|&s| s == 0.0));
        assert_eq!(output.samples.len(), 100);
        assert_eq!(output.sample_rate, 8000);
    }
}

#[test]
fn test_static_path_matches_fixed_listener() {
    let target = Vec3::new(0.0, 0.0, 5.0);
    let beams = [Beam::new(impulse(100, 8000), target)];
    let config = sequential(Windowing::Uniform);

    let fixed = synthesize(&pair(), &beams, &Listener::Fixed(target), &config).unwrap();
    let path = synthesize(
        &pair(),
        &beams,
        &Listener::Path(vec![target; 100]),
        &config,
    )
    .unwrap();

    for (a, b) in fixed.samples.iter().zip(&path.samples) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_single_speaker_is_delay_and_scale() {
    let speaker = Vec3::ZERO;
    let listener = Vec3::new(0.0, 0.0, 5.0);
    let focus = Vec3::new(0.0, 0.0, 1.0);
    let sample_rate = 8000;

    let heard = propagate(speaker, listener, SPEED_OF_SOUND_M_S).unwrap();
    let focal = propagate(speaker, focus, SPEED_OF_SOUND_M_S).unwrap();
    assert!((heard.delay - 0.01458).abs() < 1e-5);

    // A ramp is reproduced exactly by linear interpolation.
    let ramp: Vec<f64> = (0..2000).map(|i| i as f64 * 0.001).collect();
    let track = Track::new(ramp, sample_rate).unwrap();

    let output = synthesize(
        &SpeakerArray::new(vec![speaker]).unwrap(),
        &[Beam::new(track.clone(), focus)],
        &Listener::Fixed(listener),
        &sequential(Windowing::Uniform),
    )
    .unwrap();

    let shift = heard.delay - focal.delay;
    let scale = heard.attenuation / focal.attenuation;
    assert!((scale - 0.04).abs() < 1e-15);

    for (i, &got) in output.samples.iter().enumerate() {
        let t = i as f64 / sample_rate as f64;
        let expected = scale * track.sample_at(t - shift);
        assert!(
            (got - expected).abs() < 1e-9,
            "sample {}: got {}, expected {}",
            i,
            got,
            expected
        );
    }

    let first_audible = (shift * sample_rate as f64).ceil() as usize;
    assert!(output.samples[..first_audible].iter().all(|&s| s == 0.0));
    assert!(output.samples[first_audible + 1] > 0.0);
}

#[test]
fn test_infinite_speed_with_listener_at_focus_averages_track() {
    let focus = Vec3::new(0.3, -0.2, 2.0);
    let samples: Vec<f64> = (0..256).map(|i| ((i * 37) % 17) as f64 / 17.0 - 0.5).collect();
    let track = Track::new(samples.clone(), 16000).unwrap();
    let speakers = make_grid(4, 4, 0.1).unwrap();

    for windowing in [Windowing::Uniform, Windowing::Tapered] {
        let config = sequential(windowing).with_speed_of_sound(f64::INFINITY);
        let output = synthesize(
            &speakers,
            &[Beam::new(track.clone(), focus)],
            &Listener::Fixed(focus),
            &config,
        )
        .unwrap();

        for (got, want) in output.samples.iter().zip(&samples) {
            assert!((got - want).abs() < 1e-12);
        }
    }
}

#[test]
fn test_warped_time_before_track_start_is_silent() {
    // Listener is much farther than the focus, so the shift exceeds the
    // whole track.
    let speakers = SpeakerArray::new(vec![Vec3::ZERO]).unwrap();
    let track = Track::new(vec![1.0; 100], 1000).unwrap();
    let output = synthesize(
        &speakers,
        &[Beam::new(track, Vec3::new(0.0, 0.0, 0.5))],
        &Listener::Fixed(Vec3::new(0.0, 0.0, 50.0)),
        &sequential(Windowing::Uniform),
    )
    .unwrap();

    assert!(output.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn test_warped_time_after_track_end_is_silent() {
    // Focus is much farther than the listener, so every query lands past
    // the last sample.
    let speakers = SpeakerArray::new(vec![Vec3::ZERO]).unwrap();
    let track = Track::new(vec![1.0; 100], 1000).unwrap();
    let output = synthesize(
        &speakers,
        &[Beam::new(track, Vec3::new(0.0, 0.0, 50.0))],
        &Listener::Fixed(Vec3::new(0.0, 0.0, 0.5)),
        &sequential(Windowing::Uniform),
    )
    .unwrap();

    assert!(output.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn test_partial_overlap_is_silent_then_audible() {
    let speakers = SpeakerArray::new(vec![Vec3::ZERO]).unwrap();
    let track = Track::new(vec![1.0; 200], 1000).unwrap();
    let output = synthesize(
        &speakers,
        &[Beam::new(track, Vec3::new(0.0, 0.0, 0.5))],
        &Listener::Fixed(Vec3::new(0.0, 0.0, 50.0)),
        &sequential(Windowing::Uniform),
    )
    .unwrap();

    // Shift is (50 - 0.5) / 343 s, about 144.3 samples.
    assert!(output.samples[..145].iter().all(|&s| s == 0.0));
    assert!(output.samples[150..].iter().all(|&s| s > 0.0));
}

#[test]
fn test_focus_concentrates_energy() {
    let sample_rate = 8000;
    let tone: Vec<f64> = (0..2000)
        .map(|i| (std::f64::consts::PI * i as f64 / 4.0).sin())
        .collect();
    let track = Track::new(tone, sample_rate).unwrap();
    let speakers = make_grid(32, 1, 0.1).unwrap();
    let focus = Vec3::new(1.0, 0.0, 5.0);
    let elsewhere = Vec3::new(-1.0, 0.0, 5.0);
    let beams = [Beam::new(track, focus)];
    let config = sequential(Windowing::Tapered);

    let on = synthesize(&speakers, &beams, &Listener::Fixed(focus), &config).unwrap();
    let off = synthesize(&speakers, &beams, &Listener::Fixed(elsewhere), &config).unwrap();

    let steady = 100..1900;
    let rms_on = rms(&on.samples[steady.clone()]);
    let rms_off = rms(&off.samples[steady]);

    assert!((rms_on - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-3);
    assert!(
        rms_off < 0.5 * rms_on,
        "on-focus rms {} vs off-focus rms {}",
        rms_on,
        rms_off
    );
}

#[test]
fn test_moving_listener_crosses_the_focus() {
    let sample_rate = 8000;
    let tone: Vec<f64> = (0..4000)
        .map(|i| (std::f64::consts::PI * i as f64 / 4.0).sin())
        .collect();
    let track = Track::new(tone, sample_rate).unwrap();
    let speakers = make_grid(32, 1, 0.1).unwrap();
    let focus = Vec3::new(0.0, 0.0, 5.0);
    let path = crate::geometry::make_trajectory(
        Vec3::new(-2.0, 0.0, 5.0),
        Vec3::new(2.0, 0.0, 5.0),
        4000,
    )
    .unwrap();

    let output = synthesize(
        &speakers,
        &[Beam::new(track, focus)],
        &Listener::Path(path),
        &sequential(Windowing::Tapered),
    )
    .unwrap();

    // Loudest while passing through the focus in the middle of the run.
    let edge = rms(&output.samples[200..600]);
    let middle = rms(&output.samples[1800..2200]);
    assert!(middle > 2.0 * edge, "middle {} vs edge {}", middle, edge);
}
