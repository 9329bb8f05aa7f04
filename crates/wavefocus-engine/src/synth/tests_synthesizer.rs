//! Tests for the Synthesizer builder, determinism, and execution modes.

use super::*;
use crate::config::{Execution, SynthesisConfig, Windowing};
use crate::geometry::{make_grid, make_trajectory, Vec3};
use crate::rng::create_rng;
use rand::Rng;
use crate::track::Track;

fn noise_track(len: usize, sample_rate: u32, salt: u32) -> Track {
    let mut rng = create_rng(salt, "noise");
    let samples = (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Track::new(samples, sample_rate).unwrap()
}

fn scene() -> (crate::geometry::SpeakerArray, Vec<Beam>, Listener) {
    let speakers = make_grid(6, 3, 0.1).unwrap();
    let beams = vec![
        Beam::new(noise_track(600, 8000, 1), Vec3::new(1.0, 0.0, 5.0)),
        Beam::new(noise_track(600, 8000, 2), Vec3::new(-1.0, 0.0, 5.0)),
    ];
    let listener = Listener::Path(
        make_trajectory(Vec3::new(-1.0, 0.2, 4.0), Vec3::new(1.0, -0.2, 6.0), 600).unwrap(),
    );
    (speakers, beams, listener)
}

#[test]
fn test_sequential_runs_are_bit_identical() {
    let (speakers, beams, listener) = scene();
    let config = SynthesisConfig::default().with_execution(Execution::Sequential);

    let a = synthesize(&speakers, &beams, &listener, &config).unwrap();
    let b = synthesize(&speakers, &beams, &listener, &config).unwrap();

    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.samples, b.samples);
    assert_eq!(a.fingerprint().len(), 64);
}

#[test]
fn test_parallel_matches_sequential() {
    let (speakers, beams, listener) = scene();
    let base = SynthesisConfig::default();

    let seq = synthesize(
        &speakers,
        &beams,
        &listener,
        &base.clone().with_execution(Execution::Sequential),
    )
    .unwrap();
    let par = synthesize(
        &speakers,
        &beams,
        &listener,
        &base.with_execution(Execution::Parallel),
    )
    .unwrap();

    assert_eq!(seq.samples.len(), par.samples.len());
    assert_eq!(seq.normalization, par.normalization);
    for (a, b) in seq.samples.iter().zip(&par.samples) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_beams_superpose() {
    let (speakers, beams, listener) = scene();
    let config = SynthesisConfig::default().with_execution(Execution::Sequential);

    let both = synthesize(&speakers, &beams, &listener, &config).unwrap();
    let first = synthesize(&speakers, &beams[..1], &listener, &config).unwrap();
    let second = synthesize(&speakers, &beams[1..], &listener, &config).unwrap();

    assert_eq!(both.num_beams, 2);
    for i in 0..both.samples.len() {
        let sum = first.samples[i] + second.samples[i];
        assert!((both.samples[i] - sum).abs() < 1e-12);
    }
}

#[test]
fn test_inputs_are_not_mutated() {
    let (speakers, beams, listener) = scene();
    let before = beams.clone();
    let _ = synthesize(&speakers, &beams, &listener, &SynthesisConfig::default()).unwrap();
    assert_eq!(beams, before);
}

#[test]
fn test_builder_defaults_listener_to_first_focus() {
    let speakers = make_grid(4, 1, 0.1).unwrap();
    let beam = Beam::new(noise_track(200, 8000, 3), Vec3::new(0.5, 0.0, 3.0));
    let config = SynthesisConfig::default().with_execution(Execution::Sequential);

    let built = Synthesizer::new(speakers.clone(), config.clone())
        .with_beam(beam.clone())
        .render()
        .unwrap();
    let direct = synthesize(
        &speakers,
        &[beam.clone()],
        &Listener::Fixed(beam.focus),
        &config,
    )
    .unwrap();

    assert_eq!(built, direct);
}

#[test]
fn test_builder_accessors_and_listener() {
    let speakers = make_grid(2, 2, 0.2).unwrap();
    let mut synth = Synthesizer::new(speakers, SynthesisConfig::default());
    assert!(synth.beams().is_empty());
    assert!(synth.render().is_err());

    synth.add_beam(Beam::new(noise_track(64, 8000, 4), Vec3::new(0.0, 0.0, 2.0)));
    synth.set_listener(Listener::Fixed(Vec3::new(0.0, 0.0, 3.0)));

    assert_eq!(synth.beams().len(), 1);
    assert_eq!(synth.speakers().len(), 4);
    assert_eq!(synth.config().windowing, Windowing::Tapered);

    let output = synth.render().unwrap();
    assert_eq!(output.samples.len(), 64);
    assert_eq!(output.num_speakers, 4);
    assert!((output.duration_seconds() - 0.008).abs() < 1e-12);
}

#[test]
fn test_normalization_follows_windowing() {
    let speakers = make_grid(8, 1, 0.1).unwrap();
    let beam = Beam::new(noise_track(32, 8000, 5), Vec3::new(0.0, 0.0, 4.0));

    let tapered = Synthesizer::new(
        speakers.clone(),
        SynthesisConfig::default().with_windowing(Windowing::Tapered),
    )
    .with_beam(beam.clone())
    .render()
    .unwrap();
    let uniform = Synthesizer::new(
        speakers,
        SynthesisConfig::default().with_windowing(Windowing::Uniform),
    )
    .with_beam(beam)
    .render()
    .unwrap();

    assert!((tapered.normalization - 5.5).abs() < 1e-12);
    assert_eq!(uniform.normalization, 8.0);
}

#[test]
fn test_output_peak() {
    let output = SynthesisOutput {
        samples: vec![0.25, -0.75, 0.5],
        sample_rate: 8000,
        normalization: 1.0,
        num_speakers: 1,
        num_beams: 1,
    };
    assert_eq!(output.peak(), 0.75);
    assert_eq!(output.into_samples(), vec![0.25, -0.75, 0.5]);
}
