//! Precondition failures.

use super::*;
use crate::config::{Execution, SynthesisConfig};
use crate::error::{EngineError, TargetRole};
use crate::geometry::{SpeakerArray, Vec3};
use crate::track::Track;

fn pair() -> SpeakerArray {
    SpeakerArray::new(vec![Vec3::new(-0.05, 0.0, 0.0), Vec3::new(0.05, 0.0, 0.0)]).unwrap()
}

fn track(len: usize, sample_rate: u32) -> Track {
    Track::new(vec![0.5; len], sample_rate).unwrap()
}

fn front() -> Vec3 {
    Vec3::new(0.0, 0.0, 5.0)
}

fn config() -> SynthesisConfig {
    SynthesisConfig::default().with_execution(Execution::Sequential)
}

#[test]
fn test_no_beams() {
    let err = synthesize(&pair(), &[], &Listener::Fixed(front()), &config()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidParameter { ref name, .. } if name == "beams"));
}

#[test]
fn test_mismatched_sample_rate() {
    let beams = [
        Beam::new(track(10, 44100), front()),
        Beam::new(track(10, 48000), front()),
    ];
    let err = synthesize(&pair(), &beams, &Listener::Fixed(front()), &config()).unwrap_err();
    assert_eq!(
        err,
        EngineError::MismatchedSampleRate {
            beam: 1,
            expected: 44100,
            found: 48000,
        }
    );
    assert_eq!(err.code(), "ENGINE_001");
}

#[test]
fn test_mismatched_length() {
    let beams = [
        Beam::new(track(10, 8000), front()),
        Beam::new(track(12, 8000), front()),
    ];
    let err = synthesize(&pair(), &beams, &Listener::Fixed(front()), &config()).unwrap_err();
    assert_eq!(
        err,
        EngineError::MismatchedLength {
            beam: 1,
            expected: 10,
            found: 12,
        }
    );
}

#[test]
fn test_listener_path_length() {
    let beams = [Beam::new(track(10, 8000), front())];
    let listener = Listener::Path(vec![front(); 9]);
    let err = synthesize(&pair(), &beams, &listener, &config()).unwrap_err();
    assert_eq!(
        err,
        EngineError::ListenerLength {
            expected: 10,
            found: 9,
        }
    );
}

#[test]
fn test_invalid_speed_of_sound() {
    let beams = [Beam::new(track(10, 8000), front())];
    for speed in [0.0, -343.0, f64::NAN] {
        let err = synthesize(
            &pair(),
            &beams,
            &Listener::Fixed(front()),
            &config().with_speed_of_sound(speed),
        )
        .unwrap_err();
        assert_eq!(err.code(), "ENGINE_007");
    }
}

#[test]
fn test_speaker_at_focus() {
    let focus = Vec3::new(0.05, 0.0, 0.0);
    let beams = [Beam::new(track(10, 8000), focus)];
    let err = synthesize(&pair(), &beams, &Listener::Fixed(front()), &config()).unwrap_err();
    assert_eq!(
        err,
        EngineError::DegenerateGeometry {
            speaker: 1,
            role: TargetRole::Focus { beam: 0 },
            position: focus,
        }
    );
}

#[test]
fn test_speaker_at_fixed_listener() {
    let listener = Vec3::new(-0.05, 0.0, 0.0);
    let beams = [Beam::new(track(10, 8000), front())];
    let err = synthesize(&pair(), &beams, &Listener::Fixed(listener), &config()).unwrap_err();
    assert_eq!(
        err,
        EngineError::DegenerateGeometry {
            speaker: 0,
            role: TargetRole::Listener { sample: 0 },
            position: listener,
        }
    );
}

#[test]
fn test_speaker_on_listener_path() {
    let beams = [Beam::new(track(6, 8000), front())];
    let mut path = vec![front(); 6];
    path[3] = Vec3::new(-0.05, 0.0, 0.0);

    for execution in [Execution::Sequential, Execution::Parallel] {
        let err = synthesize(
            &pair(),
            &beams,
            &Listener::Path(path.clone()),
            &config().with_execution(execution),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::DegenerateGeometry {
                speaker: 0,
                role: TargetRole::Listener { sample: 3 },
                position: Vec3::new(-0.05, 0.0, 0.0),
            }
        );
    }
}

#[test]
fn test_non_finite_focus_and_listener() {
    let nan = Vec3::new(f64::NAN, 0.0, 1.0);
    let beams = [Beam::new(track(4, 8000), nan)];
    assert!(synthesize(&pair(), &beams, &Listener::Fixed(front()), &config()).is_err());

    let beams = [Beam::new(track(4, 8000), front())];
    assert!(synthesize(&pair(), &beams, &Listener::Fixed(nan), &config()).is_err());
    assert!(synthesize(&pair(), &beams, &Listener::Path(vec![nan; 4]), &config()).is_err());
}
