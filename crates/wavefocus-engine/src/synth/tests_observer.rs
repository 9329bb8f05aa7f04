//! Tests for progress reporting.

use std::sync::Mutex;

use super::*;
use crate::config::{Execution, SynthesisConfig};
use crate::error::{EngineError, TargetRole};
use crate::geometry::{make_grid, SpeakerArray, Vec3};
use crate::track::Track;

fn beam() -> Beam {
    Beam::new(
        Track::new(vec![0.25; 64], 8000).unwrap(),
        Vec3::new(0.0, 0.0, 2.0),
    )
}

#[test]
fn test_sequential_progress_is_ordered() {
    let speakers = make_grid(3, 2, 0.1).unwrap();
    let seen = Mutex::new(Vec::new());
    let observer = |p: SpeakerProgress| seen.lock().unwrap().push(p);

    synthesize_with_observer(
        &speakers,
        &[beam()],
        &Listener::Fixed(Vec3::new(0.0, 0.0, 3.0)),
        &SynthesisConfig::default().with_execution(Execution::Sequential),
        &observer,
    )
    .unwrap();

    let seen = seen.into_inner().unwrap();
    let expected: Vec<SpeakerProgress> = (0..6)
        .map(|speaker| SpeakerProgress {
            speaker,
            completed: speaker + 1,
            total: 6,
        })
        .collect();
    assert_eq!(seen, expected);
    assert_eq!(seen.last().unwrap().fraction(), 1.0);
}

#[test]
fn test_parallel_progress_covers_every_speaker() {
    let speakers = make_grid(8, 4, 0.1).unwrap();
    let seen = Mutex::new(Vec::new());
    let observer = |p: SpeakerProgress| seen.lock().unwrap().push(p);

    Synthesizer::new(speakers, SynthesisConfig::default())
        .with_beam(beam())
        .render_with_observer(&observer)
        .unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 32);

    let mut speakers: Vec<usize> = seen.iter().map(|p| p.speaker).collect();
    speakers.sort_unstable();
    assert_eq!(speakers, (0..32).collect::<Vec<_>>());

    let mut completed: Vec<usize> = seen.iter().map(|p| p.completed).collect();
    completed.sort_unstable();
    assert_eq!(completed, (1..=32).collect::<Vec<_>>());
    assert!(seen.iter().all(|p| p.total == 32));
}

#[test]
fn test_fraction() {
    let p = SpeakerProgress {
        speaker: 0,
        completed: 1,
        total: 4,
    };
    assert_eq!(p.fraction(), 0.25);
}

#[test]
fn test_degenerate_listener_path_fails_before_any_progress() {
    let speakers =
        SpeakerArray::new(vec![Vec3::new(-0.05, 0.0, 0.0), Vec3::new(0.05, 0.0, 0.0)]).unwrap();
    let mut path = vec![Vec3::new(0.0, 0.0, 3.0); 64];
    path[3] = Vec3::new(0.05, 0.0, 0.0);

    for execution in [Execution::Sequential, Execution::Parallel] {
        let seen = Mutex::new(Vec::new());
        let observer = |p: SpeakerProgress| seen.lock().unwrap().push(p);

        let err = synthesize_with_observer(
            &speakers,
            &[beam()],
            &Listener::Path(path.clone()),
            &SynthesisConfig::default().with_execution(execution),
            &observer,
        )
        .unwrap_err();

        assert_eq!(
            err,
            EngineError::DegenerateGeometry {
                speaker: 1,
                role: TargetRole::Listener { sample: 3 },
                position: Vec3::new(0.05, 0.0, 0.0),
            }
        );
        assert!(seen.into_inner().unwrap().is_empty());
    }
}
