//! Beamforming synthesizer for combining steered tracks across an array.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use rayon::prelude::*;

use super::accumulate::{propagate_listener_path, Accumulator, RunPlan};
use super::observer::{ProgressObserver, SpeakerProgress};
use super::types::{Beam, Listener, SynthesisOutput};
use crate::config::{Execution, SynthesisConfig};
use crate::error::{EngineError, EngineResult, TargetRole};
use crate::geometry::SpeakerArray;
use crate::propagation::{propagate, validate_speed_of_sound};

/// Beamforming synthesizer.
///
/// Collects beams for one speaker array, then renders the waveform heard
/// by the listener.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    /// Speaker positions.
    speakers: SpeakerArray,
    /// Run settings.
    config: SynthesisConfig,
    /// Steered tracks.
    beams: Vec<Beam>,
    /// Listener; defaults to a fixed listener at the first beam's focus.
    listener: Option<Listener>,
}

impl Synthesizer {
    /// Creates a synthesizer.
    ///
    /// # Arguments
    /// * `speakers` - Speaker array
    /// * `config` - Speed of sound, windowing and execution mode
    pub fn new(speakers: SpeakerArray, config: SynthesisConfig) -> Self {
        Self {
            speakers,
            config,
            beams: Vec::new(),
            listener: None,
        }
    }

    /// Adds a beam.
    pub fn add_beam(&mut self, beam: Beam) {
        self.beams.push(beam);
    }

    /// Adds a beam, builder style.
    pub fn with_beam(mut self, beam: Beam) -> Self {
        self.add_beam(beam);
        self
    }

    /// Sets the listener.
    pub fn set_listener(&mut self, listener: Listener) {
        self.listener = Some(listener);
    }

    /// Sets the listener, builder style.
    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.set_listener(listener);
        self
    }

    /// Returns the speaker array.
    pub fn speakers(&self) -> &SpeakerArray {
        &self.speakers
    }

    /// Returns the run settings.
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Returns the beams added so far.
    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    /// Renders the output.
    pub fn render(&self) -> EngineResult<SynthesisOutput> {
        self.render_with_observer(&|_: SpeakerProgress| {})
    }

    /// Renders the output, reporting progress after each speaker.
    pub fn render_with_observer(
        &self,
        observer: &dyn ProgressObserver,
    ) -> EngineResult<SynthesisOutput> {
        let listener = match (&self.listener, self.beams.first()) {
            (Some(listener), _) => listener.clone(),
            (None, Some(first)) => Listener::Fixed(first.focus),
            (None, None) => return Err(no_beams()),
        };
        synthesize_with_observer(
            &self.speakers,
            &self.beams,
            &listener,
            &self.config,
            observer,
        )
    }
}

/// Synthesizes the waveform heard by `listener`.
///
/// All inputs are validated before any accumulation starts.
pub fn synthesize(
    speakers: &SpeakerArray,
    beams: &[Beam],
    listener: &Listener,
    config: &SynthesisConfig,
) -> EngineResult<SynthesisOutput> {
    synthesize_with_observer(speakers, beams, listener, config, &|_: SpeakerProgress| {})
}

/// Like [`synthesize`], reporting progress after each speaker.
pub fn synthesize_with_observer(
    speakers: &SpeakerArray,
    beams: &[Beam],
    listener: &Listener,
    config: &SynthesisConfig,
    observer: &dyn ProgressObserver,
) -> EngineResult<SynthesisOutput> {
    let plan = prepare(speakers, beams, listener, config)?;
    let total = plan.speakers.len();
    let n = plan.num_samples;

    debug!(
        "synthesizing {} beam(s) over {} speaker(s): {} samples at {} Hz, {:?}",
        beams.len(),
        total,
        n,
        plan.sample_rate,
        config.execution
    );

    let completed = AtomicUsize::new(0);
    let notify = |speaker: usize| {
        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        observer.speaker_done(SpeakerProgress {
            speaker,
            completed: done,
            total,
        });
    };

    let accumulated = match config.execution {
        Execution::Sequential => {
            let mut acc = Accumulator::new(n);
            for speaker in 0..total {
                acc.add_speaker(&plan, speaker)?;
                notify(speaker);
            }
            acc
        }
        Execution::Parallel => (0..total)
            .into_par_iter()
            .try_fold(
                || Accumulator::new(n),
                |mut acc, speaker| {
                    acc.add_speaker(&plan, speaker)?;
                    notify(speaker);
                    Ok::<_, EngineError>(acc)
                },
            )
            .try_reduce(|| Accumulator::new(n), |a, b| Ok(a.merge(b)))?,
    };

    let normalization = plan.weights.sum();
    let samples = accumulated.finish(normalization);

    debug!("synthesis done, normalization {}", normalization);

    Ok(SynthesisOutput {
        samples,
        sample_rate: beams[0].track.sample_rate(),
        normalization,
        num_speakers: total,
        num_beams: beams.len(),
    })
}

fn no_beams() -> EngineError {
    EngineError::invalid_param("beams", "at least one beam is required")
}

/// Checks every precondition and precomputes focal propagation.
fn prepare<'a>(
    speakers: &'a SpeakerArray,
    beams: &'a [Beam],
    listener: &'a Listener,
    config: &SynthesisConfig,
) -> EngineResult<RunPlan<'a>> {
    let first = beams.first().ok_or_else(no_beams)?;
    validate_speed_of_sound(config.speed_of_sound)?;

    let sample_rate = first.track.sample_rate();
    let num_samples = first.track.len();
    for (index, beam) in beams.iter().enumerate().skip(1) {
        if beam.track.sample_rate() != sample_rate {
            return Err(EngineError::MismatchedSampleRate {
                beam: index,
                expected: sample_rate,
                found: beam.track.sample_rate(),
            });
        }
        if beam.track.len() != num_samples {
            return Err(EngineError::MismatchedLength {
                beam: index,
                expected: num_samples,
                found: beam.track.len(),
            });
        }
    }

    for (index, beam) in beams.iter().enumerate() {
        if !beam.focus.is_finite() {
            return Err(EngineError::invalid_param(
                "focus",
                format!("beam {} has a non-finite focal point", index),
            ));
        }
    }

    match listener {
        Listener::Fixed(position) => {
            if !position.is_finite() {
                return Err(EngineError::invalid_param(
                    "listener",
                    "position must be finite",
                ));
            }
            for (speaker, &source) in speakers.iter().enumerate() {
                propagate(source, *position, config.speed_of_sound)
                    .map_err(|e| e.at_speaker(speaker, TargetRole::Listener { sample: 0 }))?;
            }
        }
        Listener::Path(points) => {
            if points.len() != num_samples {
                return Err(EngineError::ListenerLength {
                    expected: num_samples,
                    found: points.len(),
                });
            }
            if let Some(sample) = points.iter().position(|p| !p.is_finite()) {
                return Err(EngineError::invalid_param(
                    "listener",
                    format!("path point {} is not finite", sample),
                ));
            }
            let mut scratch = Vec::with_capacity(points.len());
            for (speaker, &source) in speakers.iter().enumerate() {
                propagate_listener_path(
                    speaker,
                    source,
                    points,
                    config.speed_of_sound,
                    &mut scratch,
                )?;
            }
        }
    }

    let focal = speakers
        .iter()
        .enumerate()
        .map(|(speaker, &source)| {
            beams
                .iter()
                .enumerate()
                .map(|(beam, b)| {
                    propagate(source, b.focus, config.speed_of_sound)
                        .map_err(|e| e.at_speaker(speaker, TargetRole::Focus { beam }))
                })
                .collect::<EngineResult<Vec<_>>>()
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let weights = config.windowing.weights(speakers.len());

    Ok(RunPlan {
        speakers: speakers.positions(),
        beams,
        listener,
        weights,
        focal,
        speed_of_sound: config.speed_of_sound,
        sample_rate: sample_rate as f64,
        num_samples,
    })
}
