//! Per-speaker accumulation kernel.

use super::types::{Beam, Listener};
use crate::error::{EngineResult, TargetRole};
use crate::geometry::Vec3;
use crate::propagation::{propagate, propagate_path_into, Propagation};
use crate::window::WindowWeights;

/// Validated, read-only inputs shared by every worker.
pub(crate) struct RunPlan<'a> {
    pub speakers: &'a [Vec3],
    pub beams: &'a [Beam],
    pub listener: &'a Listener,
    pub weights: WindowWeights,
    /// Focal propagation per speaker, one entry per beam.
    pub focal: Vec<Vec<Propagation>>,
    pub speed_of_sound: f64,
    pub sample_rate: f64,
    pub num_samples: usize,
}

/// Fills `scratch` with the propagation from one speaker to every point of a
/// listener path.
///
/// A degenerate point is reported with its sample index.
pub(crate) fn propagate_listener_path(
    speaker: usize,
    source: Vec3,
    points: &[Vec3],
    speed_of_sound: f64,
    scratch: &mut Vec<Propagation>,
) -> EngineResult<()> {
    match propagate_path_into(source, points, speed_of_sound, scratch) {
        Ok(()) => Ok(()),
        Err(e) => Err(e.at_speaker(
            speaker,
            TargetRole::Listener {
                sample: scratch.len(),
            },
        )),
    }
}

/// A partial output buffer plus propagation scratch space.
///
/// Each worker owns one; partial buffers are summed at the end.
pub(crate) struct Accumulator {
    output: Vec<f64>,
    scratch: Vec<Propagation>,
}

impl Accumulator {
    pub fn new(num_samples: usize) -> Self {
        Self {
            output: vec![0.0; num_samples],
            scratch: Vec::new(),
        }
    }

    /// Adds every beam as played by one speaker.
    pub fn add_speaker(&mut self, plan: &RunPlan<'_>, speaker: usize) -> EngineResult<()> {
        let position = plan.speakers[speaker];
        let weight = plan.weights.as_slice()[speaker];
        let focal = &plan.focal[speaker];

        match plan.listener {
            Listener::Fixed(target) => {
                let heard = propagate(position, *target, plan.speed_of_sound)
                    .map_err(|e| e.at_speaker(speaker, TargetRole::Listener { sample: 0 }))?;

                for (beam, focus) in plan.beams.iter().zip(focal) {
                    let shift = (heard.delay - focus.delay) * plan.sample_rate;
                    let gain = weight * heard.attenuation / focus.attenuation;
                    for (i, out) in self.output.iter_mut().enumerate() {
                        *out += gain * beam.track.sample_at_position(i as f64 - shift);
                    }
                }
            }
            Listener::Path(points) => {
                propagate_listener_path(
                    speaker,
                    position,
                    points,
                    plan.speed_of_sound,
                    &mut self.scratch,
                )?;

                for (beam, focus) in plan.beams.iter().zip(focal) {
                    let scale = weight / focus.attenuation;
                    for (i, (out, heard)) in self.output.iter_mut().zip(&self.scratch).enumerate() {
                        let shift = (heard.delay - focus.delay) * plan.sample_rate;
                        *out += scale
                            * heard.attenuation
                            * beam.track.sample_at_position(i as f64 - shift);
                    }
                }
            }
        }

        Ok(())
    }

    /// Sums another partial buffer into this one.
    pub fn merge(mut self, other: Accumulator) -> Accumulator {
        for (a, b) in self.output.iter_mut().zip(&other.output) {
            *a += b;
        }
        self
    }

    /// Applies the normalization divisor and returns the buffer.
    pub fn finish(self, normalization: f64) -> Vec<f64> {
        let mut output = self.output;
        for sample in output.iter_mut() {
            *sample /= normalization;
        }
        output
    }
}
