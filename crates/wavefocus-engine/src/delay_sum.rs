//! Whole-sample delay-and-sum.
//!
//! The simplest way to steer an array: each speaker plays the track late by
//! its own delay, rounded down to whole samples, and the copies are averaged.
//! There is no listener model and no windowing. Comparing focused delays
//! against random ones is a quick check that steering does anything at all.

use rand::Rng;

use crate::error::{EngineError, EngineResult, TargetRole};
use crate::geometry::{SpeakerArray, Vec3};
use crate::propagation::{propagate, validate_speed_of_sound};
use crate::rng::create_rng;
use crate::track::Track;

/// Longest output [`delay_and_sum`] produces: a 32-bit sample count.
pub const MAX_OUTPUT_SAMPLES: usize = u32::MAX as usize;

/// Propagation delay in seconds from every speaker to `focus`.
pub fn focus_delays(
    speakers: &SpeakerArray,
    focus: Vec3,
    speed_of_sound: f64,
) -> EngineResult<Vec<f64>> {
    validate_speed_of_sound(speed_of_sound)?;
    speakers
        .iter()
        .enumerate()
        .map(|(speaker, &source)| {
            propagate(source, focus, speed_of_sound)
                .map(|p| p.delay)
                .map_err(|e| e.at_speaker(speaker, TargetRole::Focus { beam: 0 }))
        })
        .collect()
}

/// Uniformly random delays in `[0, max_delay)` seconds.
///
/// The same `seed` always produces the same delays.
pub fn random_delays(count: usize, max_delay: f64, seed: u32) -> EngineResult<Vec<f64>> {
    if !(max_delay > 0.0 && max_delay.is_finite()) {
        return Err(EngineError::invalid_param(
            "max_delay",
            format!("must be a positive finite duration, got {}", max_delay),
        ));
    }
    let mut rng = create_rng(seed, "random_delays");
    Ok((0..count).map(|_| rng.gen_range(0.0..max_delay)).collect())
}

/// Averages copies of `track`, each delayed by one entry of `delays`.
///
/// Each copy starts `floor(delay * sample_rate)` samples late. The output is
/// long enough to hold the latest copy, so it is `track.len()` plus the
/// largest shift, and delays that would push it past
/// [`MAX_OUTPUT_SAMPLES`] are rejected.
pub fn delay_and_sum(track: &Track, delays: &[f64]) -> EngineResult<Vec<f64>> {
    if delays.is_empty() {
        return Err(EngineError::invalid_param(
            "delays",
            "at least one delay is required",
        ));
    }
    if let Some(index) = delays.iter().position(|d| !(*d >= 0.0 && d.is_finite())) {
        return Err(EngineError::invalid_param(
            "delays",
            format!(
                "delay {} must be non-negative and finite, got {}",
                index, delays[index]
            ),
        ));
    }

    let rate = track.sample_rate() as f64;
    let shift_limit = MAX_OUTPUT_SAMPLES.saturating_sub(track.len());
    let mut shifts = Vec::with_capacity(delays.len());
    for (index, &delay) in delays.iter().enumerate() {
        let shift = (delay * rate).floor();
        if shift > shift_limit as f64 {
            return Err(EngineError::invalid_param(
                "delays",
                format!(
                    "delay {} of {} s needs more than {} output samples",
                    index, delay, MAX_OUTPUT_SAMPLES
                ),
            ));
        }
        shifts.push(shift as usize);
    }
    let max_shift = shifts.iter().copied().max().unwrap_or(0);

    let mut output = vec![0.0; track.len() + max_shift];
    for &shift in &shifts {
        for (out, &sample) in output[shift..].iter_mut().zip(track.samples()) {
            *out += sample;
        }
    }

    let count = delays.len() as f64;
    for sample in output.iter_mut() {
        *sample /= count;
    }
    Ok(output)
}
