//! Mono sample buffers and time-warped reads.

use crate::error::{EngineError, EngineResult};

/// A fixed-length mono track at a known sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Track {
    /// Creates a track.
    ///
    /// Rejects a zero sample rate and an empty sample buffer.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> EngineResult<Self> {
        if sample_rate == 0 {
            return Err(EngineError::InvalidSampleRate { rate: sample_rate });
        }
        if samples.is_empty() {
            return Err(EngineError::invalid_param(
                "track",
                "must contain at least one sample",
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// The raw samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consumes the track, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a track holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (`len / sample_rate`).
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Time of the last sample in seconds.
    pub fn last_time(&self) -> f64 {
        (self.samples.len() - 1) as f64 / self.sample_rate as f64
    }

    /// The uniform time axis, `i / sample_rate` for every sample.
    pub fn times(&self) -> Vec<f64> {
        let rate = self.sample_rate as f64;
        (0..self.samples.len()).map(|i| i as f64 / rate).collect()
    }

    /// Linearly interpolated value at `time` seconds.
    ///
    /// Returns exactly 0.0 before the first sample or after the last one.
    pub fn sample_at(&self, time: f64) -> f64 {
        self.sample_at_position(time * self.sample_rate as f64)
    }

    /// Linearly interpolated value at a fractional sample position.
    ///
    /// Returns exactly 0.0 outside `[0, len - 1]`; never wraps.
    #[inline]
    pub fn sample_at_position(&self, position: f64) -> f64 {
        let last = (self.samples.len() - 1) as f64;
        // Also rejects NaN.
        if !(0.0..=last).contains(&position) {
            return 0.0;
        }

        let index = position.floor() as usize;
        let frac = position - index as f64;
        let s0 = self.samples[index];
        if frac == 0.0 {
            return s0;
        }
        let s1 = self.samples[index + 1];
        s0 + (s1 - s0) * frac
    }

    /// Returns a copy zero-padded (or truncated) to `len` samples.
    pub fn with_length(&self, len: usize) -> EngineResult<Track> {
        let mut samples = self.samples.clone();
        samples.resize(len, 0.0);
        Track::new(samples, self.sample_rate)
    }

    /// Returns a copy that loops the track until it is `len` samples long.
    pub fn tiled(&self, len: usize) -> EngineResult<Track> {
        let samples = self.samples.iter().copied().cycle().take(len).collect();
        Track::new(samples, self.sample_rate)
    }
}
