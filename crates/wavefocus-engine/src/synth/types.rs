//! Inputs and output of one synthesis run.

use crate::geometry::Vec3;
use crate::track::Track;

/// One steered track: the audio and the point it is focused on.
#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    /// Source audio.
    pub track: Track,
    /// Focal point in meters.
    pub focus: Vec3,
}

impl Beam {
    /// Creates a beam.
    pub fn new(track: Track, focus: Vec3) -> Self {
        Self { track, focus }
    }
}

/// Where the output is heard.
#[derive(Debug, Clone, PartialEq)]
pub enum Listener {
    /// The same position for every output sample.
    Fixed(Vec3),
    /// One position per output sample.
    Path(Vec<Vec3>),
}

/// The synthesized waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutput {
    /// Output samples, already normalized.
    pub samples: Vec<f64>,
    /// Sample rate in Hz, shared with the input tracks.
    pub sample_rate: u32,
    /// Divisor applied to the accumulated sum.
    pub normalization: f64,
    /// Number of speakers that contributed.
    pub num_speakers: usize,
    /// Number of beams that contributed.
    pub num_beams: usize,
}

impl SynthesisOutput {
    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.abs())
            .fold(0.0_f64, |a, b| a.max(b))
    }

    /// BLAKE3 hash of the samples as little-endian f64 bytes.
    ///
    /// Two outputs with equal fingerprints are bit-identical.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for sample in &self.samples {
            hasher.update(&sample.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Consumes the output, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}
