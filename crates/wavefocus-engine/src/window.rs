//! Per-speaker amplitude weighting.
//!
//! A hard-edged array radiates strong side lobes. The tapered window keeps
//! the middle half of the array at full weight and rolls the outer quarters
//! off with the two halves of a Hann curve.

use std::f64::consts::PI;

/// Symmetric Hann window of length `len`.
///
/// Matches the usual definition `0.5 - 0.5 cos(2πn / (len - 1))`, with
/// `hann(1) == [1.0]` and `hann(0)` empty.
pub fn hann(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (len - 1) as f64;
            (0..len)
                .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f64 / denom).cos())
                .collect()
        }
    }
}

/// Window weights, one per speaker index, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowWeights {
    weights: Vec<f64>,
}

impl WindowWeights {
    /// Unit weights for every speaker (no windowing).
    pub fn uniform(num_speakers: usize) -> Self {
        Self {
            weights: vec![1.0; num_speakers],
        }
    }

    /// Tapered window: Hann skirts around a flat interior.
    ///
    /// With `m = num_speakers / 2` (floor), the weights are the first half
    /// of `hann(m)`, then `num_speakers - m` ones, then the second half of
    /// `hann(m)`. For even counts the flat run is exactly half the array.
    /// For odd counts the flat run takes the extra speaker, so the length
    /// always equals `num_speakers`.
    pub fn tapered(num_speakers: usize) -> Self {
        let skirt_len = num_speakers / 2;
        let skirt = hann(skirt_len);
        let (rising, falling) = skirt.split_at(skirt_len / 2);

        let mut weights = Vec::with_capacity(num_speakers);
        weights.extend_from_slice(rising);
        weights.extend(std::iter::repeat(1.0).take(num_speakers - skirt_len));
        weights.extend_from_slice(falling);

        Self { weights }
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weights in speaker order.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of one speaker.
    pub fn get(&self, speaker: usize) -> Option<f64> {
        self.weights.get(speaker).copied()
    }

    /// Sum of all weights; the output normalization divisor.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Shorthand for [`WindowWeights::tapered`].
pub fn tapered_window(num_speakers: usize) -> WindowWeights {
    WindowWeights::tapered(num_speakers)
}
