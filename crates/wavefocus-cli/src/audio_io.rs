//! WAV decoding and encoding.
//!
//! Input files may be any integer or float WAV that `hound` reads; channels
//! are averaged to mono. Output is always 16-bit PCM mono, and the BLAKE3
//! hash of the PCM payload is returned so runs can be compared without
//! caring about header bytes.

use std::path::Path;

use anyhow::{bail, Context, Result};
use wavefocus_engine::Track;

/// Summary of a written WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenWav {
    /// BLAKE3 hash of the little-endian 16-bit PCM samples.
    pub pcm_hash: String,
    /// Number of samples written.
    pub num_samples: usize,
    /// Samples that fell outside `[-1, 1]` and were clipped.
    pub clipped_samples: usize,
}

/// Reads a WAV file into a mono track.
pub fn read_track(path: &Path) -> Result<Track> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        bail!("WAV file has no channels: {}", path.display());
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<Result<_, _>>()
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>(),
    }
    .with_context(|| format!("Failed to decode samples: {}", path.display()))?;

    let mono = downmix(&interleaved, spec.channels as usize);
    log::debug!(
        "read {} ({} Hz, {} channels, {} frames)",
        path.display(),
        spec.sample_rate,
        spec.channels,
        mono.len()
    );
    Track::new(mono, spec.sample_rate)
        .with_context(|| format!("Unusable audio in {}", path.display()))
}

/// Averages interleaved frames to one channel.
///
/// A trailing partial frame is dropped.
pub fn downmix(interleaved: &[f64], channels: usize) -> Vec<f64> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}

/// Scales `samples` so the peak sits `headroom_db` below full scale.
///
/// Returns the gain applied, or `None` for silence.
pub fn normalize_peak(samples: &mut [f64], headroom_db: f64) -> Option<f64> {
    let target_peak = 10.0_f64.powf(-headroom_db / 20.0);
    let current_peak = samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max);

    if current_peak > 0.0 {
        let gain = target_peak / current_peak;
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
        Some(gain)
    } else {
        None
    }
}

/// Converts samples to 16-bit PCM, clipping to `[-1, 1]`.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16)
        .collect()
}

/// BLAKE3 hex hash of PCM samples as little-endian bytes.
pub fn pcm_hash(pcm: &[i16]) -> String {
    let mut hasher = blake3::Hasher::new();
    for value in pcm {
        hasher.update(&value.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Writes mono samples as a 16-bit PCM WAV file.
pub fn write_mono(path: &Path, samples: &[f64], sample_rate: u32) -> Result<WrittenWav> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let pcm = samples_to_pcm16(samples);

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;
    for &value in &pcm {
        writer
            .write_sample(value)
            .with_context(|| format!("Failed to write WAV file: {}", path.display()))?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file: {}", path.display()))?;

    let clipped_samples = samples.iter().filter(|s| s.abs() > 1.0).count();
    if clipped_samples > 0 {
        log::warn!(
            "{} of {} samples clipped in {}",
            clipped_samples,
            samples.len(),
            path.display()
        );
    }

    Ok(WrittenWav {
        pcm_hash: pcm_hash(&pcm),
        num_samples: pcm.len(),
        clipped_samples,
    })
}
