//! JSON output types for machine-readable CLI output.
//!
//! Every command accepting `--json` prints one [`CommandOutput`] document.

use serde::{Deserialize, Serialize};
use wavefocus_engine::Vec3;

/// Error codes for CLI operations.
///
/// Engine failures pass their own `ENGINE_XXX` codes through unchanged.
pub mod error_codes {
    /// Scene file could not be read or parsed
    pub const SCENE_LOAD: &str = "CLI_001";
    /// Scene could not be resolved (array, tracks, listener)
    pub const SCENE_INVALID: &str = "CLI_002";
    /// WAV input could not be read
    pub const AUDIO_READ: &str = "CLI_003";
    /// WAV output could not be written
    pub const AUDIO_WRITE: &str = "CLI_004";
    /// Invalid command-line argument
    pub const INVALID_ARGUMENT: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "ENGINE_006")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error is about (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Envelope shared by every `--json` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors (empty on success)
    pub errors: Vec<JsonError>,
    /// Command result (absent on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Result of `render`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderResult {
    /// Written WAV file
    pub output: String,
    pub sample_rate: u32,
    pub num_samples: usize,
    pub duration_seconds: f64,
    pub num_speakers: usize,
    pub num_beams: usize,
    /// Window-weight sum the output was divided by
    pub normalization: f64,
    /// Peak before any headroom normalization
    pub peak: f64,
    /// Gain applied by `--headroom-db` (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
    /// Samples clipped when converting to 16-bit PCM
    pub clipped_samples: usize,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
    /// BLAKE3 hash of the floating-point output
    pub fingerprint: String,
    pub elapsed_ms: u64,
}

/// Delay and attenuation from one speaker to one focus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeakerDelay {
    pub speaker: usize,
    pub position: Vec3,
    /// Seconds
    pub delay: f64,
    pub attenuation: f64,
}

/// Every speaker's delay toward one beam's focus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeamDelays {
    pub beam: usize,
    pub focus: Vec3,
    pub min_delay: f64,
    pub max_delay: f64,
    pub speakers: Vec<SpeakerDelay>,
}

/// Result of `delays`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelaysResult {
    pub speed_of_sound: f64,
    pub num_speakers: usize,
    pub beams: Vec<BeamDelays>,
}

/// Result of `window`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowResult {
    pub num_speakers: usize,
    pub windowing: String,
    pub weights: Vec<f64>,
    pub sum: f64,
}

/// One WAV written by `delay-sum`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelaySumFile {
    pub output: String,
    pub num_samples: usize,
    pub max_delay: f64,
    pub pcm_hash: String,
}

/// Result of `delay-sum`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelaySumResult {
    pub sample_rate: u32,
    pub num_speakers: usize,
    pub seed: u32,
    pub focused: DelaySumFile,
    pub random: DelaySumFile,
}
