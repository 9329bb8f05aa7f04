//! Error types for the beamforming engine.

use std::fmt;

use thiserror::Error;

use crate::geometry::Vec3;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Which target a speaker collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRole {
    /// The focal point of a beam.
    Focus {
        /// Index of the beam.
        beam: usize,
    },
    /// The listener position at one output sample.
    Listener {
        /// Output sample index (0 for a fixed listener).
        sample: usize,
    },
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRole::Focus { beam } => write!(f, "focus of beam {}", beam),
            TargetRole::Listener { sample } => write!(f, "listener at sample {}", sample),
        }
    }
}

/// Errors that can occur while preparing or running a synthesis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Two tracks meant to play together have different sample rates.
    #[error("sample rate mismatch in beam {beam}: expected {expected} Hz, found {found} Hz")]
    MismatchedSampleRate {
        /// Index of the offending beam or track.
        beam: usize,
        /// Sample rate of the first track.
        expected: u32,
        /// Sample rate of the offending track.
        found: u32,
    },

    /// Two buffers meant to line up have different lengths.
    #[error("length mismatch in beam {beam}: expected {expected} samples, found {found}")]
    MismatchedLength {
        /// Index of the offending beam or track.
        beam: usize,
        /// Expected number of samples.
        expected: usize,
        /// Actual number of samples.
        found: usize,
    },

    /// A listener path does not have one point per output sample.
    #[error("listener path has {found} points but the output has {expected} samples")]
    ListenerLength {
        /// Number of output samples.
        expected: usize,
        /// Number of path points.
        found: usize,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Source and target coincide, so delay and attenuation are undefined.
    #[error("zero distance between source and target at {position}")]
    ZeroDistance {
        /// The shared position.
        position: Vec3,
    },

    /// A speaker coincides with a focal point or listener position.
    #[error("degenerate geometry: speaker {speaker} coincides with the {role} at {position}")]
    DegenerateGeometry {
        /// Index of the speaker.
        speaker: usize,
        /// The target the speaker collided with.
        role: TargetRole,
        /// The shared position.
        position: Vec3,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl EngineError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::MismatchedSampleRate { .. } => "ENGINE_001",
            EngineError::MismatchedLength { .. } => "ENGINE_002",
            EngineError::ListenerLength { .. } => "ENGINE_003",
            EngineError::InvalidSampleRate { .. } => "ENGINE_004",
            EngineError::ZeroDistance { .. } => "ENGINE_005",
            EngineError::DegenerateGeometry { .. } => "ENGINE_006",
            EngineError::InvalidParameter { .. } => "ENGINE_007",
        }
    }

    /// Attaches speaker context to a bare [`EngineError::ZeroDistance`].
    ///
    /// Other errors pass through unchanged.
    pub(crate) fn at_speaker(self, speaker: usize, role: TargetRole) -> Self {
        match self {
            EngineError::ZeroDistance { position } => EngineError::DegenerateGeometry {
                speaker,
                role,
                position,
            },
            other => other,
        }
    }
}
