//! Length matching for tracks that will play together.
//!
//! The synthesizer requires every beam's track to share one sample rate and
//! one length. This module is where mismatched inputs get reconciled,
//! before a run starts.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::track::Track;

/// How to reconcile tracks of different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Zero-pad every track to the longest.
    #[default]
    Pad,
    /// Loop shorter tracks until they reach the longest.
    Tile,
    /// Cut every track to the shortest.
    Truncate,
}

/// Ensures all tracks share the first track's sample rate.
pub fn check_sample_rates(tracks: &[Track]) -> EngineResult<()> {
    let Some(first) = tracks.first() else {
        return Ok(());
    };
    let expected = first.sample_rate();
    for (beam, track) in tracks.iter().enumerate().skip(1) {
        if track.sample_rate() != expected {
            return Err(EngineError::MismatchedSampleRate {
                beam,
                expected,
                found: track.sample_rate(),
            });
        }
    }
    Ok(())
}

/// Brings every track to a common length.
///
/// Sample rates are checked first; no resampling is ever performed.
pub fn match_lengths(tracks: Vec<Track>, policy: LengthPolicy) -> EngineResult<Vec<Track>> {
    check_sample_rates(&tracks)?;

    let lengths = tracks.iter().map(Track::len);
    let target = match policy {
        LengthPolicy::Pad | LengthPolicy::Tile => lengths.max(),
        LengthPolicy::Truncate => lengths.min(),
    };
    let Some(target) = target else {
        return Ok(tracks);
    };

    tracks
        .into_iter()
        .map(|track| {
            if track.len() == target {
                Ok(track)
            } else {
                match policy {
                    LengthPolicy::Pad | LengthPolicy::Truncate => track.with_length(target),
                    LengthPolicy::Tile => track.tiled(target),
                }
            }
        })
        .collect()
}
