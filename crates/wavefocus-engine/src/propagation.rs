//! Free-field propagation from a point source.
//!
//! Delay is distance over the speed of sound; attenuation is the
//! inverse square of distance. Both are undefined at zero distance, which
//! is reported as [`EngineError::ZeroDistance`].

use crate::error::{EngineError, EngineResult};
use crate::geometry::Vec3;

/// Speed of sound in dry air at 20 °C, in m/s.
pub const SPEED_OF_SOUND_M_S: f64 = 343.0;

/// Delay and attenuation between one source and one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagation {
    /// Travel time in seconds (≥ 0).
    pub delay: f64,
    /// Amplitude scale, `1 / distance²` (> 0).
    pub attenuation: f64,
}

/// Checks that a speed of sound is usable.
///
/// Positive infinity is accepted and collapses every delay to zero.
pub fn validate_speed_of_sound(speed_of_sound: f64) -> EngineResult<()> {
    if speed_of_sound > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_param(
            "speed_of_sound",
            format!("must be positive, got {}", speed_of_sound),
        ))
    }
}

/// Computes delay and attenuation from `source` to a fixed `target`.
///
/// The caller is expected to have validated `speed_of_sound`.
#[inline]
pub fn propagate(source: Vec3, target: Vec3, speed_of_sound: f64) -> EngineResult<Propagation> {
    let distance = source.distance(target);
    if !(distance > 0.0 && distance.is_finite()) {
        return Err(EngineError::ZeroDistance { position: target });
    }

    Ok(Propagation {
        delay: distance / speed_of_sound,
        attenuation: 1.0 / (distance * distance),
    })
}

/// Computes one propagation per trajectory point.
pub fn propagate_path(
    source: Vec3,
    path: &[Vec3],
    speed_of_sound: f64,
) -> EngineResult<Vec<Propagation>> {
    let mut out = Vec::with_capacity(path.len());
    propagate_path_into(source, path, speed_of_sound, &mut out)?;
    Ok(out)
}

/// Like [`propagate_path`], but fills a reusable buffer.
///
/// `out` is cleared first. On error it holds the propagations before the
/// failing point, so `out.len()` is the index of that point.
pub fn propagate_path_into(
    source: Vec3,
    path: &[Vec3],
    speed_of_sound: f64,
    out: &mut Vec<Propagation>,
) -> EngineResult<()> {
    out.clear();
    out.reserve(path.len());
    for &target in path {
        out.push(propagate(source, target, speed_of_sound)?);
    }
    Ok(())
}
