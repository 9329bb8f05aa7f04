//! Points in space, speaker-array layouts, and listener trajectories.
//!
//! All coordinates are in meters. Speaker arrays live in the z=0 plane and
//! are centered on the origin; listeners and focal points sit in front of
//! the array (positive z).

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An immutable 3-D point or displacement, in meters.
///
/// Serializes as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    /// Creates a new point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Vec3) -> f64 {
        (self - other).norm()
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: Vec3, t: f64) -> Vec3 {
        self + (other - self) * t
    }

    /// Returns true if every coordinate is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An ordered, non-empty set of speaker positions.
///
/// The index of a speaker is its identity for window lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerArray {
    positions: Vec<Vec3>,
}

impl SpeakerArray {
    /// Creates an array from explicit positions.
    pub fn new(positions: Vec<Vec3>) -> EngineResult<Self> {
        if positions.is_empty() {
            return Err(EngineError::invalid_param(
                "speakers",
                "array must contain at least one speaker",
            ));
        }
        if let Some(index) = positions.iter().position(|p| !p.is_finite()) {
            return Err(EngineError::invalid_param(
                "speakers",
                format!("speaker {} has a non-finite position", index),
            ));
        }
        Ok(Self { positions })
    }

    /// Number of speakers.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; an array holds at least one speaker.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Speaker positions in index order.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Iterates over speaker positions in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vec3> {
        self.positions.iter()
    }
}

impl<'a> IntoIterator for &'a SpeakerArray {
    type Item = &'a Vec3;
    type IntoIter = std::slice::Iter<'a, Vec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

/// Builds a regular rectangular grid of speakers in the z=0 plane.
///
/// The grid is centered on the origin, adjacent speakers are exactly
/// `spacing` meters apart, and positions are row-major: index
/// `iy * count_x + ix`, with x varying fastest. `count_y = 1` gives a
/// linear array along x.
///
/// # Arguments
/// * `count_x` - Speakers per row
/// * `count_y` - Number of rows
/// * `spacing` - Distance between neighbours in meters
pub fn make_grid(count_x: usize, count_y: usize, spacing: f64) -> EngineResult<SpeakerArray> {
    if count_x == 0 || count_y == 0 {
        return Err(EngineError::invalid_param(
            "grid",
            format!(
                "speaker counts must be at least 1, got {}x{}",
                count_x, count_y
            ),
        ));
    }
    if !(spacing > 0.0 && spacing.is_finite()) {
        return Err(EngineError::invalid_param(
            "grid.spacing",
            format!("must be a positive finite distance, got {}", spacing),
        ));
    }

    let offset = |index: usize, count: usize| (index as f64 - (count - 1) as f64 / 2.0) * spacing;

    let positions = (0..count_y)
        .flat_map(|iy| {
            (0..count_x).map(move |ix| Vec3::new(offset(ix, count_x), offset(iy, count_y), 0.0))
        })
        .collect();

    SpeakerArray::new(positions)
}

/// Builds a straight-line trajectory from `start` to `end`.
///
/// Returns exactly `num_samples` points with uniform spacing, including
/// both endpoints. A single sample returns `[start]`.
pub fn make_trajectory(start: Vec3, end: Vec3, num_samples: usize) -> EngineResult<Vec<Vec3>> {
    if num_samples == 0 {
        return Err(EngineError::invalid_param(
            "trajectory.num_samples",
            "must be at least 1",
        ));
    }
    if num_samples == 1 {
        return Ok(vec![start]);
    }

    let last = num_samples - 1;
    let mut points: Vec<Vec3> = (0..last)
        .map(|i| start.lerp(end, i as f64 / last as f64))
        .collect();
    points.push(end);
    Ok(points)
}
