//! Run configuration.
//!
//! Everything a run depends on besides the tracks themselves is carried in
//! these values; there is no process-wide state.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::geometry::{make_grid, make_trajectory, SpeakerArray, Vec3};
use crate::propagation::SPEED_OF_SOUND_M_S;
use crate::synth::Listener;
use crate::window::WindowWeights;

/// Per-speaker weighting applied during synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Windowing {
    /// Hann skirts around a flat interior; see [`WindowWeights::tapered`].
    #[default]
    Tapered,
    /// Every speaker at unit weight.
    Uniform,
}

impl Windowing {
    /// Builds the weights for an array of `num_speakers`.
    pub fn weights(self, num_speakers: usize) -> WindowWeights {
        match self {
            Windowing::Tapered => WindowWeights::tapered(num_speakers),
            Windowing::Uniform => WindowWeights::uniform(num_speakers),
        }
    }
}

/// How speaker contributions are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    /// Worker pool over speakers with private partial buffers.
    ///
    /// Matches [`Execution::Sequential`] up to floating-point summation
    /// order.
    #[default]
    Parallel,
    /// One speaker after another; bit-reproducible.
    Sequential,
}

/// Settings for one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Speed of sound in m/s. `f64::INFINITY` disables delays.
    pub speed_of_sound: f64,
    /// Window applied across the speaker array.
    pub windowing: Windowing,
    /// Parallel or sequential accumulation.
    pub execution: Execution,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            speed_of_sound: SPEED_OF_SOUND_M_S,
            windowing: Windowing::default(),
            execution: Execution::default(),
        }
    }
}

impl SynthesisConfig {
    /// Sets the speed of sound.
    pub fn with_speed_of_sound(mut self, speed_of_sound: f64) -> Self {
        self.speed_of_sound = speed_of_sound;
        self
    }

    /// Sets the windowing mode.
    pub fn with_windowing(mut self, windowing: Windowing) -> Self {
        self.windowing = windowing;
        self
    }

    /// Sets the execution mode.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }
}

/// Declarative speaker-array layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayLayout {
    /// Regular grid centered on the origin; see [`make_grid`].
    Grid {
        /// Speakers per row.
        count_x: usize,
        /// Number of rows.
        count_y: usize,
        /// Distance between neighbours in meters.
        spacing: f64,
    },
    /// Explicit speaker positions.
    Positions(Vec<Vec3>),
}

impl ArrayLayout {
    /// Builds the speaker array.
    pub fn build(&self) -> EngineResult<SpeakerArray> {
        match self {
            ArrayLayout::Grid {
                count_x,
                count_y,
                spacing,
            } => make_grid(*count_x, *count_y, *spacing),
            ArrayLayout::Positions(positions) => SpeakerArray::new(positions.clone()),
        }
    }
}

/// Straight-line listener motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    /// Position at the first output sample.
    pub start: Vec3,
    /// Position at the last output sample.
    pub end: Vec3,
}

/// Declarative listener placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerSpec {
    /// The listener stays put.
    Fixed(Vec3),
    /// Linear motion over the whole output, one point per sample.
    Path(PathSpec),
    /// Explicit position per output sample.
    Points(Vec<Vec3>),
}

impl ListenerSpec {
    /// Resolves the listener for an output of `num_samples`.
    pub fn resolve(&self, num_samples: usize) -> EngineResult<Listener> {
        match self {
            ListenerSpec::Fixed(position) => Ok(Listener::Fixed(*position)),
            ListenerSpec::Path(path) => {
                make_trajectory(path.start, path.end, num_samples).map(Listener::Path)
            }
            ListenerSpec::Points(points) => Ok(Listener::Path(points.clone())),
        }
    }
}
