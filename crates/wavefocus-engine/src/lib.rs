//! WaveFocus Beamforming Engine
//!
//! This crate synthesizes the sound a listener hears from an array of point
//! speakers, each playing one or more tracks with its own delay and gain so
//! that every track reinforces at its own focal point.
//!
//! # Overview
//!
//! A run takes a speaker array, one [`Beam`] per steered track, a
//! [`Listener`] (fixed or moving), and a [`SynthesisConfig`]. For every
//! speaker and beam the engine:
//!
//! - computes the delay and inverse-square attenuation to the beam's focus
//!   and to the listener at every output sample,
//! - reads the track at the warped time `t - (listener_delay - focal_delay)`
//!   with linear interpolation, silent outside the track,
//! - scales by `window_weight * listener_attenuation / focal_attenuation`
//!   and adds the result into the output,
//!
//! and finally divides the output by the sum of the window weights.
//!
//! # Determinism
//!
//! [`Execution::Sequential`] output is bit-identical across runs.
//! [`Execution::Parallel`] (the default) splits speakers across a `rayon`
//! pool and agrees with the sequential result up to floating-point
//! summation order. [`SynthesisOutput::fingerprint`] hashes the samples with
//! BLAKE3 for quick comparisons.
//!
//! # Example
//!
//! ```
//! use wavefocus_engine::{make_grid, Beam, Listener, SynthesisConfig, Track, Vec3};
//!
//! let speakers = make_grid(8, 1, 0.1)?;
//! let track = Track::new(vec![0.0; 800], 8000)?;
//! let focus = Vec3::new(0.5, 0.0, 3.0);
//!
//! let output = wavefocus_engine::synthesize(
//!     &speakers,
//!     &[Beam::new(track, focus)],
//!     &Listener::Fixed(focus),
//!     &SynthesisConfig::default(),
//! )?;
//! assert_eq!(output.samples.len(), 800);
//! # Ok::<(), wavefocus_engine::EngineError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`synth`] - The synthesis engine and progress observer
//! - [`geometry`] - Points, grid layouts, listener trajectories
//! - [`propagation`] - Delay and attenuation between two points
//! - [`window`] - Per-speaker weighting
//! - [`track`] - Sample buffers and interpolated reads
//! - [`prep`] - Length matching before a run
//! - [`config`] - Run settings and declarative layouts
//! - [`delay_sum`] - Whole-sample delay-and-sum steering
//! - [`rng`] - Deterministic RNG with seed derivation

pub mod config;
pub mod delay_sum;
pub mod error;
pub mod geometry;
pub mod prep;
pub mod propagation;
pub mod rng;
pub mod synth;
pub mod track;
pub mod window;

// Re-export main types at crate root
pub use config::{ArrayLayout, Execution, ListenerSpec, PathSpec, SynthesisConfig, Windowing};
pub use error::{EngineError, EngineResult, TargetRole};
pub use geometry::{make_grid, make_trajectory, SpeakerArray, Vec3};
pub use prep::{match_lengths, LengthPolicy};
pub use propagation::{propagate, propagate_path, Propagation, SPEED_OF_SOUND_M_S};
pub use synth::{
    synthesize, synthesize_with_observer, Beam, Listener, ProgressObserver, SpeakerProgress,
    SynthesisOutput, Synthesizer,
};
pub use track::Track;
pub use window::{hann, tapered_window, WindowWeights};
