//! Beamforming synthesis.
//!
//! Every speaker plays every beam's track, pre-advanced by the speaker's
//! delay to that beam's focus and pre-scaled to undo the focal attenuation,
//! so that all copies arrive together at the focal point. The listener hears
//! each copy after the real propagation from speaker to listener. Speaker
//! contributions are independent and summed, then divided once by the sum of
//! the window weights.

mod accumulate;
mod observer;
mod synthesizer;
mod types;

#[cfg(test)]
mod tests_observer;
#[cfg(test)]
mod tests_scenarios;
#[cfg(test)]
mod tests_synthesizer;
#[cfg(test)]
mod tests_validation;

// Re-export public API
pub use observer::{ProgressObserver, SpeakerProgress};
pub use synthesizer::{synthesize, synthesize_with_observer, Synthesizer};
pub use types::{Beam, Listener, SynthesisOutput};
