//! WaveFocus CLI library.
//!
//! Scene loading, WAV input/output, and the command implementations behind
//! the `wavefocus` binary. The synthesis itself lives in `wavefocus_engine`.

pub mod audio_io;
pub mod commands;
pub mod scene;
