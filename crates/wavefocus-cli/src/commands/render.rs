//! Render command implementation
//!
//! Loads a scene, synthesizes what the listener hears, and writes a 16-bit
//! mono WAV.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use log::{debug, info};
use wavefocus_engine::{synthesize_with_observer, Execution, SpeakerProgress};

use crate::audio_io;
use crate::scene::SceneFile;

use super::json_output::{error_codes, RenderResult};
use super::{report, CommandFailure};

/// Options for `render`.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub scene: &'a str,
    pub output: &'a str,
    /// Peak-normalize to this many dB below full scale.
    pub headroom_db: Option<f64>,
    /// Force sequential accumulation regardless of the scene.
    pub sequential: bool,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 on input error, 2 on synthesis error
pub fn run(options: &RenderOptions<'_>, json_output: bool) -> Result<ExitCode> {
    if !json_output {
        println!("{} {}", "Rendering scene:".cyan().bold(), options.scene);
    }
    report(json_output, render(options), print_human)
}

fn render(options: &RenderOptions<'_>) -> std::result::Result<RenderResult, CommandFailure> {
    let start = Instant::now();

    if let Some(headroom) = options.headroom_db {
        if !(headroom >= 0.0 && headroom.is_finite()) {
            return Err(CommandFailure::input(
                error_codes::INVALID_ARGUMENT,
                anyhow::anyhow!("--headroom-db must be a non-negative number, got {}", headroom),
            ));
        }
    }

    let file = SceneFile::load(Path::new(options.scene)).map_err(|e| {
        CommandFailure::input(error_codes::SCENE_LOAD, e).with_file(options.scene)
    })?;
    let mut prepared = file.prepare().map_err(|e| {
        CommandFailure::input(error_codes::SCENE_INVALID, e).with_file(options.scene)
    })?;
    if options.sequential {
        prepared.config = prepared.config.with_execution(Execution::Sequential);
    }

    debug!(
        "rendering {} beams over {} speakers ({:?}, {:?})",
        prepared.beams.len(),
        prepared.speakers.len(),
        prepared.config.windowing,
        prepared.config.execution
    );
    let observer = |progress: SpeakerProgress| {
        debug!(
            "speaker {} done ({}/{})",
            progress.speaker, progress.completed, progress.total
        );
    };
    let output = synthesize_with_observer(
        &prepared.speakers,
        &prepared.beams,
        &prepared.listener,
        &prepared.config,
        &observer,
    )
    .map_err(|e| CommandFailure::synthesis(&e).with_file(options.scene))?;

    let peak = output.peak();
    let fingerprint = output.fingerprint();
    let normalization = output.normalization;
    let num_speakers = output.num_speakers;
    let num_beams = output.num_beams;
    let sample_rate = output.sample_rate;
    let duration_seconds = output.duration_seconds();

    let mut samples = output.into_samples();
    let gain = options
        .headroom_db
        .and_then(|headroom| audio_io::normalize_peak(&mut samples, headroom));

    let written = audio_io::write_mono(Path::new(options.output), &samples, sample_rate)
        .map_err(|e| {
            CommandFailure::input(error_codes::AUDIO_WRITE, e).with_file(options.output)
        })?;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    info!(
        "wrote {} ({} samples, peak {:.4}) in {} ms",
        options.output, written.num_samples, peak, elapsed_ms
    );

    Ok(RenderResult {
        output: options.output.to_string(),
        sample_rate,
        num_samples: written.num_samples,
        duration_seconds,
        num_speakers,
        num_beams,
        normalization,
        peak,
        gain,
        clipped_samples: written.clipped_samples,
        pcm_hash: written.pcm_hash,
        fingerprint,
        elapsed_ms,
    })
}

fn print_human(result: &RenderResult) {
    println!(
        "  {} {} speakers, {} beam(s)",
        "Array:".dimmed(),
        result.num_speakers,
        result.num_beams
    );
    println!(
        "  {} {} samples at {} Hz ({:.3} s)",
        "Output:".dimmed(),
        result.num_samples,
        result.sample_rate,
        result.duration_seconds
    );
    println!(
        "  {} {:.4} (normalized by {:.3})",
        "Peak:".dimmed(),
        result.peak,
        result.normalization
    );
    if let Some(gain) = result.gain {
        println!("  {} {:.4}", "Gain:".dimmed(), gain);
    }
    if result.clipped_samples > 0 {
        println!(
            "  {} {} samples clipped",
            "Warning:".yellow().bold(),
            result.clipped_samples
        );
    }
    println!("  {} {}", "PCM hash:".dimmed(), result.pcm_hash);
    println!(
        "\n{} {} ({} ms)",
        "Wrote".green().bold(),
        result.output,
        result.elapsed_ms
    );
}
