//! Delay-sum command implementation
//!
//! Plays one input track through the scene's array twice with whole-sample
//! delays: once steered at the first beam's focus and once with random
//! delays as a control. Both results are written to the output directory.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use wavefocus_engine::delay_sum::{delay_and_sum, focus_delays, random_delays};

use crate::audio_io;
use crate::scene::SceneFile;

use super::json_output::{error_codes, DelaySumFile, DelaySumResult};
use super::{report, CommandFailure};

/// Default upper bound of the random control delays, in seconds.
pub const DEFAULT_MAX_RANDOM_DELAY: f64 = 0.1;

/// Options for `delay-sum`.
#[derive(Debug, Clone)]
pub struct DelaySumOptions<'a> {
    pub input: &'a str,
    pub scene: &'a str,
    pub out_dir: &'a str,
    pub seed: u32,
    pub max_random_delay: f64,
}

/// Run the delay-sum command
///
/// # Returns
/// Exit code: 0 on success, 1 on input error, 2 on synthesis error
pub fn run(options: &DelaySumOptions<'_>, json_output: bool) -> Result<ExitCode> {
    report(json_output, delay_sum(options), print_human)
}

fn delay_sum(options: &DelaySumOptions<'_>) -> std::result::Result<DelaySumResult, CommandFailure> {
    let file = SceneFile::load(Path::new(options.scene)).map_err(|e| {
        CommandFailure::input(error_codes::SCENE_LOAD, e).with_file(options.scene)
    })?;
    let scene = &file.scene;
    let speakers = scene.speakers().map_err(|e| {
        CommandFailure::input(error_codes::SCENE_INVALID, e).with_file(options.scene)
    })?;
    let focus = scene.primary_focus().map_err(|e| {
        CommandFailure::input(error_codes::SCENE_INVALID, e).with_file(options.scene)
    })?;
    let track = audio_io::read_track(Path::new(options.input)).map_err(|e| {
        CommandFailure::input(error_codes::AUDIO_READ, e).with_file(options.input)
    })?;

    let synthesis = |e: wavefocus_engine::EngineError| CommandFailure::synthesis(&e);
    let focused_delays = focus_delays(&speakers, focus, scene.speed_of_sound).map_err(synthesis)?;
    let control_delays = random_delays(speakers.len(), options.max_random_delay, options.seed)
        .map_err(synthesis)?;
    let focused_samples = delay_and_sum(&track, &focused_delays).map_err(synthesis)?;
    let random_samples = delay_and_sum(&track, &control_delays).map_err(synthesis)?;

    let out_dir = Path::new(options.out_dir);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))
        .map_err(|e| CommandFailure::input(error_codes::AUDIO_WRITE, e).with_file(options.out_dir))?;

    let sample_rate = track.sample_rate();
    let focused = write(out_dir, "focused.wav", &focused_samples, sample_rate, &focused_delays)?;
    let random = write(out_dir, "random.wav", &random_samples, sample_rate, &control_delays)?;
    info!(
        "delay-sum over {} speakers: {} and {}",
        speakers.len(),
        focused.output,
        random.output
    );

    Ok(DelaySumResult {
        sample_rate,
        num_speakers: speakers.len(),
        seed: options.seed,
        focused,
        random,
    })
}

fn write(
    out_dir: &Path,
    name: &str,
    samples: &[f64],
    sample_rate: u32,
    delays: &[f64],
) -> std::result::Result<DelaySumFile, CommandFailure> {
    let path = out_dir.join(name);
    let display = path.display().to_string();
    let written = audio_io::write_mono(&path, samples, sample_rate)
        .map_err(|e| CommandFailure::input(error_codes::AUDIO_WRITE, e).with_file(&display))?;
    Ok(DelaySumFile {
        output: display,
        num_samples: written.num_samples,
        max_delay: delays.iter().copied().fold(0.0, f64::max),
        pcm_hash: written.pcm_hash,
    })
}

fn print_human(result: &DelaySumResult) {
    println!(
        "{} {} speakers at {} Hz (seed {})",
        "Delay-and-sum:".cyan().bold(),
        result.num_speakers,
        result.sample_rate,
        result.seed
    );
    for (label, file) in [("Focused", &result.focused), ("Random", &result.random)] {
        println!(
            "  {} {} ({} samples, max delay {:.3} ms)",
            format!("{}:", label).dimmed(),
            file.output,
            file.num_samples,
            file.max_delay * 1000.0
        );
        println!("  {} {}", "PCM hash:".dimmed(), file.pcm_hash);
    }
}
