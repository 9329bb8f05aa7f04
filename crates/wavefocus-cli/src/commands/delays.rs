//! Delays command implementation
//!
//! Prints the propagation delay and attenuation from every speaker to every
//! beam's focus. No audio is read.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use wavefocus_engine::propagation::validate_speed_of_sound;
use wavefocus_engine::propagate;

use crate::scene::SceneFile;

use super::json_output::{error_codes, BeamDelays, DelaysResult, SpeakerDelay};
use super::{report, CommandFailure};

/// Run the delays command
///
/// # Returns
/// Exit code: 0 on success, 1 on input error, 2 on degenerate geometry
pub fn run(scene: &str, json_output: bool) -> Result<ExitCode> {
    report(json_output, compute(scene), print_human)
}

fn compute(scene_path: &str) -> std::result::Result<DelaysResult, CommandFailure> {
    let file = SceneFile::load(Path::new(scene_path)).map_err(|e| {
        CommandFailure::input(error_codes::SCENE_LOAD, e).with_file(scene_path)
    })?;
    let scene = &file.scene;
    let speakers = scene.speakers().map_err(|e| {
        CommandFailure::input(error_codes::SCENE_INVALID, e).with_file(scene_path)
    })?;
    validate_speed_of_sound(scene.speed_of_sound)
        .map_err(|e| CommandFailure::synthesis(&e).with_file(scene_path))?;

    let mut beams = Vec::with_capacity(scene.beams.len());
    for (beam, spec) in scene.beams.iter().enumerate() {
        let mut delays = Vec::with_capacity(speakers.len());
        for (speaker, &position) in speakers.iter().enumerate() {
            let p = propagate(position, spec.focus, scene.speed_of_sound)
                .map_err(|e| CommandFailure::synthesis(&e).with_file(scene_path))?;
            delays.push(SpeakerDelay {
                speaker,
                position,
                delay: p.delay,
                attenuation: p.attenuation,
            });
        }

        let min_delay = delays.iter().map(|d| d.delay).fold(f64::INFINITY, f64::min);
        let max_delay = delays.iter().map(|d| d.delay).fold(0.0, f64::max);
        beams.push(BeamDelays {
            beam,
            focus: spec.focus,
            min_delay,
            max_delay,
            speakers: delays,
        });
    }

    Ok(DelaysResult {
        speed_of_sound: scene.speed_of_sound,
        num_speakers: speakers.len(),
        beams,
    })
}

fn print_human(result: &DelaysResult) {
    println!(
        "{} {} speakers, c = {} m/s",
        "Array:".cyan().bold(),
        result.num_speakers,
        result.speed_of_sound
    );
    for beam in &result.beams {
        println!(
            "\n{} {} toward {} (delay {:.3}..{:.3} ms)",
            "Beam".cyan().bold(),
            beam.beam,
            beam.focus,
            beam.min_delay * 1000.0,
            beam.max_delay * 1000.0
        );
        println!(
            "  {:>6}  {:<28} {:>10}  {:>12}",
            "#".dimmed(),
            "position".dimmed(),
            "delay ms".dimmed(),
            "attenuation".dimmed()
        );
        for s in &beam.speakers {
            println!(
                "  {:>6}  {:<28} {:>10.4}  {:>12.6}",
                s.speaker,
                s.position.to_string(),
                s.delay * 1000.0,
                s.attenuation
            );
        }
    }
}
