//! Window command implementation
//!
//! Prints the per-speaker weights for an array size and their sum, which is
//! the divisor a render normalizes by.

use std::process::ExitCode;

use anyhow::{anyhow, Result};
use colored::Colorize;
use wavefocus_engine::Windowing;

use super::json_output::{error_codes, WindowResult};
use super::{report, CommandFailure};

/// Run the window command
///
/// # Returns
/// Exit code: 0 on success, 1 for an empty array
pub fn run(num_speakers: usize, uniform: bool, json_output: bool) -> Result<ExitCode> {
    report(json_output, compute(num_speakers, uniform), print_human)
}

fn compute(num_speakers: usize, uniform: bool) -> std::result::Result<WindowResult, CommandFailure> {
    if num_speakers == 0 {
        return Err(CommandFailure::input(
            error_codes::INVALID_ARGUMENT,
            anyhow!("--speakers must be at least 1"),
        ));
    }
    let (windowing, name) = if uniform {
        (Windowing::Uniform, "uniform")
    } else {
        (Windowing::Tapered, "tapered")
    };
    let weights = windowing.weights(num_speakers);

    Ok(WindowResult {
        num_speakers,
        windowing: name.to_string(),
        sum: weights.sum(),
        weights: weights.as_slice().to_vec(),
    })
}

fn print_human(result: &WindowResult) {
    println!(
        "{} {} window over {} speakers",
        "Window:".cyan().bold(),
        result.windowing,
        result.num_speakers
    );
    for (speaker, weight) in result.weights.iter().enumerate() {
        println!("  {:>6}  {:.6}", speaker.to_string().dimmed(), weight);
    }
    println!("{} {}", "Sum:".green().bold(), result.sum);
}
