//! WaveFocus CLI - Command-line interface for speaker-array beamforming
//!
//! This binary renders scenes through the synthesis engine and inspects the
//! delays and window weights a scene implies.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;

use wavefocus_cli::commands;
use wavefocus_cli::commands::delay_sum::{DelaySumOptions, DEFAULT_MAX_RANDOM_DELAY};
use wavefocus_cli::commands::render::RenderOptions;

/// WaveFocus - Speaker-array beamforming synthesis
#[derive(Parser)]
#[command(name = "wavefocus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render what the listener hears and write it as a WAV file
    Render {
        /// Path to the scene file (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output WAV file path
        #[arg(short, long)]
        output: String,

        /// Peak-normalize to this many dB below full scale
        #[arg(long)]
        headroom_db: Option<f64>,

        /// Accumulate speakers one at a time (bit-reproducible)
        #[arg(long)]
        sequential: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print per-speaker delay and attenuation toward every focus
    Delays {
        /// Path to the scene file (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print window weights for an array size
    Window {
        /// Number of speakers
        #[arg(short = 'n', long)]
        speakers: usize,

        /// Use unit weights instead of the tapered window
        #[arg(long)]
        uniform: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Whole-sample delay-and-sum of one track, focused and randomized
    DelaySum {
        /// Input WAV file
        #[arg(short, long)]
        input: String,

        /// Scene file providing the array, speed of sound and focus
        #[arg(short, long)]
        scene: String,

        /// Directory for focused.wav and random.wav
        #[arg(long)]
        out_dir: String,

        /// Seed for the random control delays
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Upper bound of the random control delays in seconds
        #[arg(long, default_value_t = DEFAULT_MAX_RANDOM_DELAY)]
        max_random_delay: f64,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            scene,
            output,
            headroom_db,
            sequential,
            json,
        } => commands::render::run(
            &RenderOptions {
                scene: &scene,
                output: &output,
                headroom_db,
                sequential,
            },
            json,
        ),
        Commands::Delays { scene, json } => commands::delays::run(&scene, json),
        Commands::Window {
            speakers,
            uniform,
            json,
        } => commands::window::run(speakers, uniform, json),
        Commands::DelaySum {
            input,
            scene,
            out_dir,
            seed,
            max_random_delay,
            json,
        } => commands::delay_sum::run(
            &DelaySumOptions {
                input: &input,
                scene: &scene,
                out_dir: &out_dir,
                seed,
                max_random_delay,
            },
            json,
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}
