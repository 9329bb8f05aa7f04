//! CLI command implementations.

pub mod delay_sum;
pub mod delays;
pub mod json_output;
pub mod render;
pub mod window;

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use wavefocus_engine::EngineError;

use json_output::{CommandOutput, JsonError};

/// Exit code for unreadable or invalid input.
pub const EXIT_INPUT_ERROR: u8 = 1;
/// Exit code for a run the engine refused.
pub const EXIT_SYNTHESIS_ERROR: u8 = 2;

/// Why a command stopped.
#[derive(Debug)]
pub struct CommandFailure {
    pub error: JsonError,
    pub exit_code: u8,
}

impl CommandFailure {
    /// Input that could not be read, parsed or resolved.
    pub fn input(code: &str, err: anyhow::Error) -> Self {
        Self {
            error: JsonError::new(code, format!("{:#}", err)),
            exit_code: EXIT_INPUT_ERROR,
        }
    }

    /// An engine error raised during a run.
    pub fn synthesis(err: &EngineError) -> Self {
        Self {
            error: JsonError::new(err.code(), err.to_string()),
            exit_code: EXIT_SYNTHESIS_ERROR,
        }
    }

    /// Attaches the file the failure is about.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.error = self.error.with_file(file);
        self
    }
}

/// Prints a command result and maps it to an exit code.
///
/// With `json` the result is wrapped in a [`CommandOutput`]; otherwise
/// `human` prints it and failures go to stderr.
pub(crate) fn report<T: Serialize>(
    json: bool,
    result: std::result::Result<T, CommandFailure>,
    human: impl FnOnce(&T),
) -> Result<ExitCode> {
    match result {
        Ok(value) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&CommandOutput::success(value))?
                );
            } else {
                human(&value);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            if json {
                let output = CommandOutput::<T>::failure(vec![failure.error]);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                eprintln!(
                    "{} {} {}",
                    "error:".red().bold(),
                    failure.error.message,
                    format!("[{}]", failure.error.code).dimmed()
                );
            }
            Ok(ExitCode::from(failure.exit_code))
        }
    }
}
