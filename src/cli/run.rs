//! Dispatches to the command handler for the parsed arguments.
//!
//! # Returns
//! - `Ok(ExitStatus)` describing how the command finished
//! - `Err` if the command fails (e.g., app root not found, invalid config file)
use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, migrate::migrate},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Migrate(cmd)) => migrate(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
