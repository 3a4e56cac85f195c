use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, build::build, init::init},
};

/// Dispatch to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with the command summary and error count
/// - `Err` if the command fails (e.g., invalid config, unreadable document)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Build(cmd)) => build(cmd),
        Some(Command::Init) => init(),
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
