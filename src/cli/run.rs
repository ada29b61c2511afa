/// Dispatch to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with error/warning counts
/// - `Err` if the command cannot run at all (invalid config, unresolvable round)
use super::{
    args::{Arguments, Command},
    commands::{CommandResult, generate::generate, init::init},
};
use anyhow::Result;

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
