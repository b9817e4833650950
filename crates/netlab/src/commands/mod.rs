//! Command dispatch: bridges CLI args -> core session -> output formatting.

pub mod config_cmd;
pub mod edit;
pub mod effective;
pub mod exec;
pub mod scenarios;
pub mod shell;
pub mod util;

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, Command, CompletionsArgs};
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub fn dispatch(cmd: Command, settings: &Settings) -> Result<(), CliError> {
    match cmd {
        Command::Scenarios(args) => scenarios::handle(args, settings),
        Command::Exec(args) => exec::handle(args, settings),
        Command::Effective(args) => effective::handle(&args, settings),
        Command::Shell(args) => shell::handle(args, settings),
        Command::Config(args) => config_cmd::handle(args, settings),
        Command::Completions(args) => {
            completions(&args);
            Ok(())
        }
    }
}

fn completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "netlab", &mut std::io::stdout());
}
