//! One-shot console command handler.

use serde::Serialize;

use netlab_core::ScenarioId;

use crate::cli::ExecArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct ExecReport {
    scenario: ScenarioId,
    command: String,
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<String>>,
}

pub fn handle(args: ExecArgs, settings: &Settings) -> Result<(), CliError> {
    let session = util::open_session(settings)?;
    util::apply_edits(&session, &args.edits)?;

    let command = args.command.join(" ");
    let transcript = session.run(&command);

    let report = ExecReport {
        scenario: session.scenario().id,
        command,
        output: transcript,
        history: args.history.then(|| session.history()),
    };

    let out = output::render_single(
        settings.output,
        &report,
        |r| match r.history {
            Some(ref lines) => lines.join("\n"),
            None => r.output.clone(),
        },
        |r| r.output.clone(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
