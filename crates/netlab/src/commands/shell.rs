//! Interactive console.
//!
//! Plain lines go to the simulated command interpreter. Lines starting
//! with `:` manage the session: edit the adapter or router, switch
//! scenarios, inspect state. Edit mistakes are reported inline and never
//! end the loop.

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::debug;

use netlab_core::{DesktopTool, ScenarioId, Session};

use crate::cli::ShellArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::{edit, effective, scenarios, util};

const HELP: &str = "\
Console commands:
  ipconfig                 show the adapter's effective settings
  ping <target>            probe an address or host name
  nslookup <domain>        query the configured DNS server

Session commands:
  :adapter KEY=VALUE...    edit the adapter (ip-mode, dns-mode, ip, mask, gateway, dns)
  :router KEY=VALUE...     edit the router (dhcp, gateway, mask, start, end, dns, wan, wan-ip, wan-gateway)
  :scenario <id>           switch scenario and reset everything
  :brief                   show the current scenario's briefing
  :state                   show effective settings and their source
  :history                 show the session log
  :help                    show this help
  :quit, exit              leave the console";

/// One parsed shell line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Adapter(Vec<&'a str>),
    Router(Vec<&'a str>),
    Scenario(&'a str),
    Brief,
    State,
    History,
    Help,
    Quit,
    UnknownDirective(&'a str),
    Console(&'a str),
}

impl<'a> Line<'a> {
    fn parse(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Self::Blank;
        }
        if line.eq_ignore_ascii_case("exit") {
            return Self::Quit;
        }
        let Some(directive) = line.strip_prefix(':') else {
            return Self::Console(line);
        };

        let mut words = directive.split_whitespace();
        let name = words.next().unwrap_or_default();
        match name {
            "adapter" | "a" => Self::Adapter(words.collect()),
            "router" | "r" => Self::Router(words.collect()),
            "scenario" | "s" => Self::Scenario(words.next().unwrap_or_default()),
            "brief" | "b" => Self::Brief,
            "state" => Self::State,
            "history" => Self::History,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => Self::UnknownDirective(name),
        }
    }
}

/// Rendering options for the loop.
struct Console {
    prompt: String,
    show_prompt: bool,
    color: bool,
}

impl Console {
    /// Drive `session` from `input` until EOF or a quit line.
    fn run<R: BufRead, W: Write>(&self, session: &Session, input: R, out: &mut W) -> Result<(), CliError> {
        self.write_prompt(out)?;
        for raw in input.lines() {
            let raw = raw?;
            if !self.dispatch(session, &raw, out)? {
                break;
            }
            self.write_prompt(out)?;
        }
        Ok(())
    }

    /// Handle one line. Returns `false` when the loop should stop.
    fn dispatch<W: Write>(&self, session: &Session, raw: &str, out: &mut W) -> Result<bool, CliError> {
        let line = Line::parse(raw);
        debug!(?line, "shell input");

        match line {
            Line::Blank => {}
            Line::Quit => return Ok(false),
            Line::Console(text) => {
                let transcript = session.run(text);
                if !transcript.is_empty() {
                    writeln!(out, "{transcript}")?;
                }
            }
            Line::Adapter(pairs) => {
                let edited = util::require_tool(session, DesktopTool::Network)
                    .and_then(|()| edit::adapter(&session.snapshot().adapter, &pairs));
                match edited {
                    Ok(next) => {
                        let seen = session.history().len();
                        session.apply_adapter(next);
                        self.write_since(session, seen, out)?;
                    }
                    Err(err) => self.write_error(&err, out)?,
                }
            }
            Line::Router(pairs) => {
                let edited = util::require_tool(session, DesktopTool::Router)
                    .and_then(|()| edit::router(&session.snapshot().router, &pairs));
                match edited {
                    Ok(next) => {
                        let seen = session.history().len();
                        session.apply_router(next);
                        self.write_since(session, seen, out)?;
                    }
                    Err(err) => self.write_error(&err, out)?,
                }
            }
            Line::Scenario(id) => match id.parse::<ScenarioId>() {
                Ok(id) => match session.select_scenario(id) {
                    Ok(()) => self.write_banner(session, out)?,
                    Err(err) => {
                        let err = util::not_found_with_ids(err, session.catalog());
                        self.write_error(&err, out)?;
                    }
                },
                Err(_) => self.write_error(
                    &CliError::Validation {
                        field: "scenario".into(),
                        reason: format!("expected a numeric id, got '{id}'"),
                    },
                    out,
                )?,
            },
            Line::Brief => {
                writeln!(out, "{}", scenarios::detail(&session.scenario(), self.color))?;
            }
            Line::State => {
                let report = effective::EffectiveReport::from(session.snapshot().as_ref());
                writeln!(out, "{}", effective::detail(&report))?;
            }
            Line::History => {
                for entry in session.history() {
                    writeln!(out, "{entry}")?;
                }
            }
            Line::Help => writeln!(out, "{HELP}")?,
            Line::UnknownDirective(name) => {
                let msg = format!("unknown session command ':{name}', try :help");
                writeln!(out, "{}", output::failure(&msg, self.color))?;
            }
        }
        Ok(true)
    }

    /// Print the history lines appended after the first `seen` entries.
    fn write_since<W: Write>(&self, session: &Session, seen: usize, out: &mut W) -> io::Result<()> {
        for entry in session.history().iter().skip(seen) {
            writeln!(out, "{}", output::muted(entry, self.color))?;
        }
        Ok(())
    }

    fn write_banner<W: Write>(&self, session: &Session, out: &mut W) -> io::Result<()> {
        let scenario = session.scenario();
        writeln!(
            out,
            "{}",
            output::heading(&format!("[{}] {}", scenario.id, scenario.title), self.color)
        )?;
        if !scenario.briefing.summary.is_empty() {
            writeln!(out, "{}", scenario.briefing.summary)?;
        }
        writeln!(out, "{}", output::muted("Type :help for commands.", self.color))
    }

    fn write_error<W: Write>(&self, err: &CliError, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", output::failure(&format!("error: {err}"), self.color))
    }

    fn write_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.show_prompt {
            write!(out, "{} ", self.prompt)?;
            out.flush()?;
        }
        Ok(())
    }
}

pub fn handle(args: ShellArgs, settings: &Settings) -> Result<(), CliError> {
    let session = util::open_session(settings)?;
    let stdin = io::stdin();
    let console = Console {
        prompt: args.prompt.unwrap_or_else(|| settings.prompt.clone()),
        show_prompt: stdin.is_terminal(),
        color: output::should_color(settings.color),
    };

    let mut stdout = io::stdout().lock();
    if !settings.quiet {
        console.write_banner(&session, &mut stdout)?;
    }
    console.run(&session, stdin.lock(), &mut stdout)
}
