//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Select};

use netlab_core::{Catalog, ScenarioId};

use crate::cli::{ConfigArgs, ConfigCommand};
use crate::config::{self, Config, Defaults, Settings};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display as TOML-like text.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    match cfg.default_scenario {
        Some(id) => {
            let _ = writeln!(out, "default_scenario = {id}");
        }
        None => {
            let _ = writeln!(out, "# default_scenario = (first in catalog)");
        }
    }
    match cfg.catalog {
        Some(ref path) => {
            let _ = writeln!(out, "catalog = \"{}\"", path.display());
        }
        None => {
            let _ = writeln!(out, "# catalog = (built-in)");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "prompt = '{}'", cfg.defaults.prompt);

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Index of `value` in `choices`, or 0.
fn position(choices: &[&str], value: &str) -> usize {
    choices.iter().position(|c| *c == value).unwrap_or_default()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, settings: &Settings) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            if config_path.exists()
                && !util::confirm(
                    &format!("Overwrite {}?", config_path.display()),
                    settings.yes,
                )?
            {
                eprintln!("Aborted.");
                return Ok(());
            }

            let current = config::load_or_default();
            // --yes writes the current values out without prompting.
            let cfg = if settings.yes {
                current
            } else {
                eprintln!("netlab configuration wizard");
                eprintln!("   Config path: {}\n", config_path.display());
                prompt_config(&current, settings)?
            };

            let path = config::save_config(&cfg)?;
            eprintln!("✓ Configuration saved to {}", path.display());
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_or_default();
            let out = output::render_single(settings.output, &cfg, format_config, |c| {
                c.default_scenario
                    .map_or_else(String::new, |id| id.to_string())
            })?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

fn prompt_config(current: &Config, settings: &Settings) -> Result<Config, CliError> {
    // 1. Catalog
    let catalog_text: String = Input::new()
        .with_prompt("Scenario catalog file (empty for built-in)")
        .default(
            current
                .catalog
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let catalog_path = (!catalog_text.trim().is_empty()).then(|| PathBuf::from(catalog_text.trim()));

    // 2. Default scenario, picked from whichever catalog was chosen
    let catalog = match catalog_path {
        Some(ref path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let labels: Vec<String> = catalog
        .iter()
        .map(|s| format!("{:>3}  {}", s.id, s.title))
        .collect();
    let ids = catalog.ids();
    let preselect = current
        .default_scenario
        .and_then(|id| ids.iter().position(|i| i.get() == id))
        .unwrap_or_default();
    let picked = Select::new()
        .with_prompt("Default scenario")
        .items(&labels)
        .default(preselect)
        .interact()
        .map_err(prompt_err)?;

    // 3. Output format
    let outputs = netlab_config::OUTPUT_FORMATS;
    let output = Select::new()
        .with_prompt("Default output format")
        .items(&outputs)
        .default(position(&outputs, &current.defaults.output))
        .interact()
        .map_err(prompt_err)?;

    // 4. Color
    let colors = netlab_config::COLOR_MODES;
    let color = Select::new()
        .with_prompt("Color output")
        .items(&colors)
        .default(position(&colors, &current.defaults.color))
        .interact()
        .map_err(prompt_err)?;

    // 5. Prompt
    let prompt: String = Input::new()
        .with_prompt("Shell prompt")
        .default(settings.prompt.clone())
        .interact_text()
        .map_err(prompt_err)?;

    Ok(Config {
        default_scenario: ids.get(picked).copied().map(ScenarioId::get),
        catalog: catalog_path,
        defaults: Defaults {
            output: outputs.get(output).copied().unwrap_or("table").into(),
            color: colors.get(color).copied().unwrap_or("auto").into(),
            prompt,
        },
    })
}
