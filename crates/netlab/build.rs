use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

// cli.rs needs only clap and clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    // Re-run if the CLI definitions change.
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir: PathBuf = std::env::var_os("OUT_DIR")
        .ok_or("OUT_DIR not set by Cargo")?
        .into();
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    generate_manpages(&cli::Cli::command(), &man_dir)
}

/// Recursively generate man pages for a command and all its subcommands.
fn generate_manpages(cmd: &clap::Command, dir: &Path) -> Result<(), Box<dyn Error>> {
    let name = cmd.get_name().to_owned();
    let path = dir.join(format!("{name}.1"));

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buf)
        .map_err(|e| format!("failed to render man page for `{name}`: {e}"))?;
    fs::write(&path, buf).map_err(|e| format!("failed to write {}: {e}", path.display()))?;

    for sub in cmd.get_subcommands() {
        if sub.is_hide_set() {
            continue;
        }

        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        generate_manpages(&sub, dir)?;
    }
    Ok(())
}
