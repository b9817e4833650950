//! Clap derive structures for the `netlab` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netlab -- network troubleshooting labs in the terminal
#[derive(Debug, Parser)]
#[command(
    name = "netlab",
    version,
    about = "Practice diagnosing broken home networks from the command line",
    long_about = "Simulated classroom network with a PC adapter and a home router.\n\n\
        Each scenario breaks something (DHCP, DNS, gateway, addressing, uplink).\n\
        Probe it with ipconfig, ping and nslookup, then fix the configuration.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Scenario id to open (defaults to the config value, then the first)
    #[arg(long, short = 's', env = "NETLAB_SCENARIO", global = true)]
    pub scenario: Option<u32>,

    /// Scenario catalog file (.toml or .json) replacing the built-in set
    #[arg(long, env = "NETLAB_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Output format (defaults to the config value, then table)
    #[arg(long, short = 'o', env = "NETLAB_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table or console transcript (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the scenario catalog
    #[command(alias = "sc")]
    Scenarios(ScenariosArgs),

    /// Run one console command against a scenario
    #[command(alias = "x")]
    Exec(ExecArgs),

    /// Show the effective network settings after optional edits
    #[command(alias = "eff")]
    Effective(EditArgs),

    /// Interactive console: type commands, edit adapter and router
    #[command(alias = "sh")]
    Shell(ShellArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Scenarios ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ScenariosArgs {
    #[command(subcommand)]
    pub command: ScenariosCommand,
}

#[derive(Debug, Subcommand)]
pub enum ScenariosCommand {
    /// List every scenario in the catalog
    #[command(alias = "ls")]
    List,

    /// Show one scenario's briefing
    Show {
        /// Scenario id
        id: u32,
    },
}

// ── Exec / Effective ─────────────────────────────────────────────────

/// Adapter and router edits applied before the command runs.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Adapter edit, KEY=VALUE (ip-mode, dns-mode, ip, mask, gateway, dns)
    #[arg(long = "adapter", short = 'a', value_name = "KEY=VALUE")]
    pub adapter: Vec<String>,

    /// Router edit, KEY=VALUE (dhcp, gateway, mask, start, end, dns, wan, wan-ip, wan-gateway)
    #[arg(long = "router", short = 'r', value_name = "KEY=VALUE")]
    pub router: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ExecArgs {
    #[command(flatten)]
    pub edits: EditArgs,

    /// Print the whole session history instead of the command output
    #[arg(long)]
    pub history: bool,

    /// Console command line, e.g. `ping baidu.com`
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

// ── Shell ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Prompt text (defaults to the config value)
    #[arg(long)]
    pub prompt: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
