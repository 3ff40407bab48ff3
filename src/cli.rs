use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::tasks::StepId;

/// Top-level CLI entry point for the macOS setup engine.
#[derive(Parser, Debug)]
#[command(
    name = "macsetup",
    about = "Declarative macOS workstation setup",
    version
)]
pub struct Cli {
    /// Run a single step or utility instead of the orchestrated setup
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub mode: ModeOpts,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Subset selection for the orchestrated run. At most one may be given.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct ModeOpts {
    /// Only install Homebrew and packages
    #[arg(long)]
    pub brew_only: bool,

    /// Only apply Finder, system, git and Dock settings
    #[arg(long)]
    pub config_only: bool,

    /// Only copy dotfiles
    #[arg(long)]
    pub dotfiles_only: bool,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the project root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,

    /// Configuration file, relative to the project root
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// What to do when a step fails [default: prompt on a terminal, otherwise stop]
    #[arg(long, value_enum, global = true)]
    pub on_error: Option<OnError>,
}

/// Failure policy for the orchestrated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Ask whether to continue
    Prompt,
    /// Keep going with the next step
    Continue,
    /// Abort the run
    Stop,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one setup step
    Step(StepOpts),
    /// Install personal (non-work) casks
    PersonalApps(PersonalAppsOpts),
    /// Print version information
    Version,
}

/// Options for the `step` subcommand.
#[derive(Args, Debug, Clone)]
pub struct StepOpts {
    /// Step to run
    #[arg(value_enum)]
    pub name: StepId,
}

/// Options for the `personal-apps` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PersonalAppsOpts {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
