//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;
use crate::domain::{LaunchError, LaunchFailure};

/// Command line client for LXD container hosts
#[derive(Parser)]
#[command(
    name = "lxc",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log requests and launch phases to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create and start a container from an image
    #[command(long_about = commands::launch::LONG_ABOUT)]
    Launch(commands::launch::LaunchArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
            ..
        } = self;
        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            json,
        });
        match command {
            Command::Version => {
                commands::version::run(&app);
                Ok(())
            }
            Command::Launch(args) => commands::launch::run(args, &app).await,
        }
    }
}

/// Stable code for `--json` error output.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(failure) = err.downcast_ref::<LaunchFailure>() {
        return failure.error.code();
    }
    if let Some(launch) = err.downcast_ref::<LaunchError>() {
        return launch.code();
    }
    "error"
}
