//! `lxc launch`: create a container from an image and start it.

use anyhow::{Context, Result};
use clap::{ArgAction, Args};
use owo_colors::OwoColorize as _;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::launch::{self as service, LaunchOutcome};
use crate::domain::{LaunchOptions, LaunchRequest, ProfileSelection};
use crate::output::{TerminalReporter, json};

/// Long help for `lxc launch`.
pub const LONG_ABOUT: &str = "\
Launches a container using the specified image and name.

Both <image> and <name> may be prefixed with a remote, as in images:ubuntu or lab:u1.
Without <name> the server picks one.

Not specifying -p will result in the default profile.
Specifying \"-p\" with no argument will result in no profile.

Example:
  lxc launch ubuntu u1";

/// Arguments for the launch command.
#[derive(Args, Debug, Default)]
pub struct LaunchArgs {
    /// <image> [<name>], each optionally prefixed with `remote:`
    #[arg(value_name = "IMAGE [NAME]")]
    pub args: Vec<String>,

    /// Profile to apply to the new container
    #[arg(
        short,
        long = "profile",
        value_name = "PROFILE",
        num_args = 0..=1,
        default_missing_value = "",
        action = ArgAction::Append
    )]
    pub profiles: Vec<String>,

    /// Ephemeral container
    #[arg(short, long)]
    pub ephemeral: bool,
}

impl LaunchArgs {
    /// Tri-state profile selection: a bare `-p` arrives as an empty value.
    #[must_use]
    pub fn profile_selection(&self) -> ProfileSelection {
        let requested_empty = self.profiles.iter().any(String::is_empty);
        let tokens = self
            .profiles
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        ProfileSelection::from_flags(tokens, requested_empty)
    }

    /// Build the launch options, checking the positional arguments.
    ///
    /// # Errors
    ///
    /// Returns an error unless one or two positional arguments were given.
    pub fn into_options(self) -> Result<LaunchOptions> {
        let profiles = self.profile_selection();
        let request = LaunchRequest::from_args(&self.args, profiles)?;
        Ok(LaunchOptions {
            request,
            ephemeral: self.ephemeral,
        })
    }
}

/// Run `lxc launch`.
///
/// # Errors
///
/// Returns an error if the arguments are invalid, the configuration cannot
/// be loaded, or any phase of the launch fails.
pub async fn run(args: LaunchArgs, app: &AppContext) -> Result<()> {
    let opts = args.into_options()?;
    let config = config_service::load_config(&app.config_store).context("loading configuration")?;

    let reporter = TerminalReporter::new(&app.output);
    let result = service::launch(&app.connector, &config, &reporter, opts).await;
    drop(reporter);

    print_launched(&result?, app)
}

fn print_launched(outcome: &LaunchOutcome, app: &AppContext) -> Result<()> {
    if app.is_json() {
        println!("{}", json::format_launched(&outcome.name, &outcome.remote)?);
    } else {
        let name = &app.output.styles.name;
        app.output.success(&format!(
            "Container {} started on {}.",
            outcome.name.style(*name),
            outcome.remote.style(*name)
        ));
    }
    Ok(())
}
