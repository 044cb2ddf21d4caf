//! lxc - command line client for LXD container hosts

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lxc_cli::cli::{Cli, error_code};
use lxc_cli::output::json;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json_mode = cli.json;
    if let Err(e) = cli.run().await {
        if json_mode {
            match json::format_error(&format!("{e:#}"), error_code(&e)) {
                Ok(obj) => println!("{obj}"),
                Err(_) => eprintln!("Error: {e:#}"),
            }
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `LXC_LOG` (default `warn`, `debug` with `--verbose`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("LXC_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
