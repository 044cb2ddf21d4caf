//! Application context: unified state passed to every command handler.
//!
//! Constructed once per invocation in `Cli::run()`; nothing in it outlives
//! the process or is shared between launches.

use crate::infra::config::YamlConfigStore;
use crate::infra::connector::LxdConnector;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where the client configuration comes from.
    pub config_store: YamlConfigStore,
    /// Builds clients for resolved remotes.
    pub connector: LxdConnector,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// JSON mode implies quiet progress so stdout carries only the JSON object.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store: YamlConfigStore,
            connector: LxdConnector,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }
}
