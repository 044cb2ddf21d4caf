//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use std::cell::{Cell, RefCell};
use std::io::Write as _;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// On a TTY, `step()` starts a spinner that the next `success()` completes.
/// Otherwise `step()` prints its message without a newline and `success()`
/// finishes the line, giving `Creating container...done`.
/// Everything except warnings is suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: RefCell<Option<ProgressBar>>,
    open_line: Cell<bool>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spinner: RefCell::new(None),
            open_line: Cell::new(false),
        }
    }

    /// Close whatever step is still in progress as failed.
    pub fn abort(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            progress::finish_error(&pb);
        }
        if self.open_line.replace(false) {
            println!();
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        self.abort();
        if self.ctx.show_progress() {
            *self.spinner.borrow_mut() = Some(progress::spinner(message));
        } else {
            print!("{message}");
            let _ = std::io::stdout().flush();
            self.open_line.set(true);
        }
    }

    fn success(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        if let Some(pb) = self.spinner.borrow_mut().take() {
            progress::finish_ok(&pb, message);
        } else if self.open_line.replace(false) {
            println!("{message}");
        } else {
            println!("{} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        self.abort();
        self.ctx.warn(message);
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.abort();
    }
}
