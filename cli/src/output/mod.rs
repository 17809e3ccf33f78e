//! Output formatting module

pub mod human;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::fmt;
use std::io::Write;

use console::Term;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Write one line to `out`, dropping any write error.
///
/// A reader that goes away (`podlaunch launch | head`) must not abort a
/// session that still owns a billed pod, so nothing here may panic.
pub fn write_line(out: &mut impl Write, args: fmt::Arguments<'_>) {
    let _ = writeln!(out, "{args}");
}

/// Print a line to stdout, ignoring a closed or failing stream.
macro_rules! outln {
    () => {
        $crate::output::write_line(&mut ::std::io::stdout().lock(), ::std::format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::output::write_line(
            &mut ::std::io::stdout().lock(),
            ::std::format_args!($($arg)*),
        )
    };
}

/// Print a line to stderr, ignoring a closed or failing stream.
macro_rules! errln {
    ($($arg:tt)*) => {
        $crate::output::write_line(
            &mut ::std::io::stderr().lock(),
            ::std::format_args!($($arg)*),
        )
    };
}

pub(crate) use {errln, outln};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print an in-progress step prefixed with `→`. Suppressed when `quiet`.
    pub fn step(&self, msg: &str) {
        if !self.quiet {
            outln!("  {} {msg}", "→".style(self.styles.info));
        }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            outln!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            outln!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        errln!("  {} {msg}", "✗".style(self.styles.error));
    }
}
