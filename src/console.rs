//! Console output sink.
//!
//! Every queried flag and every lifecycle callback produces exactly one line
//! on the console, either `"<Label>: <value>"` or `"Called: <EventName>"`.
//! Diagnostics go through the `log` facade instead and never reach this sink.

use std::fmt::Display;
use std::sync::Arc;

use parking_lot::Mutex;

/// Destination for console lines.
pub trait Console: Send + Sync {
    /// Write one line.
    fn print_line(&self, line: &str);
}

/// Writes lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn print_line(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps every line in memory.
///
/// Clones share the same buffer, so one handle can be given to the bootstrap
/// while another is kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct CapturedConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of lines equal to `line`.
    pub fn count(&self, line: &str) -> usize {
        self.lines.lock().iter().filter(|l| l.as_str() == line).count()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Console for CapturedConsole {
    fn print_line(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }
}

/// Formats a labelled value line.
pub fn labelled(label: &str, value: impl Display) -> String {
    format!("{label}: {value}")
}

/// Formats a callback line.
pub fn called(name: &str) -> String {
    labelled("Called", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_formats() {
        assert_eq!(labelled("graphicsEnvIsHeadless", false), "graphicsEnvIsHeadless: false");
        assert_eq!(called("windowOpened"), "Called: windowOpened");
    }

    #[test]
    fn test_captured_console_shares_buffer() {
        let console = CapturedConsole::new();
        let handle = console.clone();
        handle.print_line("a");
        handle.print_line("a");
        console.print_line("b");

        assert_eq!(console.lines(), vec!["a", "a", "b"]);
        assert_eq!(console.count("a"), 2);

        console.clear();
        assert!(handle.lines().is_empty());
    }
}
