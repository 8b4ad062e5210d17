//! Operator-facing output.
//!
//! Every component receives a `&Console` instead of printing directly, so a
//! run can be captured as plain lines (tests) or rendered with colors.

use colored::Colorize;
#[cfg(test)]
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Step,
    Success,
    Notice,
    Failure,
    Detail,
}

enum Sink {
    Terminal,
    #[cfg(test)]
    Captured(RefCell<Vec<(Tone, String)>>),
}

pub struct Console {
    sink: Sink,
}

impl Console {
    pub fn terminal() -> Self {
        Self {
            sink: Sink::Terminal,
        }
    }

    #[cfg(test)]
    pub fn captured() -> Self {
        Self {
            sink: Sink::Captured(RefCell::new(Vec::new())),
        }
    }

    /// True when output goes to a real terminal (progress bars allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self.sink, Sink::Terminal)
    }

    pub fn emit(&self, tone: Tone, text: &str) {
        match &self.sink {
            Sink::Terminal => {
                let rendered = match tone {
                    Tone::Plain => text.normal(),
                    Tone::Step => text.bright_blue().bold(),
                    Tone::Success => text.green(),
                    Tone::Notice => text.yellow(),
                    Tone::Failure => text.red(),
                    Tone::Detail => text.dimmed(),
                };
                if tone == Tone::Failure {
                    eprintln!("{}", rendered);
                } else {
                    println!("{}", rendered);
                }
            }
            #[cfg(test)]
            Sink::Captured(lines) => lines.borrow_mut().push((tone, text.to_string())),
        }
    }

    pub fn plain(&self, text: &str) {
        self.emit(Tone::Plain, text);
    }

    pub fn step(&self, text: &str) {
        self.emit(Tone::Step, text);
    }

    pub fn success(&self, text: &str) {
        self.emit(Tone::Success, text);
    }

    pub fn notice(&self, text: &str) {
        self.emit(Tone::Notice, text);
    }

    pub fn failure(&self, text: &str) {
        self.emit(Tone::Failure, text);
    }

    pub fn detail(&self, text: &str) {
        self.emit(Tone::Detail, text);
    }

    /// Captured lines (empty for terminal output)
    #[cfg(test)]
    pub fn lines(&self) -> Vec<String> {
        match &self.sink {
            Sink::Terminal => Vec::new(),
            Sink::Captured(lines) => lines.borrow().iter().map(|(_, l)| l.clone()).collect(),
        }
    }

    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    #[cfg(test)]
    pub fn lines_with(&self, tone: Tone) -> Vec<String> {
        match &self.sink {
            Sink::Terminal => Vec::new(),
            Sink::Captured(lines) => lines
                .borrow()
                .iter()
                .filter(|(t, _)| *t == tone)
                .map(|(_, l)| l.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_console_records_lines_in_order() {
        let console = Console::captured();
        console.step("one");
        console.failure("two");
        console.plain("three");

        assert_eq!(console.lines(), vec!["one", "two", "three"]);
        assert_eq!(console.lines_with(Tone::Failure), vec!["two"]);
        assert!(!console.is_terminal());
    }

    #[test]
    fn test_terminal_console_has_no_capture() {
        let console = Console::terminal();
        assert!(console.is_terminal());
        assert!(console.lines().is_empty());
    }
}
