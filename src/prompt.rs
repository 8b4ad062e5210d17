use crate::error::StepError;
use crate::utils::Interrupt;
use inquire::InquireError;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// How often a blocked line read checks for Ctrl+C
const INTERRUPT_POLL: Duration = Duration::from_millis(100);

/// Operator input
pub trait Prompter {
    /// Ask for one line of free text (trimmed)
    fn ask(&self, message: &str) -> Result<String, StepError>;

    /// Yes/no consent; only an explicit "y" counts as yes
    fn confirm(&self, message: &str) -> Result<bool, StepError>;
}

/// Interactive prompts via inquire, with a line-buffered stdin fallback
/// when stdin is not a terminal.
pub struct TerminalPrompter {
    interactive: bool,
    interrupt: Interrupt,
}

impl TerminalPrompter {
    pub fn new(interrupt: Interrupt) -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
            interrupt,
        }
    }

    /// Read one line from piped stdin. The read happens on a helper thread
    /// because std retries `read` on EINTR, so only the waiting side can
    /// notice Ctrl+C.
    fn read_line(&self, message: &str) -> Result<String, StepError> {
        print!("{} ➜ ", message);
        io::stdout().flush()?;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut line = String::new();
            let read = io::stdin().lock().read_line(&mut line).map(|n| (n, line));
            let _ = tx.send(read);
        });

        wait_for_line(&rx, &self.interrupt)
    }
}

fn wait_for_line(
    rx: &Receiver<io::Result<(usize, String)>>,
    interrupt: &Interrupt,
) -> Result<String, StepError> {
    loop {
        if interrupt.is_set() {
            return Err(StepError::Interrupted);
        }

        match rx.recv_timeout(INTERRUPT_POLL) {
            // EOF: nobody left to answer
            Ok(Ok((0, _))) => return Err(StepError::Interrupted),
            Ok(Ok((_, line))) => return Ok(line.trim().to_string()),
            Ok(Err(e)) => return Err(StepError::Io(e)),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Err(StepError::Interrupted),
        }
    }
}

/// Only an explicit "y" counts as consent
fn parse_consent(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

fn map_inquire(err: InquireError) -> StepError {
    match err {
        InquireError::OperationInterrupted | InquireError::OperationCanceled => {
            StepError::Interrupted
        }
        InquireError::IO(e) => StepError::Io(e),
        other => StepError::Io(io::Error::new(io::ErrorKind::Other, other.to_string())),
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&self, message: &str) -> Result<String, StepError> {
        if !self.interactive {
            return self.read_line(message);
        }

        inquire::Text::new(message)
            .prompt()
            .map(|answer| answer.trim().to_string())
            .map_err(map_inquire)
    }

    fn confirm(&self, message: &str) -> Result<bool, StepError> {
        if !self.interactive {
            let answer = self.read_line(&format!("{} (y/n)", message))?;
            return Ok(parse_consent(&answer));
        }

        let parser = |answer: &str| -> Result<bool, ()> { Ok(parse_consent(answer)) };
        inquire::Confirm::new(message)
            .with_default(false)
            .with_parser(&parser)
            .prompt()
            .map_err(map_inquire)
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays scripted answers; `None` simulates Ctrl+C
    pub struct ScriptedPrompter {
        answers: RefCell<VecDeque<Option<String>>>,
        pub asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }

        pub fn answering(answers: &[&str]) -> Self {
            let wrapped: Vec<Option<&str>> = answers.iter().map(|a| Some(*a)).collect();
            Self::new(&wrapped)
        }

        fn next(&self, message: &str) -> Result<String, StepError> {
            self.asked.borrow_mut().push(message.to_string());
            match self.answers.borrow_mut().pop_front() {
                Some(Some(answer)) => Ok(answer),
                Some(None) | None => Err(StepError::Interrupted),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&self, message: &str) -> Result<String, StepError> {
            self.next(message).map(|a| a.trim().to_string())
        }

        fn confirm(&self, message: &str) -> Result<bool, StepError> {
            self.next(message).map(|a| parse_consent(&a))
        }
    }
}
