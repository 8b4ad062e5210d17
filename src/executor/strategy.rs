use crate::console::Console;
use crate::error::StepError;
use crate::prompt::Prompter;

/// How the operator wants the runtime installed; chosen once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DirectDownload,
    PackageManager,
    Manual,
}

impl Strategy {
    /// Exactly "1", "2" or "3"; anything else is not a choice
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Strategy::DirectDownload),
            "2" => Some(Strategy::PackageManager),
            "3" => Some(Strategy::Manual),
            _ => None,
        }
    }
}

pub fn print_menu(console: &Console) {
    console.plain("\nChoose how to install Node.js:");
    console.plain("1. Download from the official site (recommended)");
    console.plain("2. Install with Homebrew");
    console.plain("3. Install it manually");
}

/// Prompt until the operator enters a recognised choice
pub fn choose_strategy(prompter: &dyn Prompter, console: &Console) -> Result<Strategy, StepError> {
    loop {
        let answer = prompter.ask("Choice (1/2/3)")?;

        if let Some(strategy) = Strategy::from_input(&answer) {
            log::debug!("Selected strategy: {:?}", strategy);
            return Ok(strategy);
        }

        console.notice(&format!("'{}' is not an option. Enter 1, 2 or 3.", answer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::fake::ScriptedPrompter;

    #[test]
    fn test_from_input() {
        assert_eq!(Strategy::from_input("1"), Some(Strategy::DirectDownload));
        assert_eq!(Strategy::from_input(" 2\n"), Some(Strategy::PackageManager));
        assert_eq!(Strategy::from_input("3"), Some(Strategy::Manual));

        for other in ["", "0", "4", "12", "y", "one"] {
            assert_eq!(Strategy::from_input(other), None, "accepted {:?}", other);
        }
    }

    #[test]
    fn test_unrecognised_input_reprompts() {
        let prompter = ScriptedPrompter::answering(&["", "9", "2"]);
        let console = Console::captured();

        let strategy = choose_strategy(&prompter, &console).unwrap();

        assert_eq!(strategy, Strategy::PackageManager);
        assert_eq!(prompter.asked.borrow().len(), 3);
        assert!(console.contains("'9' is not an option"));
    }

    #[test]
    fn test_interrupt_while_choosing() {
        let prompter = ScriptedPrompter::new(&[Some("x"), None]);
        let console = Console::captured();

        let err = choose_strategy(&prompter, &console).unwrap_err();
        assert!(err.is_interrupted());
    }
}
