//! Terminal prompts: settings questions and the between-pages gate.

use console::Term;

use crate::config::Prompter;
use crate::download::ContinueGate;
use crate::error::Result;

/// Reads answers from the controlling terminal.
#[derive(Debug, Clone)]
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str) -> Result<String> {
        self.term.write_str(question)?;
        let line = self.term.read_line()?;
        Ok(line.trim().to_string())
    }
}

/// Asks whether to fetch the next page.
pub struct PromptGate<'a, P: Prompter> {
    prompter: &'a P,
}

impl<'a, P: Prompter> PromptGate<'a, P> {
    pub fn new(prompter: &'a P) -> Self {
        Self { prompter }
    }
}

impl<P: Prompter> ContinueGate for PromptGate<'_, P> {
    fn should_continue(&mut self, cursor: &str) -> Result<bool> {
        tracing::info!("Last tweet ID: {}", cursor);
        self.prompter.confirm("Type 'y' to continue: ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Answers(RefCell<Vec<&'static str>>);

    impl Prompter for Answers {
        fn ask(&self, _question: &str) -> Result<String> {
            Ok(self.0.borrow_mut().remove(0).to_string())
        }
    }

    #[test]
    fn test_gate_only_continues_on_yes() {
        let answers = Answers(RefCell::new(vec!["y", "YES", "", "n", "sure"]));
        let mut gate = PromptGate::new(&answers);

        assert!(gate.should_continue("10").unwrap());
        assert!(gate.should_continue("9").unwrap());
        assert!(!gate.should_continue("8").unwrap());
        assert!(!gate.should_continue("7").unwrap());
        assert!(!gate.should_continue("6").unwrap());
    }
}
