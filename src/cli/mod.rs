//! CLI module: argument parsing and terminal prompts.

pub mod args;
pub mod prompt;

pub use args::Args;
pub use prompt::{PromptGate, TerminalPrompter};
