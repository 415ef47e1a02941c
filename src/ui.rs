// UI layer: terminal prompts through `dialoguer` and a spinner through
// `indicatif`. The publisher commands only see the `Prompter` trait, so
// they can be driven by scripted answers in tests.

use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

/// How a single prompt should behave.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// Hide what the user types (tokens).
    pub silent: bool,
    /// Value used when the user just presses Enter.
    pub default: Option<String>,
}

impl PromptOptions {
    pub fn silent() -> Self {
        PromptOptions {
            silent: true,
            default: None,
        }
    }

    pub fn with_default(default: impl Into<String>) -> Self {
        PromptOptions {
            silent: false,
            default: Some(default.into()),
        }
    }
}

pub trait Prompter {
    fn read(&mut self, prompt: &str, options: PromptOptions) -> io::Result<String>;
}

/// Reads answers from the attached terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read(&mut self, prompt: &str, options: PromptOptions) -> io::Result<String> {
        if options.silent {
            // `Password` hides input in terminal for tokens.
            return Password::new().with_prompt(prompt).interact();
        }
        let mut input = Input::<String>::new();
        input.with_prompt(prompt).allow_empty(true);
        if let Some(default) = options.default {
            input.default(default);
        }
        input.interact_text()
    }
}

/// `true` only for a plain "y" answer, ignoring case and surrounding space.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Spinner shown while waiting on the gallery. Finish it with
/// `finish_and_clear` once the call returns.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_y_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" Y \n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }
}
