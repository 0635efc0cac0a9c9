//! Consent gate and the operator input port.
//!
//! All interactive questions flow through the [`Prompt`] trait so commands
//! and tests can substitute a scripted answer source for real stdin.

use crate::error::Result;
use crate::flags::RunFlags;
use std::collections::VecDeque;

pub trait Prompt {
    /// Ask the operator a question and return the trimmed answer.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Scripted answers for tests and non-interactive drivers. Returns an empty
/// string once the script is exhausted, which reads as "decline" everywhere.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, _question: &str) -> Result<String> {
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consent {
    Granted,
    Declined,
}

/// Decide go/no-go for an apply-mode plan.
///
/// `confirmation_word` escalates to an exact typed phrase for destructive
/// plans; otherwise a plain y/N. `--yes` suppresses both (scope escapes are
/// already refused upstream by the guard, so this only ever auto-approves
/// in-scope work).
pub fn confirm(
    prompt: &mut dyn Prompt,
    flags: &RunFlags,
    confirmation_word: Option<&str>,
) -> Result<Consent> {
    if flags.assume_yes {
        return Ok(Consent::Granted);
    }

    match confirmation_word {
        Some(word) => {
            let answer = prompt.ask(&format!(
                "Destructive action requires strong confirmation. Type '{word}' to proceed: "
            ))?;
            if answer == word {
                Ok(Consent::Granted)
            } else {
                Ok(Consent::Declined)
            }
        }
        None => {
            let answer = prompt.ask("Apply these changes? [y/N]: ")?;
            if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
                Ok(Consent::Granted)
            } else {
                Ok(Consent::Declined)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_flags() -> RunFlags {
        RunFlags {
            apply: true,
            ..Default::default()
        }
    }

    #[test]
    fn assume_yes_grants_without_prompting() {
        let mut prompt = ScriptedPrompt::default();
        let flags = RunFlags {
            apply: true,
            assume_yes: true,
            ..Default::default()
        };
        assert_eq!(
            confirm(&mut prompt, &flags, Some("DELETE .agent")).unwrap(),
            Consent::Granted
        );
    }

    #[test]
    fn confirmation_word_requires_exact_match() {
        let mut prompt = ScriptedPrompt::new(["delete .agent"]);
        assert_eq!(
            confirm(&mut prompt, &apply_flags(), Some("DELETE .agent")).unwrap(),
            Consent::Declined
        );

        let mut prompt = ScriptedPrompt::new(["DELETE .agent"]);
        assert_eq!(
            confirm(&mut prompt, &apply_flags(), Some("DELETE .agent")).unwrap(),
            Consent::Granted
        );
    }

    #[test]
    fn yes_no_accepts_y_and_yes() {
        for answer in ["y", "Y", "yes", "YES"] {
            let mut prompt = ScriptedPrompt::new([answer]);
            assert_eq!(
                confirm(&mut prompt, &apply_flags(), None).unwrap(),
                Consent::Granted
            );
        }
        for answer in ["", "n", "no", "maybe"] {
            let mut prompt = ScriptedPrompt::new([answer]);
            assert_eq!(
                confirm(&mut prompt, &apply_flags(), None).unwrap(),
                Consent::Declined
            );
        }
    }

    #[test]
    fn exhausted_script_declines() {
        let mut prompt = ScriptedPrompt::default();
        assert_eq!(
            confirm(&mut prompt, &apply_flags(), None).unwrap(),
            Consent::Declined
        );
    }
}
