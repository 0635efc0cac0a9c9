//! Scope guard.
//!
//! Blocks plan intents that escape the `.agent/` sandbox, with friction
//! escalating by blast radius: silent when everything is in scope, a typed
//! phrase for out-of-scope deletes/overwrites, a plain confirmation for
//! out-of-scope writes. `--yes` can never approve an escape; `--force` is
//! the one explicit override and is logged as such.

use crate::consent::Prompt;
use crate::error::Result;
use crate::flags::RunFlags;
use crate::plan::Intents;
use crate::scope;
use std::path::{Path, PathBuf};

/// Typed phrase demanded for out-of-scope deletes and overwrites.
pub const DESTRUCTIVE_PHRASE: &str = "DESTRUCTIVE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    Refused(String),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allowed)
    }
}

fn out_of_scope(root: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| !scope::is_in_scope(root, p))
        .cloned()
        .collect()
}

/// Check every intent path against the sandbox and resolve escapes.
///
/// Runs in plan mode too: a dry run must reveal sandbox-escape risk before
/// the operator ever passes `--apply`.
pub fn guard(
    root: &Path,
    intents: &Intents,
    flags: &RunFlags,
    prompt: &mut dyn Prompt,
) -> Result<GuardDecision> {
    let writes = out_of_scope(root, &intents.writes);
    let overwrites = out_of_scope(root, &intents.overwrites);
    let deletes = out_of_scope(root, &intents.deletes);

    if writes.is_empty() && overwrites.is_empty() && deletes.is_empty() {
        return Ok(GuardDecision::Allowed);
    }

    println!("\n[SCOPE GUARD] intents target paths outside the .agent/ sandbox:");
    let show = |label: &str, paths: &[PathBuf]| {
        if !paths.is_empty() {
            println!("  {label}:");
            for p in paths {
                println!("    {}", p.display());
            }
        }
    };
    show("writes", &writes);
    show("overwrites", &overwrites);
    show("deletes", &deletes);

    if flags.force {
        tracing::warn!(
            root = %root.display(),
            "scope guard overridden by --force; out-of-scope intents allowed"
        );
        println!("--force set: allowing out-of-scope intents (logged).");
        return Ok(GuardDecision::Allowed);
    }

    // Auto-confirmation must never silently approve sandbox escapes.
    if flags.assume_yes {
        return Ok(GuardDecision::Refused(
            "scope guard: sandbox escape cannot be approved with --yes; run interactively or use --force"
                .to_string(),
        ));
    }

    if !deletes.is_empty() || !overwrites.is_empty() {
        let answer = prompt.ask(&format!(
            "Out-of-scope overwrites/deletes requested. Type '{DESTRUCTIVE_PHRASE}' to approve: "
        ))?;
        if answer != DESTRUCTIVE_PHRASE {
            return Ok(GuardDecision::Refused(
                "scope guard: destructive out-of-scope intents not confirmed".to_string(),
            ));
        }
        return Ok(GuardDecision::Allowed);
    }

    // Out-of-scope writes only: plain confirmation is enough.
    let answer = prompt.ask("Approve creating files outside the sandbox? [y/N]: ")?;
    if answer.eq_ignore_ascii_case("y") {
        Ok(GuardDecision::Allowed)
    } else {
        Ok(GuardDecision::Refused(
            "scope guard: out-of-scope writes not confirmed".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::ScriptedPrompt;
    use tempfile::TempDir;

    fn intents_with(
        writes: &[&str],
        deletes: &[&str],
        overwrites: &[&str],
        root: &Path,
    ) -> Intents {
        let abs = |s: &&str| root.join(s);
        Intents {
            writes: writes.iter().map(abs).collect(),
            deletes: deletes.iter().map(abs).collect(),
            overwrites: overwrites.iter().map(abs).collect(),
        }
    }

    #[test]
    fn all_in_scope_allows_silently() {
        let dir = TempDir::new().unwrap();
        let intents = intents_with(
            &[".agent/rules/X.md", "openclaw.json"],
            &[".agent"],
            &[],
            dir.path(),
        );
        let mut prompt = ScriptedPrompt::default();
        let decision = guard(dir.path(), &intents, &RunFlags::default(), &mut prompt).unwrap();
        assert!(decision.is_allowed());
    }

    #[test]
    fn yes_is_refused_for_escapes() {
        let dir = TempDir::new().unwrap();
        let intents = intents_with(&[], &["src"], &[], dir.path());
        let flags = RunFlags {
            assume_yes: true,
            apply: true,
            ..Default::default()
        };
        let mut prompt = ScriptedPrompt::default();
        let decision = guard(dir.path(), &intents, &flags, &mut prompt).unwrap();
        assert!(matches!(decision, GuardDecision::Refused(_)));
    }

    #[test]
    fn force_overrides_escapes() {
        let dir = TempDir::new().unwrap();
        let intents = intents_with(&[], &["src"], &[], dir.path());
        let flags = RunFlags {
            force: true,
            apply: true,
            ..Default::default()
        };
        let mut prompt = ScriptedPrompt::default();
        let decision = guard(dir.path(), &intents, &flags, &mut prompt).unwrap();
        assert!(decision.is_allowed());
    }

    #[test]
    fn destructive_escape_needs_typed_phrase() {
        let dir = TempDir::new().unwrap();
        let intents = intents_with(&[], &[], &["package.json"], dir.path());

        let mut wrong = ScriptedPrompt::new(["yes"]);
        let decision = guard(dir.path(), &intents, &RunFlags::default(), &mut wrong).unwrap();
        assert!(matches!(decision, GuardDecision::Refused(_)));

        let mut right = ScriptedPrompt::new([DESTRUCTIVE_PHRASE]);
        let decision = guard(dir.path(), &intents, &RunFlags::default(), &mut right).unwrap();
        assert!(decision.is_allowed());
    }

    #[test]
    fn write_only_escape_needs_simple_confirmation() {
        let dir = TempDir::new().unwrap();
        let intents = intents_with(&["notes.md"], &[], &[], dir.path());

        let mut no = ScriptedPrompt::new([""]);
        let decision = guard(dir.path(), &intents, &RunFlags::default(), &mut no).unwrap();
        assert!(matches!(decision, GuardDecision::Refused(_)));

        let mut yes = ScriptedPrompt::new(["y"]);
        let decision = guard(dir.path(), &intents, &RunFlags::default(), &mut yes).unwrap();
        assert!(decision.is_allowed());
    }
}
