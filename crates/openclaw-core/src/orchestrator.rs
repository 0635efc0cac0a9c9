//! Consent-first action pipeline.
//!
//! Every mutating command runs the same state machine:
//! guard -> plan -> (plan mode stops here) -> consent -> execute -> audit.
//! The execute closure is unreachable without passing both the scope guard
//! and the consent gate; plan rendering never mutates, so repeated dry runs
//! are side-effect free.

use crate::audit;
use crate::consent::{self, Consent, Prompt};
use crate::error::Result;
use crate::flags::RunFlags;
use crate::guard::{self, GuardDecision};
use crate::plan::Intents;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Plan mode: intents shown, nothing changed.
    Planned,
    /// Apply mode: consent given, execution completed.
    Applied,
    /// Operator declined consent. Not an error.
    Declined,
    /// Scope guard refused the intents.
    Refused(String),
}

impl Outcome {
    pub fn applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

pub struct ActionRequest {
    pub name: String,
    pub root: PathBuf,
    pub intents: Intents,
    pub flags: RunFlags,
    /// Exact phrase demanded for destructive plans (e.g. "DELETE .agent").
    pub confirmation_word: Option<String>,
    /// Skip the standard confirmation, for flows that confirm per-file.
    pub skip_confirm: bool,
    /// Skip the sandbox audit record, for flows that record elsewhere.
    pub skip_audit: bool,
}

impl ActionRequest {
    pub fn new(name: impl Into<String>, root: &Path, intents: Intents, flags: RunFlags) -> Self {
        Self {
            name: name.into(),
            root: root.to_path_buf(),
            intents,
            flags,
            confirmation_word: None,
            skip_confirm: false,
            skip_audit: false,
        }
    }
}

/// Run one action through the full pipeline.
///
/// `plan_fn` renders the visible plan (console output only). `execute_fn`
/// performs the mutation and returns the audit trail lines describing what
/// it did; its error is recorded in the audit trail and then propagated.
/// The prompt is lent to `execute_fn` for flows that confirm per-file.
pub fn execute_action<P, E>(
    req: &ActionRequest,
    prompt: &mut dyn Prompt,
    plan_fn: P,
    execute_fn: E,
) -> Result<Outcome>
where
    P: FnOnce(),
    E: FnOnce(&mut dyn Prompt) -> Result<Vec<String>>,
{
    // Scope guard runs even in plan mode so a dry run reveals escape risk.
    match guard::guard(&req.root, &req.intents, &req.flags, prompt)? {
        GuardDecision::Allowed => {}
        GuardDecision::Refused(reason) => return Ok(Outcome::Refused(reason)),
    }

    plan_fn();

    if req.flags.plan_mode() {
        println!("\nPLAN mode (read-only): nothing changed.");
        println!("Re-run with --apply to execute this plan.");
        return Ok(Outcome::Planned);
    }

    if !req.skip_confirm {
        match consent::confirm(prompt, &req.flags, req.confirmation_word.as_deref())? {
            Consent::Granted => {}
            // A missed typed phrase on a destructive plan is a refusal (exit
            // 1 at the boundary); a declined y/N is a normal cancellation.
            Consent::Declined if req.confirmation_word.is_some() => {
                return Ok(Outcome::Refused(
                    "destructive confirmation phrase not entered; nothing changed".to_string(),
                ));
            }
            Consent::Declined => {
                println!("Cancelled: nothing changed.");
                return Ok(Outcome::Declined);
            }
        }
    }

    println!("\nExecuting [{}]...", req.name);
    let mut lines = audit::header(&req.name, &req.flags);
    lines.push(format!("Intents: {}", req.intents.summary()));

    match execute_fn(prompt) {
        Ok(actions) => {
            lines.extend(actions);
            lines.push("Status: SUCCESS".to_string());
            if !req.skip_audit {
                audit::record(&req.root, &lines, &req.flags, &slug(&req.name));
            }
            println!("Action [{}] completed.", req.name);
            Ok(Outcome::Applied)
        }
        Err(e) => {
            tracing::error!(action = %req.name, error = %e, "execution failed");
            lines.push(format!("Status: ERROR: {e}"));
            if !req.skip_audit {
                audit::record(&req.root, &lines, &req.flags, &slug(&req.name));
            }
            Err(e)
        }
    }
}

fn slug(name: &str) -> String {
    name.replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::ScriptedPrompt;
    use crate::paths;
    use tempfile::TempDir;

    fn in_scope_intents(root: &Path) -> Intents {
        Intents {
            writes: vec![root.join(".agent/a.md")],
            deletes: vec![],
            overwrites: vec![],
        }
    }

    #[test]
    fn plan_mode_never_executes() {
        let dir = TempDir::new().unwrap();
        let req = ActionRequest::new(
            "init",
            dir.path(),
            in_scope_intents(dir.path()),
            RunFlags::default(),
        );
        let mut prompt = ScriptedPrompt::default();
        let mut executed = false;
        let outcome = execute_action(&req, &mut prompt, || {}, |_| {
            executed = true;
            Ok(vec![])
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Planned);
        assert!(!executed);
    }

    #[test]
    fn declined_consent_skips_execution() {
        let dir = TempDir::new().unwrap();
        let flags = RunFlags {
            apply: true,
            ..Default::default()
        };
        let req = ActionRequest::new("init", dir.path(), in_scope_intents(dir.path()), flags);
        let mut prompt = ScriptedPrompt::new(["n"]);
        let mut executed = false;
        let outcome = execute_action(&req, &mut prompt, || {}, |_| {
            executed = true;
            Ok(vec![])
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Declined);
        assert!(!executed);
    }

    #[test]
    fn missed_destructive_phrase_is_refused() {
        let dir = TempDir::new().unwrap();
        let flags = RunFlags {
            apply: true,
            force: true,
            ..Default::default()
        };
        let mut req =
            ActionRequest::new("init", dir.path(), in_scope_intents(dir.path()), flags);
        req.confirmation_word = Some("DELETE .agent".to_string());
        let mut prompt = ScriptedPrompt::new(["wrong"]);
        let mut executed = false;
        let outcome = execute_action(&req, &mut prompt, || {}, |_| {
            executed = true;
            Ok(vec![])
        })
        .unwrap();
        assert!(matches!(outcome, Outcome::Refused(_)));
        assert!(!executed);
    }

    #[test]
    fn applied_action_writes_audit_record() {
        let dir = TempDir::new().unwrap();
        let flags = RunFlags {
            apply: true,
            assume_yes: true,
            ..Default::default()
        };
        let req = ActionRequest::new("ide install", dir.path(), in_scope_intents(dir.path()), flags);
        let mut prompt = ScriptedPrompt::default();
        let outcome = execute_action(&req, &mut prompt, || {}, |_| {
            Ok(vec!["- ACT: COPIED templates".to_string()])
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Applied);

        let audit_dir = paths::audit_dir(dir.path());
        let entries: Vec<_> = std::fs::read_dir(&audit_dir).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0]
            .file_name()
            .into_string()
            .unwrap()
            .starts_with("ide-install-"));
    }

    #[test]
    fn execution_failure_is_audited_and_propagated() {
        let dir = TempDir::new().unwrap();
        let flags = RunFlags {
            apply: true,
            assume_yes: true,
            ..Default::default()
        };
        let req = ActionRequest::new("init", dir.path(), in_scope_intents(dir.path()), flags);
        let mut prompt = ScriptedPrompt::default();
        let result = execute_action(&req, &mut prompt, || {}, |_| {
            Err(crate::OpenclawError::Execution {
                action: "init".to_string(),
                message: "disk full".to_string(),
            })
        });
        assert!(result.is_err());

        let audit_dir = paths::audit_dir(dir.path());
        let entry = std::fs::read_dir(&audit_dir).unwrap().flatten().next().unwrap();
        let content = std::fs::read_to_string(entry.path()).unwrap();
        assert!(content.contains("Status: ERROR"));
        assert!(content.contains("disk full"));
    }

    #[test]
    fn refused_scope_prevents_everything() {
        let dir = TempDir::new().unwrap();
        let flags = RunFlags {
            apply: true,
            assume_yes: true,
            ..Default::default()
        };
        let intents = Intents {
            writes: vec![],
            deletes: vec![dir.path().join("src")],
            overwrites: vec![],
        };
        let req = ActionRequest::new("uninstall", dir.path(), intents, flags);
        let mut prompt = ScriptedPrompt::default();
        let mut executed = false;
        let outcome = execute_action(&req, &mut prompt, || {}, |_| {
            executed = true;
            Ok(vec![])
        })
        .unwrap();
        assert!(matches!(outcome, Outcome::Refused(_)));
        assert!(!executed);
        assert!(!paths::audit_dir(dir.path()).exists());
    }
}
