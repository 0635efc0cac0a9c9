use serde::Serialize;

/// Immutable run configuration, built once at the command boundary.
///
/// Replaces per-call option bags: every pipeline stage receives the same
/// validated record instead of re-reading loose flags.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunFlags {
    /// `--apply`: execute the plan. Default false means plan-only dry run.
    pub apply: bool,
    /// `--yes`: skip generic confirmations. Never approves sandbox escapes.
    pub assume_yes: bool,
    /// `--force`: escalate destructive operations and scope overrides.
    pub force: bool,
    /// `--merge`: merge-install, preserving existing destination files.
    pub merge: bool,
    /// Audit recording enabled (cleared by `--no-audit`).
    pub audit: bool,
}

impl Default for RunFlags {
    fn default() -> Self {
        Self {
            apply: false,
            assume_yes: false,
            force: false,
            merge: false,
            audit: true,
        }
    }
}

impl RunFlags {
    pub fn plan_mode(&self) -> bool {
        !self.apply
    }

    /// One-line snapshot for audit records.
    pub fn snapshot(&self) -> String {
        format!(
            "apply={} yes={} force={} merge={} audit={}",
            self.apply, self.assume_yes, self.force, self.merge, self.audit
        )
    }
}
