use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const AGENT_DIR: &str = ".agent";
pub const AUDIT_DIR: &str = ".agent/audit";
pub const STATE_DIR: &str = ".agent/state";
pub const CONTEXT_DIR: &str = ".agent/context";
pub const RULES_DIR: &str = ".agent/rules";
pub const SKILLS_DIR: &str = ".agent/skills";

pub const CONFIG_FILE: &str = "openclaw.json";
pub const CONTEXT_FILE: &str = ".agent/context/context.json";
pub const MISSION_CONTROL_FILE: &str = ".agent/state/mission_control.json";
pub const MEMORY_FILE: &str = ".agent/state/MEMORY.md";

/// Root-level paths the tool may touch outside the `.agent/` sandbox.
///
/// These are the IDE integration markers and assistant rule files that
/// `ide install` is allowed to place at the project root. Anything else at
/// or above the root is out of scope.
pub const ROOT_ALLOWLIST: &[&str] = &[
    ".cursorrules",
    ".cursor",
    ".github",
    ".windsurf",
    ".qoder",
    "GEMINI.md",
    "AGENTS.md",
    "trae_rule.md",
    "README_PACK.md",
];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn agent_dir(root: &Path) -> PathBuf {
    root.join(AGENT_DIR)
}

pub fn audit_dir(root: &Path) -> PathBuf {
    root.join(AUDIT_DIR)
}

pub fn state_dir(root: &Path) -> PathBuf {
    root.join(STATE_DIR)
}

pub fn context_file(root: &Path) -> PathBuf {
    root.join(CONTEXT_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn mission_control_path(root: &Path) -> PathBuf {
    root.join(MISSION_CONTROL_FILE)
}

pub fn memory_path(root: &Path) -> PathBuf {
    root.join(MEMORY_FILE)
}

/// Display a path relative to the project root when possible.
pub fn rel_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
