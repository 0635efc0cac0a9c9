//! Path scope classification.
//!
//! Decides whether a filesystem mutation stays inside the `.agent/` sandbox
//! (plus the fixed root-level allowlist) or escapes it. Normalization is
//! purely lexical — symlinks are not resolved, so this is a best-effort
//! boundary against accidents, not a hard security sandbox.

use crate::paths;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    InScope,
    OutOfScope,
}

/// Resolve `candidate` against `root` and collapse `.` / `..` components
/// without touching the filesystem.
fn normalize(root: &Path, candidate: &Path) -> PathBuf {
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    };

    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Classify a candidate mutation target relative to the project root.
///
/// `InScope` iff the path is `<root>/.agent` or below, the generated config
/// file, or one of the allowlisted root-level IDE marker paths (or below).
pub fn classify(root: &Path, candidate: &Path) -> Scope {
    let resolved = normalize(root, candidate);

    let sandbox = root.join(paths::AGENT_DIR);
    if resolved == sandbox || resolved.starts_with(&sandbox) {
        return Scope::InScope;
    }

    if resolved == root.join(paths::CONFIG_FILE) {
        return Scope::InScope;
    }

    for entry in paths::ROOT_ALLOWLIST {
        let allowed = root.join(entry);
        if resolved == allowed || resolved.starts_with(&allowed) {
            return Scope::InScope;
        }
    }

    Scope::OutOfScope
}

pub fn is_in_scope(root: &Path, candidate: &Path) -> bool {
    classify(root, candidate) == Scope::InScope
}
