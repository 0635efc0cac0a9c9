//! Install planning.
//!
//! Plans are pure data: building one performs no filesystem mutation beyond
//! reading the template and destination trees. Deletions always precede
//! creations in the emitted sequence.

use crate::error::{OpenclawError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// PlanAction / InstallMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    CreateDir(PathBuf),
    CopyFile { src: PathBuf, dest: PathBuf },
    /// Destination exists under a merge install, left untouched.
    MergeSkip(PathBuf),
    DeleteDir { path: PathBuf, reason: String },
    Noop { path: PathBuf, reason: String },
}

impl PlanAction {
    /// One plan line for the visible report, paths shown relative to `root`.
    pub fn describe(&self, root: &Path) -> String {
        let rel = |p: &Path| crate::paths::rel_display(root, p);
        match self {
            PlanAction::CreateDir(p) => format!("CREATE  {}", rel(p)),
            PlanAction::CopyFile { dest, .. } => format!("COPY    {}", rel(dest)),
            PlanAction::MergeSkip(p) => format!("KEEP    {} (exists)", rel(p)),
            PlanAction::DeleteDir { path, reason } => {
                format!("DELETE  {} ({reason})", rel(path))
            }
            PlanAction::Noop { path, reason } => format!("KEEP    {} ({reason})", rel(path)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Destination absent: create and copy everything.
    Fresh,
    /// Destination present: copy only files that are missing.
    Merge,
    /// Delete the destination, then fresh install.
    ForceReplace,
}

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// The mutation surface of a plan, as consumed by the scope guard.
///
/// A path belongs to at most one of the three sets. Under a force install
/// the sandbox root is classified as a delete; the recreate is implied.
#[derive(Debug, Clone, Default)]
pub struct Intents {
    pub writes: Vec<PathBuf>,
    pub deletes: Vec<PathBuf>,
    pub overwrites: Vec<PathBuf>,
}

impl Intents {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.deletes.is_empty() && self.overwrites.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "writes={} overwrites={} deletes={}",
            self.writes.len(),
            self.overwrites.len(),
            self.deletes.len()
        )
    }

    /// Derive intents from an install plan.
    pub fn from_plan(plan: &[PlanAction]) -> Self {
        let mut intents = Intents::default();
        for action in plan {
            match action {
                PlanAction::DeleteDir { path, .. } => intents.deletes.push(path.clone()),
                PlanAction::CreateDir(p) => {
                    if !intents.deletes.contains(p) {
                        intents.writes.push(p.clone());
                    }
                }
                PlanAction::CopyFile { dest, .. } => intents.writes.push(dest.clone()),
                PlanAction::MergeSkip(_) | PlanAction::Noop { .. } => {}
            }
        }
        intents
    }
}

// ---------------------------------------------------------------------------
// Plan building
// ---------------------------------------------------------------------------

/// Walk a directory tree, yielding file paths relative to `base`, sorted for
/// a deterministic plan order.
pub fn walk_files(base: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(base, base, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(base: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(base, &path, out)?;
        } else {
            let rel = path
                .strip_prefix(base)
                .expect("walked path is under its base")
                .to_path_buf();
            out.push(rel);
        }
    }
    Ok(())
}

/// Build the ordered action sequence for installing `template_root` into
/// `dest_root` under the given mode.
///
/// A present destination in `Fresh` mode is a hard conflict: the caller must
/// choose `Merge` or `ForceReplace` explicitly.
pub fn build_install_plan(
    template_root: &Path,
    dest_root: &Path,
    mode: InstallMode,
) -> Result<Vec<PlanAction>> {
    if !template_root.exists() {
        return Err(OpenclawError::TemplatesMissing);
    }

    let dest_exists = dest_root.exists();
    if dest_exists && mode == InstallMode::Fresh {
        return Err(OpenclawError::Conflict);
    }

    let files = walk_files(template_root)?;
    let mut plan = Vec::new();

    match mode {
        InstallMode::ForceReplace if dest_exists => {
            plan.push(PlanAction::DeleteDir {
                path: dest_root.to_path_buf(),
                reason: "force requested".to_string(),
            });
            plan.push(PlanAction::CreateDir(dest_root.to_path_buf()));
            for rel in files {
                plan.push(PlanAction::CopyFile {
                    src: template_root.join(&rel),
                    dest: dest_root.join(&rel),
                });
            }
        }
        InstallMode::Merge if dest_exists => {
            for rel in files {
                let dest = dest_root.join(&rel);
                if dest.exists() {
                    plan.push(PlanAction::MergeSkip(dest));
                } else {
                    plan.push(PlanAction::CopyFile {
                        src: template_root.join(&rel),
                        dest,
                    });
                }
            }
        }
        // Fresh, or Merge/ForceReplace against an absent destination
        _ => {
            plan.push(PlanAction::CreateDir(dest_root.to_path_buf()));
            for rel in files {
                plan.push(PlanAction::CopyFile {
                    src: template_root.join(&rel),
                    dest: dest_root.join(&rel),
                });
            }
        }
    }

    Ok(plan)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
