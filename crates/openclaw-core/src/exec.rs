//! Plan executor.
//!
//! Applies an approved plan in sequence. A failure part-way leaves the tree
//! in its partial state: the audit record captures the error and no rollback
//! is attempted.

use crate::error::Result;
use crate::io;
use crate::plan::PlanAction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecSummary {
    pub dirs_created: usize,
    pub files_copied: usize,
    pub files_skipped: usize,
    pub dirs_deleted: usize,
}

impl ExecSummary {
    pub fn describe(&self) -> String {
        format!(
            "created={} copied={} skipped={} deleted={}",
            self.dirs_created, self.files_copied, self.files_skipped, self.dirs_deleted
        )
    }
}

/// Apply every action in `plan`, in order.
pub fn apply_plan(plan: &[PlanAction]) -> Result<ExecSummary> {
    let mut summary = ExecSummary::default();

    for action in plan {
        match action {
            PlanAction::DeleteDir { path, .. } => {
                if path.exists() {
                    std::fs::remove_dir_all(path)?;
                }
                summary.dirs_deleted += 1;
            }
            PlanAction::CreateDir(path) => {
                io::ensure_dir(path)?;
                summary.dirs_created += 1;
            }
            PlanAction::CopyFile { src, dest } => {
                io::copy_file_with_parents(src, dest)?;
                summary.files_copied += 1;
            }
            PlanAction::MergeSkip(_) | PlanAction::Noop { .. } => {
                summary.files_skipped += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_install_plan, InstallMode};
    use tempfile::TempDir;

    #[test]
    fn fresh_install_copies_everything() {
        let dir = TempDir::new().unwrap();
        let tpl = dir.path().join("templates");
        std::fs::create_dir_all(tpl.join("rules")).unwrap();
        std::fs::write(tpl.join("rules/a.md"), "v1").unwrap();
        std::fs::write(tpl.join("b.md"), "v1").unwrap();
        let dest = dir.path().join(".agent");

        let plan = build_install_plan(&tpl, &dest, InstallMode::Fresh).unwrap();
        let summary = apply_plan(&plan).unwrap();

        assert_eq!(summary.files_copied, 2);
        assert_eq!(summary.dirs_created, 1);
        assert_eq!(
            std::fs::read_to_string(dest.join("rules/a.md")).unwrap(),
            "v1"
        );
    }

    #[test]
    fn merge_preserves_existing_content() {
        let dir = TempDir::new().unwrap();
        let tpl = dir.path().join("templates");
        std::fs::create_dir_all(&tpl).unwrap();
        std::fs::write(tpl.join("a.md"), "template").unwrap();
        std::fs::write(tpl.join("b.md"), "template").unwrap();

        let dest = dir.path().join(".agent");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("a.md"), "customized").unwrap();

        let plan = build_install_plan(&tpl, &dest, InstallMode::Merge).unwrap();
        let summary = apply_plan(&plan).unwrap();

        assert_eq!(summary.files_copied, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(
            std::fs::read_to_string(dest.join("a.md")).unwrap(),
            "customized"
        );
        assert_eq!(
            std::fs::read_to_string(dest.join("b.md")).unwrap(),
            "template"
        );
    }

    #[test]
    fn force_replace_discards_old_tree() {
        let dir = TempDir::new().unwrap();
        let tpl = dir.path().join("templates");
        std::fs::create_dir_all(&tpl).unwrap();
        std::fs::write(tpl.join("a.md"), "v2").unwrap();

        let dest = dir.path().join(".agent");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("a.md"), "old").unwrap();
        std::fs::write(dest.join("stale.md"), "stale").unwrap();

        let plan = build_install_plan(&tpl, &dest, InstallMode::ForceReplace).unwrap();
        apply_plan(&plan).unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("a.md")).unwrap(), "v2");
        assert!(!dest.join("stale.md").exists());
    }
}
