//! Update reconciliation.
//!
//! Walks the shipped template tree and compares every file against the
//! installed copy by content digest. New files are copied, identical files
//! left alone, diverged files backed up to `<path>.bak` before the template
//! content replaces them. Only the single most recent backup is kept.

use crate::consent::Prompt;
use crate::digest::file_digest;
use crate::error::Result;
use crate::flags::RunFlags;
use crate::io;
use crate::plan::walk_files;
use std::path::{Path, PathBuf};

/// Classification of one (template, installed) file pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Installed path absent.
    Added,
    /// Digests equal.
    Identical,
    /// Digests differ: user customization or newer template.
    Diverged,
}

pub fn classify_pair(template_file: &Path, installed_file: &Path) -> Result<FileClass> {
    if !installed_file.exists() {
        return Ok(FileClass::Added);
    }
    if file_digest(template_file)? == file_digest(installed_file)? {
        Ok(FileClass::Identical)
    } else {
        Ok(FileClass::Diverged)
    }
}

/// Partition of the template tree for an update run. Paths are relative to
/// the template root; every template file lands in exactly one bucket.
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    pub added: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl UpdateReport {
    pub fn change_count(&self) -> usize {
        self.added.len() + self.updated.len()
    }
}

/// Compare template and installed trees file-by-file. Read-only.
pub fn plan_update(template_root: &Path, installed_root: &Path) -> Result<UpdateReport> {
    let mut report = UpdateReport::default();
    for rel in walk_files(template_root)? {
        let template_file = template_root.join(&rel);
        let installed_file = installed_root.join(&rel);
        match classify_pair(&template_file, &installed_file)? {
            FileClass::Added => report.added.push(rel),
            FileClass::Identical => report.skipped.push(rel),
            FileClass::Diverged => report.updated.push(rel),
        }
    }
    Ok(report)
}

/// Result of applying an update, including the audit trail lines.
#[derive(Debug, Clone, Default)]
pub struct UpdateOutcome {
    pub added: Vec<PathBuf>,
    pub overwritten: Vec<PathBuf>,
    pub kept_customized: Vec<PathBuf>,
    pub audit: Vec<String>,
}

/// First differing lines between two texts, rendered `- old` / `+ new`,
/// truncated to `limit` differing line pairs.
pub fn render_diff(old: &str, new: &str, limit: usize) -> Vec<String> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let mut out = Vec::new();
    let mut shown = 0;

    let max = old_lines.len().max(new_lines.len());
    for i in 0..max {
        if shown >= limit {
            out.push("  ... (diff truncated)".to_string());
            break;
        }
        let o = old_lines.get(i).copied();
        let n = new_lines.get(i).copied();
        if o == n {
            continue;
        }
        if let Some(o) = o {
            out.push(format!("  - {o}"));
        }
        if let Some(n) = n {
            out.push(format!("  + {n}"));
        }
        shown += 1;
    }
    out
}

/// Apply a previously planned update.
///
/// Added files are always copied. Diverged files are overwritten only after
/// per-file consent (suppressed by `--yes`); a confirmed overwrite first
/// copies the installed file to `<path>.bak`, unconditionally replacing any
/// prior backup. Declined files are left untouched, with no backup written.
pub fn apply_update(
    template_root: &Path,
    installed_root: &Path,
    report: &UpdateReport,
    flags: &RunFlags,
    prompt: &mut dyn Prompt,
) -> Result<UpdateOutcome> {
    let mut outcome = UpdateOutcome::default();

    for rel in &report.added {
        let src = template_root.join(rel);
        let dest = installed_root.join(rel);
        io::copy_file_with_parents(&src, &dest)?;
        outcome.audit.push(format!("- ACT: ADDED {}", rel.display()));
        outcome.added.push(rel.clone());
    }

    for rel in &report.updated {
        let src = template_root.join(rel);
        let dest = installed_root.join(rel);

        if !flags.assume_yes {
            let old = std::fs::read_to_string(&dest).unwrap_or_default();
            let new = std::fs::read_to_string(&src).unwrap_or_default();
            println!("\n~ {} diverged from the template:", rel.display());
            for line in render_diff(&old, &new, 10) {
                println!("{line}");
            }
            let answer = prompt.ask(&format!("Overwrite {}? [y/N]: ", rel.display()))?;
            if !answer.eq_ignore_ascii_case("y") {
                outcome.audit.push(format!(
                    "- SKIPPED UPDATE FOR CUSTOMIZED FILE: {}",
                    rel.display()
                ));
                outcome.kept_customized.push(rel.clone());
                continue;
            }
        }

        let backup = backup_path(&dest);
        std::fs::copy(&dest, &backup)?;
        io::copy_file_with_parents(&src, &dest)?;
        outcome.audit.push(format!(
            "- ACT: UPDATED {} (backup: {}.bak)",
            rel.display(),
            rel.display()
        ));
        outcome.overwritten.push(rel.clone());
    }

    Ok(outcome)
}

fn backup_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    dest.with_file_name(name)
}
