//! Append-only audit trail.
//!
//! One dated markdown file per apply-mode invocation, under
//! `<root>/.agent/audit/`. Recording is best-effort: a failed write is
//! logged at warn and never aborts the operation it describes.

use crate::flags::RunFlags;
use crate::paths;
use std::path::Path;

/// Timestamp slug safe for filenames (RFC 3339 with `:` and `.` replaced).
pub fn timestamp_slug() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Standard header lines for an audit record.
pub fn header(action: &str, flags: &RunFlags) -> Vec<String> {
    vec![
        format!("--- AUDIT LOG: {action} ---"),
        format!("Date: {}", chrono::Utc::now().to_rfc3339()),
        format!("Flags: {}", flags.snapshot()),
    ]
}

/// Record an audit entry under the sandbox. No-op when auditing is disabled.
pub fn record(root: &Path, lines: &[String], flags: &RunFlags, label: &str) {
    if !flags.audit {
        return;
    }
    let dir = paths::audit_dir(root);
    let filename = format!("{label}-{}.md", timestamp_slug());
    write_best_effort(&dir.join(filename), lines);
}

/// Write audit lines to an explicit path, swallowing failures.
///
/// Used directly by uninstall, which records at the project root because the
/// sandbox no longer exists once it completes.
pub fn write_best_effort(path: &Path, lines: &[String]) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(path = %path.display(), error = %e, "could not create audit dir");
            return;
        }
    }
    let body = lines.join("\n") + "\n";
    if let Err(e) = std::fs::write(path, body) {
        tracing::warn!(path = %path.display(), error = %e, "could not write audit log");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn record_creates_dated_file_under_audit_dir() {
        let dir = TempDir::new().unwrap();
        let flags = RunFlags {
            apply: true,
            ..Default::default()
        };
        let mut lines = header("init", &flags);
        lines.push("- ACT: COPIED templates".to_string());
        record(dir.path(), &lines, &flags, "init");

        let audit = paths::audit_dir(dir.path());
        let entries: Vec<_> = std::fs::read_dir(&audit).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0].file_name().into_string().unwrap();
        assert!(name.starts_with("init-"));
        assert!(name.ends_with(".md"));

        let content = std::fs::read_to_string(entries[0].path()).unwrap();
        assert!(content.contains("AUDIT LOG: init"));
        assert!(content.contains("- ACT: COPIED templates"));
    }

    #[test]
    fn no_audit_flag_disables_recording() {
        let dir = TempDir::new().unwrap();
        let flags = RunFlags {
            apply: true,
            audit: false,
            ..Default::default()
        };
        record(dir.path(), &["line".to_string()], &flags, "init");
        assert!(!paths::audit_dir(dir.path()).exists());
    }

    #[test]
    fn write_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // Target path collides with an existing file used as a directory
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        // Must not panic or error
        write_best_effort(&blocker.join("audit.md"), &["line".to_string()]);
    }

    #[test]
    fn timestamp_slug_has_no_reserved_chars() {
        let slug = timestamp_slug();
        assert!(!slug.contains(':'));
        assert!(!slug.contains('.'));
    }
}
