//! Environment and IDE detection.
//!
//! Best-effort context used in plan headers and audit records. Detection
//! never fails; unknown environments degrade to `Unknown`.

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    Docker,
    Wsl2,
    Windows,
    Mac,
    LinuxVpsRoot,
    Linux,
    Unknown,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Docker => "docker",
            Environment::Wsl2 => "wsl2",
            Environment::Windows => "windows",
            Environment::Mac => "mac",
            Environment::LinuxVpsRoot => "linux-vps-root",
            Environment::Linux => "linux",
            Environment::Unknown => "unknown",
        }
    }
}

fn is_docker() -> bool {
    Path::new("/.dockerenv").exists()
        || std::fs::read_to_string("/proc/1/cgroup")
            .map(|c| c.contains("docker"))
            .unwrap_or(false)
}

fn is_wsl() -> bool {
    if !cfg!(target_os = "linux") {
        return false;
    }
    if std::env::var_os("WSL_DISTRO_NAME").is_some() {
        return true;
    }
    std::fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|r| r.to_lowercase().contains("microsoft"))
        .unwrap_or(false)
}

/// Priority order: docker > wsl2 > windows > mac > linux (root) > linux.
pub fn detect_environment() -> Environment {
    if is_docker() {
        return Environment::Docker;
    }
    if is_wsl() {
        return Environment::Wsl2;
    }
    if cfg!(target_os = "windows") {
        return Environment::Windows;
    }
    if cfg!(target_os = "macos") {
        return Environment::Mac;
    }
    if cfg!(target_os = "linux") {
        if std::env::var("USER").map(|u| u == "root").unwrap_or(false) {
            return Environment::LinuxVpsRoot;
        }
        return Environment::Linux;
    }
    Environment::Unknown
}

/// Detect the IDE in use from marker directories at the project root.
pub fn detect_ide(root: &Path) -> &'static str {
    let markers: &[(&str, &str)] = &[
        (".cursor", "cursor"),
        (".windsurf", "windsurf"),
        (".qoder", "qoder"),
        (".vscode", "vscode"),
    ];
    for (marker, name) in markers {
        if root.join(marker).exists() {
            return name;
        }
    }
    "unknown"
}

/// Snapshot written to `.agent/context/context.json` on install.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    pub env: Environment,
    pub ide: &'static str,
}

pub fn detect_context(root: &Path) -> Context {
    Context {
        env: detect_environment(),
        ide: detect_ide(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ide_detection_uses_markers() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_ide(dir.path()), "unknown");

        std::fs::create_dir_all(dir.path().join(".cursor")).unwrap();
        assert_eq!(detect_ide(dir.path()), "cursor");
    }

    #[test]
    fn environment_detection_never_panics() {
        let env = detect_environment();
        assert!(!env.as_str().is_empty());
    }

    #[test]
    fn context_serializes_to_json() {
        let dir = TempDir::new().unwrap();
        let ctx = detect_context(dir.path());
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("\"env\""));
        assert!(json.contains("\"ide\""));
    }
}
