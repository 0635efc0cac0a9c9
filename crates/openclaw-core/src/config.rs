use crate::error::{OpenclawError, Result};
use crate::io;
use crate::paths;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

// ---------------------------------------------------------------------------
// FilesystemConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilesystemConfig {
    #[serde(default)]
    pub allowlist: Vec<String>,
}

// ---------------------------------------------------------------------------
// OpenclawConfig (top-level openclaw.json)
// ---------------------------------------------------------------------------

/// Project configuration persisted as `<root>/openclaw.json`.
///
/// The gateway/auth/channels/sandbox sections are owned by the setup wizard
/// and treated as opaque here; this module only guarantees the sections
/// exist and that writes are atomic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenclawConfig {
    #[serde(default)]
    pub gateway: Map<String, Value>,
    #[serde(default)]
    pub auth: Map<String, Value>,
    #[serde(default)]
    pub channels: Map<String, Value>,
    #[serde(default)]
    pub filesystem: FilesystemConfig,
    #[serde(default)]
    pub sandbox: Map<String, Value>,
}

impl OpenclawConfig {
    pub fn exists(root: &Path) -> bool {
        paths::config_path(root).exists()
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(OpenclawError::NotInstalled);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: OpenclawConfig = serde_json::from_str(&data)?;
        Ok(cfg)
    }

    /// Atomic write-to-temp-then-rename, so a crash never leaves a truncated
    /// config behind.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_json::to_string_pretty(self)?;
        io::atomic_write(&path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
