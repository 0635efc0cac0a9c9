//! Embedded template pack.
//!
//! Templates ship inside the binary via rust-embed and are materialized to a
//! temporary directory before planning, so the core planner and reconciler
//! always operate on ordinary on-disk trees. The embedded layout avoids
//! dotted names; `agent/` maps to the `.agent/` sandbox and `ide/<adapter>/`
//! files are renamed to their dotted targets at install time.

use anyhow::Context;
use openclaw_core::io;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct TemplatePack;

/// Template pack extracted to a temp directory for the current invocation.
pub struct Materialized {
    dir: TempDir,
}

impl Materialized {
    /// Root of the tree that installs into `<project>/.agent/`.
    pub fn agent_root(&self) -> PathBuf {
        self.dir.path().join("agent")
    }

    pub fn adapter_root(&self, adapter: &str) -> PathBuf {
        self.dir.path().join("ide").join(adapter)
    }

    pub fn has_adapter(&self, adapter: &str) -> bool {
        self.adapter_root(adapter).is_dir()
    }
}

/// Extract the embedded pack. Fails if the pack is empty, which would mean a
/// corrupted build.
pub fn materialize() -> anyhow::Result<Materialized> {
    let dir = TempDir::new().context("failed to create template staging dir")?;
    let mut count = 0;

    for name in TemplatePack::iter() {
        let file = TemplatePack::get(&name).context("embedded template vanished")?;
        let dest = dir.path().join(sanitize(&name));
        io::atomic_write(&dest, &file.data)
            .with_context(|| format!("failed to stage template {name}"))?;
        count += 1;
    }

    if count == 0 {
        anyhow::bail!("template pack is empty: package may be corrupted");
    }
    Ok(Materialized { dir })
}

/// Embedded names are relative and forward-slashed; keep them that way when
/// joining onto the staging dir.
fn sanitize(name: &str) -> PathBuf {
    name.split('/').filter(|c| !c.is_empty() && *c != "..").fold(
        PathBuf::new(),
        |mut acc, comp| {
            acc.push(comp);
            acc
        },
    )
}

/// Adapters shipped in the pack: adapter name, then (source file in the
/// adapter dir, target path relative to the project root).
pub const ADAPTERS: &[(&str, &[(&str, &str)])] = &[
    ("cursor", &[("cursorrules.md", ".cursorrules")]),
    ("windsurf", &[("windsurf-rules.md", ".windsurf/rules.md")]),
    ("github", &[("copilot-instructions.md", ".github/copilot-instructions.md")]),
];

pub fn adapter_names() -> Vec<&'static str> {
    ADAPTERS.iter().map(|(name, _)| *name).collect()
}

pub fn adapter_targets(adapter: &str) -> &'static [(&'static str, &'static str)] {
    ADAPTERS
        .iter()
        .find(|(name, _)| *name == adapter)
        .map(|(_, files)| *files)
        .unwrap_or(&[])
}

/// Absolute project-root paths an adapter would write.
pub fn adapter_write_paths(root: &Path, adapter: &str) -> Vec<PathBuf> {
    adapter_targets(adapter)
        .iter()
        .map(|(_, target)| root.join(target))
        .collect()
}
