use openclaw_core::{config::OpenclawConfig, io, paths};
use std::path::Path;

/// `openclaw status` — read-only install summary.
pub fn run(root: &Path) -> anyhow::Result<()> {
    let agent_dir = paths::agent_dir(root);

    println!("\nOpenclaw status — {}\n", root.display());

    if !agent_dir.exists() {
        println!("  not installed (no .agent/)");
        println!("  install with: openclaw init --apply");
        return Ok(());
    }

    println!("  .agent/         {} files", io::count_files(&agent_dir));
    println!(
        "  openclaw.json   {}",
        if OpenclawConfig::exists(root) { "present" } else { "missing" }
    );

    let audit_dir = paths::audit_dir(root);
    let mut audits: Vec<String> = std::fs::read_dir(&audit_dir)
        .map(|entries| {
            entries
                .flatten()
                .filter_map(|e| e.file_name().into_string().ok())
                .collect()
        })
        .unwrap_or_default();
    audits.sort();
    println!("  audit records   {}", audits.len());
    if let Some(last) = audits.last() {
        println!("  last audit      {last}");
    }

    let state = paths::state_dir(root);
    println!(
        "  state/          {}",
        if state.exists() { "seeded" } else { "not seeded" }
    );

    Ok(())
}
