use crate::prompt::StdinPrompt;
use crate::templates;
use anyhow::Context;
use openclaw_core::{
    flags::RunFlags,
    orchestrator::{execute_action, ActionRequest},
    paths,
    plan::Intents,
    reconcile,
};
use std::path::Path;

/// `openclaw update` — reconcile installed templates with the shipped pack.
///
/// Requires an existing install. Diverged files are confirmed per-file when
/// interactive, so the generic apply confirmation is skipped.
pub fn run(root: &Path, flags: RunFlags) -> anyhow::Result<()> {
    let agent_dir = paths::agent_dir(root);
    if !agent_dir.exists() {
        anyhow::bail!(
            "no .agent/ found in {}: run 'openclaw init' first",
            root.display()
        );
    }

    let pack = templates::materialize()?;
    let template_root = pack.agent_root();
    let report = reconcile::plan_update(&template_root, &agent_dir)
        .context("failed to compare template and installed trees")?;

    let intents = Intents {
        writes: report.added.iter().map(|r| agent_dir.join(r)).collect(),
        overwrites: report.updated.iter().map(|r| agent_dir.join(r)).collect(),
        deletes: vec![],
    };

    let mut req = ActionRequest::new("update", root, intents, flags);
    req.skip_confirm = true; // diverged files are confirmed one by one

    let mut prompt = StdinPrompt;
    let outcome = execute_action(
        &req,
        &mut prompt,
        || {
            println!(
                "\nUpdate plan ({}):",
                if flags.plan_mode() { "PLAN" } else { "APPLY" }
            );
            for rel in &report.added {
                println!("  + {} (new)", rel.display());
            }
            for rel in &report.updated {
                println!("  ~ {} (diverged, backup on overwrite)", rel.display());
            }
            for rel in &report.skipped {
                println!("  = {} (unchanged)", rel.display());
            }
            println!(
                "\n  {} change(s), {} unchanged",
                report.change_count(),
                report.skipped.len()
            );
        },
        |prompt| {
            let result =
                reconcile::apply_update(&template_root, &agent_dir, &report, &flags, prompt)?;
            println!(
                "\nUpdate complete: {} added, {} updated, {} kept customized",
                result.added.len(),
                result.overwritten.len(),
                result.kept_customized.len()
            );
            Ok(result.audit)
        },
    )?;

    super::finish(outcome)
}
