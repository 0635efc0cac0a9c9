use crate::prompt::StdinPrompt;
use crate::templates;
use anyhow::Context;
use openclaw_core::{
    config::OpenclawConfig,
    detect, io,
    flags::RunFlags,
    orchestrator::{execute_action, ActionRequest},
    paths,
    plan::{build_install_plan, InstallMode, Intents, PlanAction},
};
use std::path::Path;

/// `openclaw init` — install the template pack into `<root>/.agent/`.
///
/// Plan mode by default; `--apply` executes. An existing `.agent/` is a hard
/// conflict unless `--merge` or `--force` picks a mode explicitly.
pub fn run(root: &Path, flags: RunFlags) -> anyhow::Result<()> {
    let ctx = detect::detect_context(root);
    let pack = templates::materialize()?;
    let agent_dir = paths::agent_dir(root);
    let config_path = paths::config_path(root);

    let mode = if agent_dir.exists() {
        if flags.force {
            InstallMode::ForceReplace
        } else if flags.merge {
            InstallMode::Merge
        } else {
            anyhow::bail!(
                ".agent/ already exists in {}: use --merge (safe) or --force (destructive)",
                root.display()
            );
        }
    } else {
        InstallMode::Fresh
    };

    let plan = build_install_plan(&pack.agent_root(), &agent_dir, mode)
        .context("failed to build install plan")?;

    let create_config = !config_path.exists();
    let mut intents = Intents::from_plan(&plan);
    if create_config {
        intents.writes.push(config_path.clone());
    }

    let destructive = plan.iter().any(|a| matches!(a, PlanAction::DeleteDir { .. }));
    let mut req = ActionRequest::new("init", root, intents, flags);
    if destructive {
        req.confirmation_word = Some("DELETE .agent".to_string());
    }

    let mut prompt = StdinPrompt;
    let outcome = execute_action(
        &req,
        &mut prompt,
        || {
            println!(
                "\nExecution plan ({}):",
                if flags.plan_mode() { "PLAN" } else { "APPLY" }
            );
            println!("  context: {} | ide: {}\n", ctx.env.as_str(), ctx.ide);
            for action in &plan {
                println!("  {}", action.describe(root));
            }
            if create_config {
                println!("  CREATE  openclaw.json (default config)");
            } else {
                println!("  KEEP    openclaw.json (exists)");
            }
        },
        |_prompt| {
            let mut lines = Vec::new();

            let summary = openclaw_core::exec::apply_plan(&plan)?;
            lines.push(format!("- ACT: INSTALLED templates ({})", summary.describe()));

            if create_config {
                OpenclawConfig::default().save(root)?;
                lines.push("- ACT: CREATED openclaw.json".to_string());
            }

            // Context snapshot for skills that need to know where they run
            let context_file = paths::context_file(root);
            let json = serde_json::to_string_pretty(&ctx)?;
            io::atomic_write(&context_file, json.as_bytes())?;
            lines.push("- ACT: WROTE context snapshot".to_string());

            Ok(lines)
        },
    )?;

    super::finish(outcome)
}
