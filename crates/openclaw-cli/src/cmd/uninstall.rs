use crate::prompt::StdinPrompt;
use openclaw_core::{
    audit,
    flags::RunFlags,
    io,
    orchestrator::{execute_action, ActionRequest},
    paths,
    plan::Intents,
};
use std::path::Path;

/// `openclaw uninstall` — remove `.agent/` and the generated config.
///
/// Consent-first: plan mode by default, a typed "UNINSTALL" phrase in apply
/// mode, and an optional backup before anything is removed. The audit record
/// lands at the project root because the sandbox is gone afterwards.
pub fn run(root: &Path, flags: RunFlags) -> anyhow::Result<()> {
    let agent_dir = paths::agent_dir(root);
    let config_path = paths::config_path(root);

    if !agent_dir.exists() && !config_path.exists() {
        println!("No openclaw install found in {}", root.display());
        return Ok(());
    }

    let mut deletes = Vec::new();
    if agent_dir.exists() {
        deletes.push(agent_dir.clone());
    }
    if config_path.exists() {
        deletes.push(config_path.clone());
    }

    let intents = Intents {
        writes: vec![],
        deletes,
        overwrites: vec![],
    };

    let mut req = ActionRequest::new("uninstall", root, intents, flags);
    req.confirmation_word = Some("UNINSTALL".to_string());
    req.skip_audit = true; // recorded at the project root below

    let agent_exists = agent_dir.exists();
    let audit_count = io::count_files(&paths::audit_dir(root));

    let mut prompt = StdinPrompt;
    let outcome = execute_action(
        &req,
        &mut prompt,
        || {
            println!(
                "\nUninstall plan ({}):",
                if flags.plan_mode() { "PLAN" } else { "APPLY" }
            );
            if agent_exists {
                println!(
                    "  DELETE  .agent/ ({} files)",
                    io::count_files(&agent_dir)
                );
            }
            if config_path.exists() {
                println!("  DELETE  openclaw.json");
            }
            if audit_count > 0 {
                println!("\n  warning: {audit_count} audit log(s) will be lost");
            }
        },
        |prompt| {
            let mut lines = audit::header("uninstall", &flags);

            // Optional backup before removal
            if agent_exists && !flags.force {
                let wanted = if flags.assume_yes {
                    true
                } else {
                    let answer = prompt.ask("Backup .agent/ before removing? [Y/n]: ")?;
                    !answer.eq_ignore_ascii_case("n")
                };
                if wanted {
                    let backup_name = format!(".agent.backup-{}", audit::timestamp_slug());
                    let backup_path = root.join(&backup_name);
                    let copied = io::copy_dir_recursive(&agent_dir, &backup_path)?;
                    println!("  backup created: {backup_name}/ ({copied} files)");
                    lines.push(format!("- ACT: BACKED UP .agent/ to {backup_name}/"));
                }
            }

            if agent_exists {
                std::fs::remove_dir_all(&agent_dir)?;
                println!("  removed: .agent/");
                lines.push("- ACT: REMOVED .agent/".to_string());
            }
            if config_path.exists() {
                std::fs::remove_file(&config_path)?;
                println!("  removed: openclaw.json");
                lines.push("- ACT: REMOVED openclaw.json".to_string());
            }
            lines.push("Status: SUCCESS".to_string());

            // The sandbox is gone, so the record goes to the project root
            if flags.audit {
                let filename =
                    format!("openclaw-uninstall-{}.md", audit::timestamp_slug());
                audit::write_best_effort(&root.join(filename), &lines);
            }

            println!("\nOpenclaw uninstalled. Reinstall with: openclaw init --apply");
            Ok(lines)
        },
    )?;

    super::finish(outcome)
}
