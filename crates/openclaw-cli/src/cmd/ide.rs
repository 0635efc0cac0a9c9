use crate::prompt::StdinPrompt;
use crate::templates;
use anyhow::Context;
use openclaw_core::{
    consent::Prompt,
    detect, io,
    flags::RunFlags,
    orchestrator::{execute_action, ActionRequest},
    paths,
    plan::{build_install_plan, InstallMode, Intents, PlanAction},
};
use serde_json::json;
use std::path::Path;

/// `openclaw ide install` — merge-flavored pack install plus opt-in IDE
/// adapters and a `.agent/state/` seed.
pub fn run_install(root: &Path, adapters: Option<&str>, flags: RunFlags) -> anyhow::Result<()> {
    let ctx = detect::detect_context(root);
    let pack = templates::materialize()?;
    let agent_dir = paths::agent_dir(root);

    let existed = agent_dir.exists();
    let mode = if existed && flags.force {
        InstallMode::ForceReplace
    } else if existed {
        InstallMode::Merge
    } else {
        InstallMode::Fresh
    };

    let selected = select_adapters(adapters, &flags, ctx.ide)?;

    let plan = build_install_plan(&pack.agent_root(), &agent_dir, mode)
        .context("failed to build install plan")?;

    let state_dir = paths::state_dir(root);
    let seed_state = !state_dir.exists();

    let mut intents = Intents::from_plan(&plan);
    if seed_state {
        intents.writes.push(paths::mission_control_path(root));
        intents.writes.push(paths::memory_path(root));
    }
    for adapter in &selected {
        intents
            .writes
            .extend(templates::adapter_write_paths(root, adapter));
    }

    let mut req = ActionRequest::new("ide install", root, intents, flags);
    if existed && flags.force {
        req.confirmation_word = Some("DELETE .agent".to_string());
    }

    let mut prompt = StdinPrompt;
    let outcome = execute_action(
        &req,
        &mut prompt,
        || {
            println!(
                "\nIDE install plan ({}):",
                if flags.plan_mode() { "PLAN" } else { "APPLY" }
            );
            println!("  context: {} | ide: {}\n", ctx.env.as_str(), ctx.ide);
            for action in &plan {
                if !matches!(action, PlanAction::MergeSkip(_)) {
                    println!("  {}", action.describe(root));
                }
            }
            if seed_state {
                println!("  CREATE  .agent/state/ (mission control + memory)");
            } else {
                println!("  KEEP    .agent/state/ (exists)");
            }
            if !selected.is_empty() {
                println!("  ADDON   adapters: {}", selected.join(", "));
            }
        },
        |_prompt| {
            let mut lines = Vec::new();

            let summary = openclaw_core::exec::apply_plan(&plan)?;
            lines.push(format!("- ACT: INSTALLED templates ({})", summary.describe()));

            for adapter in &selected {
                for (src, target) in templates::adapter_targets(adapter) {
                    let dest = root.join(target);
                    if dest.exists() {
                        continue; // adapters never clobber existing files
                    }
                    io::copy_file_with_parents(&pack.adapter_root(adapter).join(src), &dest)?;
                    lines.push(format!("- ACT: ADDED adapter file {target}"));
                }
            }

            if seed_state {
                seed_state_dir(root)?;
                lines.push("- ACT: SEEDED .agent/state/".to_string());
            }

            Ok(lines)
        },
    )?;

    super::finish(outcome)
}

fn select_adapters(
    requested: Option<&str>,
    flags: &RunFlags,
    detected_ide: &str,
) -> anyhow::Result<Vec<String>> {
    let available = templates::adapter_names();

    let parse = |value: &str| -> Vec<String> {
        if value.trim().eq_ignore_ascii_case("all") || value.trim() == "*" {
            return available.iter().map(|s| s.to_string()).collect();
        }
        value
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| available.contains(&s.as_str()))
            .collect()
    };

    match requested {
        Some(value) => Ok(parse(value)),
        // Non-interactive runs get no adapters unless asked for explicitly
        None if flags.assume_yes => Ok(vec![]),
        None => {
            let mut prompt = StdinPrompt;
            let hint = if available.contains(&detected_ide) {
                format!(" (recommended: {detected_ide})")
            } else {
                String::new()
            };
            let want = prompt.ask(&format!("Install optional IDE adapters?{hint} [y/N]: "))?;
            if !want.eq_ignore_ascii_case("y") {
                return Ok(vec![]);
            }
            let which = prompt.ask(&format!("Which? ({}, or 'all'): ", available.join(", ")))?;
            Ok(parse(&which))
        }
    }
}

fn seed_state_dir(root: &Path) -> openclaw_core::Result<()> {
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    let mission_control = json!({
        "project_status": "active",
        "project_name": project_name,
        "sprint_goal": "",
        "agents": [
            { "id": "orchestrator", "role": "orchestrator", "active": true },
            { "id": "researcher", "role": "researcher", "active": true },
            { "id": "writer", "role": "writer", "active": true },
        ],
        "task_queue": [],
        "history": [],
        "settings": {
            "work_dir": "mission_control",
            "max_tasks_per_tick": 2,
            "default_priority": "medium",
        },
    });

    io::atomic_write(
        &paths::mission_control_path(root),
        serde_json::to_string_pretty(&mission_control)?.as_bytes(),
    )?;
    io::atomic_write(
        &paths::memory_path(root),
        b"# Persistent Memory\n\n(Record durable decisions and summaries here)\n",
    )?;
    Ok(())
}

/// `openclaw ide doctor` — read-only checklist of the installed pack.
pub fn run_doctor(root: &Path) -> anyhow::Result<()> {
    let agent_dir = paths::agent_dir(root);
    let mut checks: Vec<(String, bool)> = Vec::new();

    println!("\nIDE doctor — checking install:\n");

    checks.push((".agent/".to_string(), agent_dir.is_dir()));

    for rule in [
        "CONSENT_FIRST.md",
        "ROUTER_PROTOCOL.md",
        "SECURITY.md",
        "WEB_AUTOMATION.md",
    ] {
        checks.push((
            format!("rules/{rule}"),
            root.join(paths::RULES_DIR).join(rule).exists(),
        ));
    }

    for skill in ["openclaw-router", "openclaw-inspect", "openclaw-dev"] {
        checks.push((
            format!("skills/{skill}/SKILL.md"),
            root.join(paths::SKILLS_DIR).join(skill).join("SKILL.md").exists(),
        ));
    }

    checks.push((
        "state/mission_control.json".to_string(),
        paths::mission_control_path(root).exists(),
    ));
    checks.push(("state/MEMORY.md".to_string(), paths::memory_path(root).exists()));

    let mut all_ok = true;
    for (name, ok) in &checks {
        println!("  [{}] {name}", if *ok { "ok" } else { "MISSING" });
        all_ok &= ok;
    }

    println!("\n  [optional adapters]");
    for adapter in templates::adapter_names() {
        let installed = templates::adapter_write_paths(root, adapter)
            .iter()
            .all(|p| p.exists());
        println!("  [{}] {adapter}", if installed { "ok" } else { "--" });
    }

    if all_ok {
        println!("\nIDE is fully configured.");
    } else {
        println!("\nComponents missing. Run: openclaw ide install --apply");
    }
    Ok(())
}
