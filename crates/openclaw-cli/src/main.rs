mod cmd;
mod prompt;
mod root;
mod templates;

use clap::{Args, Parser, Subcommand};
use openclaw_core::flags::RunFlags;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "openclaw",
    about = "Consent-first installer for the .agent/ configuration pack",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .agent/ or .git/)
    #[arg(long, global = true, env = "OPENCLAW_PATH")]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every mutating command.
#[derive(Args, Clone, Copy)]
struct CommonFlags {
    /// Execute the plan (default: plan-only dry run)
    #[arg(long)]
    apply: bool,

    /// Skip generic confirmations (never approves sandbox escapes)
    #[arg(long)]
    yes: bool,

    /// Escalate destructive operations and scope overrides
    #[arg(long)]
    force: bool,

    /// Disable the audit record for this invocation
    #[arg(long = "no-audit")]
    no_audit: bool,
}

impl CommonFlags {
    fn to_run_flags(self, merge: bool) -> RunFlags {
        RunFlags {
            apply: self.apply,
            assume_yes: self.yes,
            force: self.force,
            merge,
            audit: !self.no_audit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Install the .agent/ template pack into the project
    Init {
        /// Merge into an existing .agent/ (preserves existing files)
        #[arg(long)]
        merge: bool,

        #[command(flatten)]
        flags: CommonFlags,
    },

    /// Refresh installed templates, preserving user customizations
    Update {
        #[command(flatten)]
        flags: CommonFlags,
    },

    /// Remove the .agent/ install and generated config
    Uninstall {
        #[command(flatten)]
        flags: CommonFlags,
    },

    /// IDE integration
    Ide {
        #[command(subcommand)]
        subcommand: IdeSubcommand,
    },

    /// Show install status (read-only)
    Status,
}

#[derive(Subcommand)]
enum IdeSubcommand {
    /// Install the pack plus opt-in IDE adapters
    Install {
        /// Comma-separated adapter list, or 'all'
        #[arg(long)]
        adapters: Option<String>,

        #[command(flatten)]
        flags: CommonFlags,
    },

    /// Check that rules, skills, and state are in place
    Doctor,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let root = root::resolve_root(cli.path.as_deref());

    let result = match cli.command {
        Commands::Init { merge, flags } => cmd::init::run(&root, flags.to_run_flags(merge)),
        Commands::Update { flags } => cmd::update::run(&root, flags.to_run_flags(false)),
        Commands::Uninstall { flags } => cmd::uninstall::run(&root, flags.to_run_flags(false)),
        Commands::Ide { subcommand } => match subcommand {
            IdeSubcommand::Install { adapters, flags } => {
                cmd::ide::run_install(&root, adapters.as_deref(), flags.to_run_flags(false))
            }
            IdeSubcommand::Doctor => cmd::ide::run_doctor(&root),
        },
        Commands::Status => cmd::status::run(&root),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
