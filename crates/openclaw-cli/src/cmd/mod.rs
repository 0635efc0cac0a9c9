pub mod ide;
pub mod init;
pub mod status;
pub mod uninstall;
pub mod update;

use openclaw_core::orchestrator::Outcome;

/// Translate a pipeline outcome into the command exit contract: a refusal
/// (scope guard or missed destructive phrase) is fatal with exit 1, everything
/// else is a normal completion.
pub fn finish(outcome: Outcome) -> anyhow::Result<()> {
    match outcome {
        Outcome::Refused(reason) => anyhow::bail!("{reason}"),
        Outcome::Planned | Outcome::Applied | Outcome::Declined => Ok(()),
    }
}
