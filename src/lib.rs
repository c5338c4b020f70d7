//! starter-cli - scaffold a new project from a remote starter template
//!
//! The interesting part is the orchestration core: a sequenced,
//! failure-aware pipeline that resolves which external tools exist, runs
//! them as subprocesses with platform-specific fallbacks, and mirrors every
//! real execution with an equivalent dry-run plan.
//!
//! Layers, leaves first:
//!
//! - [`process`] - subprocess runner (binary resolution, stdio modes, the
//!   `npx --yes` fallback)
//! - [`installer`] - package manager probing and selection
//! - [`project`] - name validation/normalization and the directory plan
//! - [`steps`] - best-effort stages with a tagged [`steps::StepOutcome`]
//! - [`scaffold`] - the state machine tying it all together
//!
//! Prompt rendering ([`prompts`]) and the template catalog ([`templates`])
//! are collaborators the pipeline calls out to, not part of the core.

pub mod cli;
pub mod error;
pub mod installer;
pub mod process;
pub mod project;
pub mod prompts;
pub mod scaffold;
pub mod steps;
pub mod templates;

pub use cli::Flags;
pub use error::CliExit;
pub use process::{run, run_npx, CommandResult, RunOptions, StdioMode};
pub use scaffold::VERSION;
pub use steps::StepOutcome;

use clap::error::ErrorKind;

/// Parse `argv` (without the program name) and run the scaffolding pipeline.
///
/// The binary's whole body lives here so the CLI surface can be driven from
/// tests without spawning a process. Process-global state (argv, cwd) is
/// captured once into [`Flags`]; everything after is a function of that
/// value plus external tool availability.
pub async fn run_from_args(argv: &[String]) -> Result<(), CliExit> {
    let flags = match cli::parse(argv) {
        Ok(flags) => flags,
        Err(err) => {
            let kind = err.kind();
            let _ = err.print();
            if matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                return Ok(());
            }
            return Err(CliExit::already_shown("Invalid arguments.", 1));
        }
    };

    scaffold::run_pipeline(flags).await
}
