//! `npx` invocation with a `--yes` compatibility fallback

use super::runner::{run, CommandResult, RunOptions};

/// Substrings marking an `npx` too old to understand `--yes`, matched
/// case-insensitively against the combined stderr and stdout.
const YES_UNSUPPORTED_MARKERS: [&str; 3] =
    ["unknown option", "unexpected argument", "unrecognized option"];

/// Run `npx --yes <args>`, retrying once as plain `npx <args>` when the
/// installed npx rejects the flag itself. Any other failure is returned
/// unchanged.
pub async fn run_npx(args: &[&str], options: RunOptions) -> CommandResult {
    let mut with_yes: Vec<&str> = Vec::with_capacity(args.len() + 1);
    with_yes.push("--yes");
    with_yes.extend_from_slice(args);

    let first = run("npx", &with_yes, options.clone()).await;
    if first.success() || !rejects_yes_flag(&first) {
        return first;
    }

    run("npx", args, options).await
}

/// Heuristic carried over from older npm tooling; the marker strings are
/// English-only and not exhaustive across npx versions or locales.
fn rejects_yes_flag(result: &CommandResult) -> bool {
    let combined = format!("{}\n{}", result.stderr, result.stdout).to_lowercase();
    YES_UNSUPPORTED_MARKERS
        .iter()
        .any(|marker| combined.contains(marker))
}
