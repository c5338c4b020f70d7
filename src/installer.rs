//! Package manager detection and selection

use crate::error::{fail, CliExit};
use crate::process::{run, RunOptions, StdioMode};

/// One known package manager: how to probe for it and how to install with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Installer {
    pub label: &'static str,
    pub command: &'static str,
    /// Install invocation; empty when the bare command already installs.
    pub args: &'static [&'static str],
    /// Version probe used to check availability.
    pub version_args: &'static [&'static str],
}

/// Known installers in priority order. Order is a deliberate preference:
/// the first one that answers a version probe wins even when a later one
/// would also succeed.
pub static KNOWN_INSTALLERS: [Installer; 6] = [
    Installer {
        label: "pi",
        command: "pi",
        args: &[],
        version_args: &["-v"],
    },
    Installer {
        label: "ni",
        command: "ni",
        args: &[],
        version_args: &["-v"],
    },
    Installer {
        label: "pnpm",
        command: "pnpm",
        args: &["install"],
        version_args: &["-v"],
    },
    Installer {
        label: "npm",
        command: "npm",
        args: &["install"],
        version_args: &["-v"],
    },
    Installer {
        label: "yarn",
        command: "yarn",
        args: &["install"],
        version_args: &["-v"],
    },
    Installer {
        label: "bun",
        command: "bun",
        args: &["install"],
        version_args: &["-v"],
    },
];

/// Fallback when no probe answers: the most universally available one.
const DEFAULT_INSTALLER_LABEL: &str = "npm";

fn find_known(label: &str) -> Option<&'static Installer> {
    KNOWN_INSTALLERS.iter().find(|i| i.label == label)
}

/// Resolve which installer to use.
///
/// An explicit override must exist in the catalog and answer its version
/// probe, otherwise the run fails. Auto-detection probes strictly
/// sequentially and falls back to npm without failing.
pub async fn resolve(override_label: Option<&str>) -> Result<&'static Installer, CliExit> {
    if let Some(raw) = override_label {
        let key = raw.trim().to_lowercase();
        let Some(installer) = find_known(&key) else {
            let labels: Vec<&str> = KNOWN_INSTALLERS.iter().map(|i| i.label).collect();
            return fail(format!(
                "Unknown package manager: {raw}. Use one of: {}",
                labels.join(", ")
            ));
        };

        let probe = run(
            installer.command,
            installer.version_args,
            RunOptions::new(StdioMode::Pipe),
        )
        .await;
        if !probe.success() {
            return fail(format!("Package manager not found: {}", installer.command));
        }
        return Ok(installer);
    }

    for installer in &KNOWN_INSTALLERS {
        let probe = run(
            installer.command,
            installer.version_args,
            RunOptions::new(StdioMode::Pipe),
        )
        .await;
        if probe.success() {
            return Ok(installer);
        }
    }

    Ok(find_known(DEFAULT_INSTALLER_LABEL).expect("default installer is in the catalog"))
}

/// Human-readable install command for the dry-run plan. `pi`/`ni` are their
/// own install command, the rest install via `<pm> install`; no override
/// means detection happens at install time.
pub fn format_install_command(pm: Option<&str>) -> String {
    let key = pm.unwrap_or("").trim().to_lowercase();
    if key.is_empty() {
        return "<auto-detect>".to_string();
    }

    match find_known(&key) {
        Some(installer) if installer.args.is_empty() => installer.label.to_string(),
        Some(installer) => format!("{} {}", installer.command, installer.args.join(" ")),
        None => pm.unwrap_or("<auto-detect>").to_string(),
    }
}
