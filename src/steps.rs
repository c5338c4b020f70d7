//! Best-effort pipeline steps: manifest rename, editor launch, banner
//!
//! None of these may abort the run. Each reports a [`StepOutcome`] so the
//! orchestrator (and tests) can tell degradation apart from success without
//! conflating it with the hard-failure path.

use crate::process::{run, RunOptions, StdioMode};
use crate::project::to_package_name;
use anyhow::{Context, Result};
use std::path::Path;

/// Outcome of a step the pipeline tolerates failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    /// Nothing to do: a flag disabled the step, or there was no usable input.
    Skipped,
    /// Attempted and failed; the run continues.
    Degraded(String),
}

/// Rewrite the cloned project's `package.json` name to the normalized
/// project name. Templates are not required to ship a manifest, so a
/// missing or malformed file degrades instead of failing.
pub async fn update_package_name(project_dir: &Path, project_name: &str) -> StepOutcome {
    let Some(package_name) = to_package_name(project_name) else {
        return StepOutcome::Skipped;
    };

    match rewrite_manifest_name(&project_dir.join("package.json"), &package_name).await {
        Ok(()) => StepOutcome::Succeeded,
        Err(err) => StepOutcome::Degraded(format!("{err:#}")),
    }
}

async fn rewrite_manifest_name(manifest_path: &Path, package_name: &str) -> Result<()> {
    let raw = tokio::fs::read_to_string(manifest_path)
        .await
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;

    let mut manifest: serde_json::Value =
        serde_json::from_str(&raw).context("package.json is not valid JSON")?;
    let object = manifest
        .as_object_mut()
        .context("package.json is not a JSON object")?;
    object.insert(
        "name".to_string(),
        serde_json::Value::String(package_name.to_string()),
    );

    // Two-space indentation and a trailing newline, as npm writes it.
    let formatted = format!("{}\n", serde_json::to_string_pretty(&manifest)?);
    tokio::fs::write(manifest_path, formatted)
        .await
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(())
}

/// Launch VS Code on the project directory. A missing or failing `code`
/// binary is a notice, not an error.
pub async fn open_editor(project_dir: &Path) -> StepOutcome {
    let target = project_dir.display().to_string();
    let result = run("code", &[&target], RunOptions::new(StdioMode::Pipe)).await;
    if result.success() {
        StepOutcome::Succeeded
    } else {
        StepOutcome::Degraded("`code` not found, skipped opening VSCode".to_string())
    }
}

/// Render the goodbye banner with `gum`. Purely decorative; a missing tool
/// leaves no trace and never affects the exit code.
pub async fn render_banner() -> StepOutcome {
    let result = run(
        "gum",
        &[
            "style",
            "--foreground",
            "21",
            "--border-foreground",
            "57",
            "--border",
            "double",
            "--align",
            "center",
            "--width",
            "40",
            "--margin",
            "1 2",
            "--padding",
            "1 2",
            "Enjoy Coding!",
        ],
        RunOptions::new(StdioMode::Inherit),
    )
    .await;

    if result.success() {
        StepOutcome::Succeeded
    } else {
        StepOutcome::Degraded(format!("gum exited with code {}", result.exit_code))
    }
}
