//! The scaffolding pipeline
//!
//! A linear state machine: route early exits, validate inputs, preview or
//! execute. Execution sequences directory creation, template cloning,
//! manifest rewriting, editor launch and dependency installation; a dry run
//! computes the identical plan without side effects. Steps never overlap,
//! and a required step's failure stops the pipeline at once.

use crate::cli::Flags;
use crate::error::{fail, CliExit};
use crate::installer;
use crate::process::{run, run_npx, RunOptions, StdioMode};
use crate::project::{is_relative_path, to_package_name, validate_project_name, ProjectPlan};
use crate::prompts::{self, Answers};
use crate::steps::{self, StepOutcome};
use crate::templates::{self, TEMPLATE_OWNER};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

/// Crate version surfaced by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The plan document emitted by `--dry-run --json`. Skipped steps are
/// explicit nulls so consumers can distinguish "skipped" from "absent".
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DryRunPlan {
    base_dir: String,
    project_dir: String,
    template: String,
    project_name: String,
    clone_command: String,
    package_name: Option<String>,
    vscode: Option<String>,
    install: Option<String>,
}

/// Drive one scaffolding run from validated flags.
pub async fn run_pipeline(flags: Flags) -> Result<(), CliExit> {
    if flags.version {
        if flags.json {
            println!("{}", serde_json::json!({ "version": VERSION }));
        } else {
            println!("{VERSION}");
        }
        return Ok(());
    }

    if flags.list_templates {
        if flags.json {
            println!("{}", templates::render_list_json());
        } else {
            println!("{}", templates::render_list());
        }
        return Ok(());
    }

    let cwd = std::env::current_dir()
        .map_err(|err| CliExit::new(format!("Failed to resolve current directory: {err}"), 1))?;

    // Machine-readable preview short-circuits before any terminal styling.
    if flags.dry_run && flags.json {
        return json_dry_run(&flags, &cwd);
    }

    if console::Term::stdout().is_term() && !flags.no_clear {
        let _ = console::Term::stdout().clear_screen();
    }

    if let Some(root_dir) = &flags.root_dir {
        if !is_relative_path(root_dir) {
            return fail(format!(
                "Invalid path: {root_dir}. Please use a relative path like ./projects"
            ));
        }
    }
    if let Some(name) = &flags.name {
        if let Err(message) = validate_project_name(name) {
            return fail(message);
        }
    }

    cliclack::intro(" starter-cli ".black().on_cyan())?;

    if let Some(template_id) = &flags.template {
        if templates::find(template_id).is_none() {
            return fail(format!("Unknown template: {template_id}"));
        }
    }

    let answers = match (&flags.template, &flags.name) {
        (Some(template_id), Some(name)) => Answers {
            root_dir: flags.root_dir.clone().unwrap_or_default(),
            template_id: template_id.clone(),
            project_name: name.clone(),
        },
        _ => prompts::collect(&flags)?,
    };

    cliclack::note(
        format!("Clone {}", answers.template_id),
        format!("cloning {} to {}", answers.template_id, answers.project_name),
    )?;

    let plan = ProjectPlan::new(
        &answers.template_id,
        &answers.project_name,
        &answers.root_dir,
        &cwd,
    );

    if plan.project_dir.exists() && !flags.force {
        return fail(format!(
            "Target directory already exists: {}. Use --force to let degit overwrite it.",
            plan.project_dir.display()
        ));
    }

    if flags.dry_run {
        return text_dry_run(&flags, &plan);
    }

    if !plan.root_dir.is_empty() {
        let spinner = cliclack::spinner();
        spinner.start("Creating the Directory");
        let created = tokio::fs::create_dir_all(&plan.base_dir).await;
        spinner.stop("Creating the Directory");
        if let Err(err) = created {
            return fail(err.to_string());
        }
    }

    let spinner = cliclack::spinner();
    spinner.start("Starting Clone");
    let slug = format!("{TEMPLATE_OWNER}/{}", plan.template_id);
    let mut clone_args: Vec<&str> = vec!["degit"];
    if flags.force {
        clone_args.push("--force");
    }
    clone_args.push(&slug);
    clone_args.push(&plan.project_name);
    let clone = run_npx(
        &clone_args,
        RunOptions::new(StdioMode::Tee).in_dir(&plan.base_dir),
    )
    .await;
    spinner.stop("Starting Clone");
    if !clone.success() {
        let message = if clone.stderr.is_empty() {
            format!("Clone failed with exit code {}", clone.exit_code)
        } else {
            clone.stderr
        };
        return fail(message);
    }

    if !flags.no_update_name {
        steps::update_package_name(&plan.project_dir, &plan.project_name).await;
    }

    if flags.no_open {
        cliclack::note("VSCode", "Skipped by --no-open")?;
    } else {
        let spinner = cliclack::spinner();
        spinner.start("Opening in VSCode");
        if let StepOutcome::Degraded(reason) = steps::open_editor(&plan.project_dir).await {
            cliclack::note("VSCode", reason)?;
        }
        spinner.stop("Opening in VSCode");
    }

    if flags.no_install {
        cliclack::note("Install", "Skipped by --no-install")?;
    } else {
        let selected = installer::resolve(flags.package_manager.as_deref()).await?;
        let spinner = cliclack::spinner();
        spinner.start("Installing dependencies");
        let cd_target = if plan.root_dir.is_empty() {
            plan.project_name.clone()
        } else {
            format!("{}/{}", plan.root_dir, plan.project_name)
        };
        cliclack::note("Install", format!("cd {cd_target} && {}", selected.label))?;
        let install = run(
            selected.command,
            selected.args,
            RunOptions::new(StdioMode::Tee).in_dir(&plan.project_dir),
        )
        .await;
        spinner.stop("Installing dependencies");
        if !install.success() {
            return fail(format!(
                "Install failed with exit code {}",
                install.exit_code
            ));
        }
    }

    cliclack::outro(format!(
        "Project {} created successfully!",
        plan.project_name
    ))?;

    if !flags.no_gum {
        steps::render_banner().await;
    }

    Ok(())
}

/// `--dry-run --json`: requires template and name non-interactively and
/// emits the full plan, or a `{"error": …}` document, as a single line.
fn json_dry_run(flags: &Flags, cwd: &Path) -> Result<(), CliExit> {
    let Some(project_name) = flags.name.as_deref() else {
        return Err(emit_json_error("Missing project name."));
    };
    let Some(template_id) = flags.template.as_deref() else {
        return Err(emit_json_error("Missing --template."));
    };
    if templates::find(template_id).is_none() {
        return Err(emit_json_error(&format!("Unknown template: {template_id}")));
    }
    if let Some(root_dir) = flags.root_dir.as_deref() {
        if !is_relative_path(root_dir) {
            return Err(emit_json_error(&format!(
                "Invalid path: {root_dir}. Please use a relative path like ./projects"
            )));
        }
    }
    if let Err(message) = validate_project_name(project_name) {
        return Err(emit_json_error(&message));
    }

    let root_dir = flags.root_dir.clone().unwrap_or_default();
    let plan = ProjectPlan::new(template_id, project_name, &root_dir, cwd);
    let document = dry_run_plan(flags, &plan);
    let rendered =
        serde_json::to_string(&document).map_err(|err| CliExit::new(err.to_string(), 1))?;
    println!("{rendered}");
    Ok(())
}

fn emit_json_error(message: &str) -> CliExit {
    println!("{}", serde_json::json!({ "error": message }));
    CliExit::already_shown(message, 1)
}

/// The plain dry run: identical plan fields, rendered as notes.
fn text_dry_run(flags: &Flags, plan: &ProjectPlan) -> Result<(), CliExit> {
    let install_command = installer::format_install_command(flags.package_manager.as_deref());
    let package_name =
        to_package_name(&plan.project_name).unwrap_or_else(|| "(skipped)".to_string());

    cliclack::note("Base Dir", plan.base_dir.display())?;
    cliclack::note("Project Dir", plan.project_dir.display())?;
    cliclack::note(
        "Clone",
        clone_command_text(flags.force, &plan.template_id, &plan.project_name),
    )?;
    if !flags.no_update_name {
        cliclack::note("Package", format!("package.json name -> {package_name}"))?;
    }
    if !flags.no_open {
        cliclack::note("VSCode", format!("code {}", plan.project_dir.display()))?;
    }
    if !flags.no_install {
        cliclack::note(
            "Install",
            format!("cd {} && {install_command}", plan.project_dir.display()),
        )?;
    }
    cliclack::outro("Dry run complete.")?;
    Ok(())
}

fn dry_run_plan(flags: &Flags, plan: &ProjectPlan) -> DryRunPlan {
    let install_command = installer::format_install_command(flags.package_manager.as_deref());
    DryRunPlan {
        base_dir: plan.base_dir.display().to_string(),
        project_dir: plan.project_dir.display().to_string(),
        template: plan.template_id.clone(),
        project_name: plan.project_name.clone(),
        clone_command: clone_command_text(flags.force, &plan.template_id, &plan.project_name),
        package_name: if flags.no_update_name {
            None
        } else {
            to_package_name(&plan.project_name)
        },
        vscode: if flags.no_open {
            None
        } else {
            Some(format!("code {}", plan.project_dir.display()))
        },
        install: if flags.no_install {
            None
        } else {
            Some(format!(
                "cd {} && {install_command}",
                plan.project_dir.display()
            ))
        },
    }
}

/// The degit invocation as a copy-pastable line. Display only; the real
/// call goes through the structured argv runner, never a shell string.
fn clone_command_text(force: bool, template_id: &str, project_name: &str) -> String {
    let force_flag = if force { "--force " } else { "" };
    format!("npx degit {force_flag}{TEMPLATE_OWNER}/{template_id} {project_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dry_run_flags() -> Flags {
        Flags {
            name: Some("my-app".to_string()),
            template: Some("starter-ts".to_string()),
            dry_run: true,
            json: true,
            ..Flags::default()
        }
    }

    #[test]
    fn plan_document_includes_the_degit_clone_command() {
        let flags = dry_run_flags();
        let plan = ProjectPlan::new("starter-ts", "my-app", "", Path::new("/work"));
        let document = dry_run_plan(&flags, &plan);

        assert_eq!(document.template, "starter-ts");
        assert_eq!(document.project_name, "my-app");
        assert!(document.clone_command.contains("degit"));
        assert_eq!(document.package_name.as_deref(), Some("my-app"));
        assert_eq!(document.install.as_deref(), Some("cd /work/my-app && <auto-detect>"));
    }

    #[test]
    fn plan_document_uses_camel_case_keys() {
        let flags = dry_run_flags();
        let plan = ProjectPlan::new("starter-ts", "my-app", "./projects", Path::new("/work"));
        let value = serde_json::to_value(dry_run_plan(&flags, &plan)).unwrap();

        for key in [
            "baseDir",
            "projectDir",
            "template",
            "projectName",
            "cloneCommand",
            "packageName",
            "vscode",
            "install",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["baseDir"], "/work/projects");
        assert_eq!(value["projectDir"], "/work/projects/my-app");
    }

    #[test]
    fn skip_flags_null_out_their_steps() {
        let flags = Flags {
            no_install: true,
            no_open: true,
            no_update_name: true,
            ..dry_run_flags()
        };
        let plan = ProjectPlan::new("starter-ts", "my-app", "", Path::new("/work"));
        let document = dry_run_plan(&flags, &plan);

        assert_eq!(document.package_name, None);
        assert_eq!(document.vscode, None);
        assert_eq!(document.install, None);
    }

    #[test]
    fn force_is_forwarded_into_the_clone_command() {
        assert_eq!(
            clone_command_text(true, "starter-ts", "my-app"),
            format!("npx degit --force {TEMPLATE_OWNER}/starter-ts my-app")
        );
        assert_eq!(
            clone_command_text(false, "starter-ts", "my-app"),
            format!("npx degit {TEMPLATE_OWNER}/starter-ts my-app")
        );
    }

    #[test]
    fn package_manager_override_shapes_the_install_line() {
        let flags = Flags {
            package_manager: Some("pnpm".to_string()),
            ..dry_run_flags()
        };
        let plan = ProjectPlan::new("starter-ts", "my-app", "", Path::new("/work"));
        let document = dry_run_plan(&flags, &plan);
        assert_eq!(
            document.install.as_deref(),
            Some("cd /work/my-app && pnpm install")
        );
    }
}
