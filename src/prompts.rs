//! Interactive collection of missing answers (cliclack prompts)

use crate::cli::Flags;
use crate::error::CliExit;
use crate::project::validate_project_name;
use crate::templates::TEMPLATES;

/// Everything the orchestrator needs beyond the flags.
#[derive(Debug, Clone)]
pub struct Answers {
    /// Relative root directory; empty means the current directory.
    pub root_dir: String,
    pub template_id: String,
    pub project_name: String,
}

/// A prompt that ended with Esc/Ctrl-C. Nothing has touched the filesystem
/// or network at this stage, so cancellation is a clean zero-exit abort.
fn cancelled() -> CliExit {
    let _ = cliclack::outro_cancel("Operation cancelled.");
    CliExit::already_shown("Operation cancelled.", 0)
}

/// Collect root dir, template and project name, reusing whatever the flags
/// already carry. Only reached when template and name were not both given.
pub fn collect(flags: &Flags) -> Result<Answers, CliExit> {
    let root_dir = match &flags.root_dir {
        Some(dir) => {
            cliclack::note("Path", dir)?;
            dir.clone()
        }
        None => {
            let under_current: &str = cliclack::select("Create project under current directory?")
                .item("yes", "yes", "under current directory")
                .item("no", "no", "choose other path")
                .initial_value("yes")
                .interact()
                .map_err(|_| cancelled())?;

            if under_current == "no" {
                let custom: String = cliclack::input("Where should we create your project?")
                    .placeholder("./my-new-project")
                    .validate(|input: &String| {
                        if input.is_empty() {
                            Err("Please enter a path.")
                        } else if !input.starts_with('.') {
                            Err("Please enter a relative path.")
                        } else {
                            Ok(())
                        }
                    })
                    .interact()
                    .map_err(|_| cancelled())?;
                custom
            } else {
                String::new()
            }
        }
    };

    let template_id: String = match &flags.template {
        Some(id) => id.clone(),
        None => {
            let mut select = cliclack::select("Select a template");
            for template in &TEMPLATES {
                select = select.item(template.value, template.label, template.hint.unwrap_or(""));
            }
            select.interact().map_err(|_| cancelled())?.to_string()
        }
    };

    let mut name_prompt = cliclack::input("What should we name your project?")
        .placeholder(&template_id)
        .validate(|input: &String| validate_project_name(input));
    if let Some(initial) = &flags.name {
        name_prompt = name_prompt.default_input(initial);
    }
    let project_name: String = name_prompt.interact().map_err(|_| cancelled())?;

    Ok(Answers {
        root_dir,
        template_id,
        project_name,
    })
}
