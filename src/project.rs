//! Project naming and the directory plan

use std::path::{Component, Path, PathBuf};

/// True for the only root-dir forms this tool accepts: `.`, `./...`
/// or `../...`. Absolute and drive-qualified paths are rejected upstream
/// with a message suggesting the relative form.
pub fn is_relative_path(value: &str) -> bool {
    value == "." || value.starts_with("./") || value.starts_with("../")
}

/// Validate a project name for use as a directory under the base dir.
/// Returns the message to show the user on violation.
pub fn validate_project_name(value: &str) -> Result<(), String> {
    let name = value.trim();
    if name.is_empty() {
        return Err("Please enter a name.".to_string());
    }
    if name == "." || name == ".." {
        return Err("Project name cannot be . or ..".to_string());
    }
    if name.contains('/') || name.contains('\\') {
        return Err("Project name cannot contain path separators.".to_string());
    }
    Ok(())
}

fn is_package_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_' | '~')
}

/// Map an arbitrary project name to a valid package.json name.
///
/// Trims, lowercases, turns whitespace runs and disallowed characters into
/// hyphens, collapses hyphen runs, and strips leading/trailing `.`/`_`/`-`.
/// Returns `None` when nothing usable remains; callers skip the rename
/// instead of writing an invalid value. Idempotent.
pub fn to_package_name(project_name: &str) -> Option<String> {
    let mut normalized = String::new();
    for c in project_name.trim().to_lowercase().chars() {
        let mapped = if c.is_whitespace() || !is_package_name_char(c) {
            '-'
        } else {
            c
        };
        if mapped == '-' && normalized.ends_with('-') {
            continue;
        }
        normalized.push(mapped);
    }

    let normalized = normalized
        .trim_start_matches(&['.', '_', '-'][..])
        .trim_end_matches(&['.', '_', '-'][..]);

    let mut chars = normalized.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphanumeric() {
        return None;
    }
    if !chars.all(is_package_name_char) {
        return None;
    }

    Some(normalized.to_string())
}

/// Where one project will be created. Resolved once from validated inputs
/// and read-only afterward; each run owns its plan exclusively.
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    pub template_id: String,
    pub project_name: String,
    /// Relative root requested by the user; empty means the current directory.
    pub root_dir: String,
    pub base_dir: PathBuf,
    pub project_dir: PathBuf,
}

impl ProjectPlan {
    /// Resolve the directory layout against `cwd` without touching the
    /// filesystem, so dry runs work for paths that do not exist yet.
    pub fn new(template_id: &str, project_name: &str, root_dir: &str, cwd: &Path) -> Self {
        let base_dir = if root_dir.is_empty() {
            cwd.to_path_buf()
        } else {
            resolve_lexically(cwd, root_dir)
        };
        let project_dir = resolve_lexically(&base_dir, project_name);

        Self {
            template_id: template_id.to_string(),
            project_name: project_name.to_string(),
            root_dir: root_dir.to_string(),
            base_dir,
            project_dir,
        }
    }
}

/// Join `relative` onto `base`, folding `.` and `..` components lexically.
fn resolve_lexically(base: &Path, relative: &str) -> PathBuf {
    let mut resolved = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}
