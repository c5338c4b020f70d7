//! CLI surface and flag normalization

use crate::project::is_relative_path;
use clap::Parser;

/// Raw command line as clap sees it. `[NAME]` and `[PATH]` are accepted in
/// either order; a token equal to `.` or starting with `./`/`../` is the
/// path regardless of position.
#[derive(Parser, Debug)]
#[command(name = "starter")]
#[command(about = "Scaffold a new project from a remote starter template")]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Project name, or the relative directory to create in
    #[arg(value_name = "NAME")]
    pub arg1: Option<String>,

    /// Relative directory to create in, or the project name
    #[arg(value_name = "PATH")]
    pub arg2: Option<String>,

    /// Template id (e.g. vitesse, starter-ts)
    #[arg(short = 't', long = "template", value_name = "ID")]
    pub template: Option<String>,

    /// Relative directory to create in (e.g. ./projects)
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub path: Option<String>,

    /// Package manager (pi|ni|pnpm|npm|yarn|bun)
    #[arg(long = "pm", visible_alias = "package-manager", value_name = "NAME")]
    pub package_manager: Option<String>,

    /// Print template ids and exit
    #[arg(short = 'l', long = "list-templates")]
    pub list_templates: bool,

    /// Print version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Output JSON (for list/version/dry-run)
    #[arg(long = "json")]
    pub json: bool,

    /// Pass --force to degit
    #[arg(long = "force")]
    pub force: bool,

    /// Print the plan, do nothing
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip installing dependencies
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Skip opening VSCode
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Skip the gum banner
    #[arg(long = "no-gum")]
    pub no_gum: bool,

    /// Do not clear the screen
    #[arg(long = "no-clear")]
    pub no_clear: bool,

    /// Do not update package.json name
    #[arg(long = "no-update-name")]
    pub no_update_name: bool,
}

/// The validated, immutable option set driving one scaffolding run.
/// Built once from argv; at most one of version/list-templates drives an
/// early exit (help never reaches this type), all other flags compose.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub list_templates: bool,
    pub version: bool,
    pub json: bool,
    pub force: bool,
    pub package_manager: Option<String>,
    pub template: Option<String>,
    pub name: Option<String>,
    pub root_dir: Option<String>,
    pub no_install: bool,
    pub no_open: bool,
    pub no_gum: bool,
    pub no_clear: bool,
    pub dry_run: bool,
    pub no_update_name: bool,
}

impl From<Args> for Flags {
    fn from(args: Args) -> Self {
        let looks_relative =
            |value: &Option<String>| value.as_deref().is_some_and(is_relative_path);

        let root_from_positional = if looks_relative(&args.arg1) {
            args.arg1.clone()
        } else if looks_relative(&args.arg2) {
            args.arg2.clone()
        } else {
            None
        };
        let name_from_positional = if !looks_relative(&args.arg1) {
            args.arg1
        } else if !looks_relative(&args.arg2) {
            args.arg2
        } else {
            None
        };

        Flags {
            list_templates: args.list_templates,
            version: args.version,
            json: args.json,
            force: args.force,
            package_manager: args.package_manager,
            template: args.template,
            name: name_from_positional,
            root_dir: args.path.or(root_from_positional),
            no_install: args.no_install,
            no_open: args.no_open,
            no_gum: args.no_gum,
            no_clear: args.no_clear,
            dry_run: args.dry_run,
            no_update_name: args.no_update_name,
        }
    }
}

/// Parse an argv slice (without the program name) into [`Flags`].
/// clap renders `--help` itself; the `Err` carries that output.
pub fn parse(argv: &[String]) -> Result<Flags, clap::Error> {
    let args = Args::try_parse_from(
        std::iter::once("starter".to_string()).chain(argv.iter().cloned()),
    )?;
    Ok(Flags::from(args))
}
