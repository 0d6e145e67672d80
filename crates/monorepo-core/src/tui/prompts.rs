//! Charm-style CLI prompts using cliclack

use crate::scaffold;
use crate::selection::{BackendKind, FrontendKind, Selection, WorkspaceLayout};
use crate::templates::{TemplateFetcher, CONFIG_GIST_ID};
use anyhow::Result;
use colored::Colorize;
use tokio::fs;

/// CLI arguments for a scaffolding run
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create and scaffold into (default: current dir)
    pub project: Option<String>,

    /// Backend kind ("laravel", "django", "fastify", "none")
    pub backend: Option<String>,

    /// Frontend kind (a Vite template name, or "none")
    pub frontend: Option<String>,

    /// Install lint/format tooling
    pub tooling: Option<bool>,

    /// Accept the default answer for every prompt (non-interactive mode)
    pub yes: bool,
}

/// Run the generator with interactive prompts.
///
/// Collects the full [`Selection`] up front, then drives the scaffold
/// pipeline; any step failure propagates out and aborts the run.
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("create-monorepo")?;

    let project_dir = enter_project_dir(&args).await?;
    let layout = select_layout(&args)?;

    let backend = select_backend(&args)?;
    if let Some(kind) = backend {
        check_backend_prerequisite(kind, args.yes)?;
    }
    let frontend = select_frontend(&args)?;
    let tokens_helper = confirm_tokens(&args)?;
    let tooling = confirm_tooling(&args)?;

    let selection = Selection {
        backend,
        frontend,
        tokens_helper,
        tooling,
    };

    run_pipeline(&layout, &selection, project_dir.as_deref()).await
}

/// Create the project directory (if one was named) and make it the working
/// directory for the rest of the run
async fn enter_project_dir(args: &CreateArgs) -> Result<Option<String>> {
    let Some(dir) = &args.project else {
        return Ok(None);
    };

    cliclack::log::info(format!(
        "Your project will be called {} - creating directory...",
        dir.as_str().cyan().bold()
    ))?;
    fs::create_dir_all(dir).await?;
    std::env::set_current_dir(dir)?;

    Ok(Some(dir.clone()))
}

fn select_layout(args: &CreateArgs) -> Result<WorkspaceLayout> {
    let default = WorkspaceLayout::default();
    if args.yes {
        return Ok(default);
    }

    cliclack::note("Workspace layout", default.preview_tree())?;
    let keep = cliclack::confirm(format!(
        "Default workspaces are `{}` and `{}` - are you fine with them?",
        default.main, default.secondary
    ))
    .initial_value(true)
    .interact()?;

    if keep {
        return Ok(default);
    }

    let main: String =
        cliclack::input("Name for the main workspace (e.g. \"apps\" or \"packages\")")
            .placeholder("apps")
            .interact()?;
    let secondary: String =
        cliclack::input("Name for the secondary workspace (e.g. \"libs\", \"utils\", \"helpers\")")
            .placeholder("helpers")
            .interact()?;

    let layout = WorkspaceLayout { main, secondary };
    cliclack::note("Project structure", layout.preview_tree())?;

    Ok(layout)
}

fn select_backend(args: &CreateArgs) -> Result<Option<BackendKind>> {
    if let Some(value) = &args.backend {
        if value.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        match value.parse::<BackendKind>() {
            Ok(kind) => {
                cliclack::log::info(format!("Backend: {}", kind))?;
                return Ok(Some(kind));
            }
            // fall back to the prompt
            Err(()) => cliclack::log::warning(format!("Unknown backend `{}`", value))?,
        }
    }

    if args.yes {
        return Ok(Some(BackendKind::Django));
    }

    let mut select = cliclack::select("Choose your backend")
        .initial_value(Some(BackendKind::Django));
    for kind in BackendKind::ALL {
        select = select.item(Some(kind), kind.display_name(), "");
    }
    select = select.item(None, "none", "skip the backend package");

    Ok(select.interact()?)
}

fn select_frontend(args: &CreateArgs) -> Result<Option<FrontendKind>> {
    if let Some(value) = &args.frontend {
        if value.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        match value.parse::<FrontendKind>() {
            Ok(kind) => {
                cliclack::log::info(format!("Frontend: {}", kind))?;
                return Ok(Some(kind));
            }
            Err(()) => cliclack::log::warning(format!("Unknown frontend `{}`", value))?,
        }
    }

    if args.yes {
        return Ok(Some(FrontendKind::React));
    }

    let mut select = cliclack::select("Choose your frontend")
        .initial_value(Some(FrontendKind::React));
    for kind in FrontendKind::ALL {
        select = select.item(Some(kind), kind.template(), "");
    }
    select = select.item(None, "none", "skip the frontend package");

    Ok(select.interact()?)
}

fn confirm_tokens(args: &CreateArgs) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }
    Ok(
        cliclack::confirm("Do you want light design-tokens for helper modules?")
            .initial_value(true)
            .interact()?,
    )
}

fn confirm_tooling(args: &CreateArgs) -> Result<bool> {
    if let Some(tooling) = args.tooling {
        return Ok(tooling);
    }
    if args.yes {
        return Ok(true);
    }
    Ok(cliclack::confirm(
        "Do you want basic normalization tooling for linting and formatting (ESLint + Prettier)?",
    )
    .initial_value(true)
    .interact()?)
}

/// Probe for the backend's required binary; missing means the whole run
/// aborts, optionally after offering the installation docs
fn check_backend_prerequisite(kind: BackendKind, yes: bool) -> Result<()> {
    let Some(prereq) = scaffold::backend_prereq(kind) else {
        return Ok(());
    };

    if prereq.is_installed() {
        let version = prereq.get_version().unwrap_or_else(|| "unknown".to_string());
        cliclack::log::success(format!("{} found ({})", prereq.display_name, version))?;
        return Ok(());
    }

    cliclack::log::error(prereq.remedy)?;

    if !yes {
        let open_docs = cliclack::confirm(format!(
            "Open the {} installation docs in your browser?",
            prereq.display_name
        ))
        .initial_value(false)
        .interact()?;
        if open_docs {
            prereq.open_docs()?;
        }
    }

    anyhow::bail!("missing required binary `{}` for {}", prereq.binary, kind)
}

/// The creation phase: steps run strictly in sequence because each command
/// assumes the previous one is committed on disk
async fn run_pipeline(
    layout: &WorkspaceLayout,
    selection: &Selection,
    project_dir: Option<&str>,
) -> Result<()> {
    let fetcher = TemplateFetcher::new(CONFIG_GIST_ID);

    let spinner = cliclack::spinner();
    spinner.start(format!(
        "Scaffolding main package.json - monorepo with {} + {} workspaces...",
        layout.main, layout.secondary
    ));
    scaffold::create_root_manifest(layout).await?;
    spinner.stop(format!(
        "Created main package.json with workspaces: {}, {}",
        layout.main, layout.secondary
    ));

    if selection.tokens_helper {
        let spinner = cliclack::spinner();
        spinner.start(format!(
            "Scaffolding tokens package inside the {} workspace...",
            layout.secondary
        ));
        scaffold::init_tokens(&layout.secondary).await?;
        spinner.stop("Created tokens library.");
    } else {
        scaffold::keep_workspace_dir(&layout.secondary).await?;
    }

    if let Some(kind) = selection.backend {
        let spinner = cliclack::spinner();
        spinner.start(format!(
            "Scaffolding {} app inside the {} workspace...",
            kind, layout.main
        ));
        scaffold::init_backend_of_choice(&layout.main, kind).await?;
        spinner.stop(format!("Created {} package.", kind));
    }

    if let Some(kind) = selection.frontend {
        let spinner = cliclack::spinner();
        spinner.start(format!(
            "Scaffolding {} frontend inside the {} workspace...",
            kind, layout.main
        ));
        scaffold::init_frontend_of_choice(&layout.main, kind).await?;
        if kind.needs_dom_shim() {
            scaffold::install_dom_testing_shim().await?;
        }
        spinner.stop(format!("Created {} frontend package (with Vite).", kind));
    }

    let spinner = cliclack::spinner();
    spinner.start("Setting general configuration files...");
    scaffold::fetch_config_files(&fetcher, selection.tooling).await;
    spinner.stop("Configuration files in place.");

    let spinner = cliclack::spinner();
    spinner.start("Installing dependencies...");
    scaffold::install_dependencies().await?;
    spinner.stop("Initialized project and installed dependencies.");

    scaffold::write_start_script(selection).await?;

    if selection.tooling {
        let spinner = cliclack::spinner();
        spinner.start("Installing linting and formatting tools...");
        scaffold::install_tooling(&fetcher).await?;
        spinner.stop("Tooling scripts and configuration in place.");
    }

    let spinner = cliclack::spinner();
    spinner.start("Creating main README file...");
    let title = readme_title(project_dir);
    scaffold::write_readme(&title, layout, selection).await?;
    spinner.stop("Created main README file.");

    let command = scaffold::next_command(project_dir);
    cliclack::log::info(format!("Now simply run {}", command.cyan().bold()))?;
    cliclack::outro("Happy development!")?;

    Ok(())
}

fn readme_title(project_dir: Option<&str>) -> String {
    project_dir.map(str::to_string).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "monorepo".to_string())
    })
}
