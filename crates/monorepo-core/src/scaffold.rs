//! Scaffolding pipeline: sequences npm, generator, and template-store calls
//!
//! A linear pipeline with per-step branches. Each step awaits the previous
//! one because later commands assume the earlier ones are committed on disk
//! (script registration needs the package directory to exist). Any failure
//! propagates up and aborts the run; filesystem changes already made are
//! left in place for the user to inspect.

use crate::manifest::{ManifestEditor, ScriptEntry};
use crate::readme;
use crate::runtime::prereq::BinaryPrereq;
use crate::runtime::process;
use crate::selection::{BackendKind, FrontendKind, Selection, WorkspaceLayout};
use crate::templates::TemplateFetcher;
use anyhow::{Context, Result};
use colored::Colorize;
use tokio::fs;

/// Scope for the generated design-tokens package
const TOKENS_SCOPE: &str = "@fsg";
/// Package names for the generated sub-packages
const TOKENS_PACKAGE: &str = "tokens";
const BACKEND_PACKAGE: &str = "backend";
const FRONTEND_PACKAGE: &str = "frontend";

/// Dev dependencies installed at root when tooling is requested
const TOOLING_PACKAGES: &[&str] = &[
    "eslint",
    "@eslint/js",
    "globals",
    "eslint-config-prettier",
    "prettier",
    "lefthook",
];

/// Config files always fetched from the template store
const BASE_CONFIG_FILES: &[&str] = &[".gitignore", ".npmignore", ".editorconfig", ".gitattributes"];
/// Git-hook config, fetched only when tooling is requested
const GITHOOK_CONFIG_FILE: &str = "lefthook.yml";
/// Formatter/linter configs fetched during the tooling step
const TOOLING_CONFIG_FILES: &[&str] = &[".prettierrc.json", ".prettierignore", "eslint.config.js"];

const DJANGO_SCRIPTS: &[(&str, &str)] = &[
    ("boot:startproject", "django-admin startproject project ."),
    ("boot:startapp", "python manage.py startapp api"),
    (
        "prepare",
        "if [ ! -d \"project\" ]; then npm run boot:startproject && npm run boot:startapp; fi",
    ),
    ("migrate", "python manage.py migrate"),
    ("migrations", "python manage.py makemigrations"),
    ("dev", "python manage.py runserver 8001"),
    ("stop", "pkill -f 'manage.py runserver 8001'"),
    ("start", "npm run stop > /dev/null 2>&1 ; npm run migrate && npm run dev"),
];

const LARAVEL_SCRIPTS: &[(&str, &str)] = &[
    ("boot:startapp", "composer create-project laravel/laravel api"),
    ("prepare", "if [ ! -d \"api\" ]; then npm run boot:startapp ; fi"),
    ("stop", "lsof -t -i tcp:8001 | xargs kill -9"),
    (
        "start",
        "npm run stop > /dev/null 2>&1 ; cd api && php artisan serve --port=8001",
    ),
];

/// Static script set per backend kind.
///
/// `None` marks a kind whose package is populated by its generator and has
/// no declarative script set yet; the orchestrator emits a diagnostic and
/// leaves the package unconfigured.
pub fn backend_script_set(kind: BackendKind) -> Option<&'static [(&'static str, &'static str)]> {
    match kind {
        BackendKind::Django => Some(DJANGO_SCRIPTS),
        BackendKind::Laravel => Some(LARAVEL_SCRIPTS),
        BackendKind::Fastify => None,
    }
}

/// Script entries for a backend kind with the package name substituted into
/// every entry
pub fn backend_script_entries(kind: BackendKind, package: &str) -> Option<Vec<ScriptEntry>> {
    backend_script_set(kind).map(|set| {
        set.iter()
            .map(|(name, cmd)| ScriptEntry::scoped(*name, *cmd, package))
            .collect()
    })
}

/// Generator command for kinds that bootstrap through an external generator
/// rather than declarative scripts
pub fn backend_generator(kind: BackendKind) -> Option<String> {
    match kind {
        BackendKind::Fastify => Some(format!(
            "npm exec -w {} -- fastify-cli generate . --esm",
            BACKEND_PACKAGE
        )),
        BackendKind::Laravel | BackendKind::Django => None,
    }
}

/// External binary a backend kind needs before scaffolding can proceed
pub fn backend_prereq(kind: BackendKind) -> Option<BinaryPrereq> {
    match kind {
        BackendKind::Laravel => Some(BinaryPrereq {
            binary: "composer",
            display_name: "Composer",
            remedy: "Please install PHP and Composer to use Laravel.",
            docs_url: "https://laravel.com/docs/installation",
        }),
        BackendKind::Django => Some(BinaryPrereq {
            binary: "django-admin",
            display_name: "Django",
            remedy: "Please install Python and Django to proceed.",
            docs_url: "https://docs.djangoproject.com/en/stable/topics/install/",
        }),
        // fetched on demand through npm exec
        BackendKind::Fastify => None,
    }
}

/// Create the root manifest: private module-type package with one workspace
/// glob and one directory per layout entry. Failure here is fatal for the
/// whole run.
pub async fn create_root_manifest(layout: &WorkspaceLayout) -> Result<()> {
    let editor = ManifestEditor;

    editor.init_package(None, None).await?;
    editor
        .delete_fields(&["scripts.test", "keywords", "main"], None)
        .await?;
    editor.set_field("type", "module", false, None).await?;
    editor.set_field("private", "true", true, None).await?;

    for (index, dir) in layout.dirs().iter().enumerate() {
        editor
            .set_field(&format!("workspaces[{}]", index), &format!("{}/*", dir), false, None)
            .await?;
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create workspace directory `{}`", dir))?;
    }

    Ok(())
}

/// Scaffold the scoped design-tokens package under the secondary workspace
/// and register its build scripts.
pub async fn init_tokens(secondary: &str) -> Result<()> {
    let editor = ManifestEditor;
    let scoped_name = format!("{}/{}", TOKENS_SCOPE, TOKENS_PACKAGE);

    editor
        .init_package(
            Some(&format!("{}/{}", secondary, TOKENS_PACKAGE)),
            Some(TOKENS_SCOPE),
        )
        .await?;
    process::run(
        "npm",
        &["install", "-D", "style-dictionary", "-w", &scoped_name],
    )
    .await?;
    process::run(
        "npm",
        &["exec", "style-dictionary", "init", "basic", "-w", &scoped_name],
    )
    .await?;
    editor
        .delete_fields(&["scripts.test", "main", "keywords"], Some(&scoped_name))
        .await?;

    editor
        .set_script(&ScriptEntry::scoped(
            "build",
            "style-dictionary build",
            &scoped_name,
        ))
        .await?;
    editor
        .set_script(&ScriptEntry::new(
            format!("build:{}", TOKENS_PACKAGE),
            format!("npm run build -w {}", scoped_name),
        ))
        .await?;

    Ok(())
}

/// Drop a placeholder into an otherwise empty workspace directory so the
/// package manager does not prune it.
pub async fn keep_workspace_dir(dir: &str) -> Result<()> {
    fs::write(format!("{}/.gitkeep", dir), "")
        .await
        .with_context(|| format!("failed to write {}/.gitkeep", dir))?;
    Ok(())
}

/// Scaffold the backend sub-package under the main workspace.
///
/// A kind without a script set still gets its package directory; the gap is
/// reported as a diagnostic, never an error.
pub async fn init_backend_of_choice(main: &str, kind: BackendKind) -> Result<()> {
    let editor = ManifestEditor;

    editor
        .init_package(Some(&format!("{}/{}", main, BACKEND_PACKAGE)), None)
        .await?;
    editor
        .delete_fields(&["scripts.test", "main", "keywords"], Some(BACKEND_PACKAGE))
        .await?;
    editor
        .set_field("type", "module", false, Some(BACKEND_PACKAGE))
        .await?;

    if let Some(generator) = backend_generator(kind) {
        process::run_shell(&generator).await?;
    }

    match backend_script_entries(kind, BACKEND_PACKAGE) {
        Some(entries) => {
            for entry in &entries {
                editor.set_script(entry).await?;
            }
        }
        None => {
            eprintln!(
                "{} no script set defined for `{}`; leaving the {} package unconfigured",
                "Warning:".yellow(),
                kind,
                BACKEND_PACKAGE
            );
        }
    }

    editor
        .set_script(&ScriptEntry::new(
            format!("start:{}", BACKEND_PACKAGE),
            format!("npm start -w {}", BACKEND_PACKAGE),
        ))
        .await?;

    Ok(())
}

/// Scaffold the frontend sub-package with the Vite generator and register
/// its root start alias.
pub async fn init_frontend_of_choice(main: &str, kind: FrontendKind) -> Result<()> {
    process::run_shell(&format!(
        "cd {} && npm create vite@latest {} -- --template {}",
        main,
        FRONTEND_PACKAGE,
        kind.template()
    ))
    .await?;

    ManifestEditor
        .set_script(&ScriptEntry::new(
            format!("start:{}", FRONTEND_PACKAGE),
            format!("npm run dev -w {}", FRONTEND_PACKAGE),
        ))
        .await?;

    Ok(())
}

/// jsdom + testing-library, needed by the React templates' test setup
pub async fn install_dom_testing_shim() -> Result<()> {
    process::run(
        "npm",
        &[
            "install",
            "-w",
            FRONTEND_PACKAGE,
            "-D",
            "jsdom",
            "@testing-library/react",
        ],
    )
    .await?;
    Ok(())
}

/// Fetch the baseline config files, plus the git-hook config when tooling is
/// requested. The files are cosmetic, so a failed fetch is logged and the
/// run continues.
pub async fn fetch_config_files(fetcher: &TemplateFetcher, tooling: bool) {
    let mut files: Vec<&str> = BASE_CONFIG_FILES.to_vec();
    if tooling {
        files.push(GITHOOK_CONFIG_FILE);
    }

    if let Err(error) = fetcher.fetch(&files).await {
        eprintln!(
            "{} could not fetch config templates: {}",
            "Warning:".yellow(),
            error
        );
    }
}

/// One unconditional root install, resolving every workspace dependency
/// declared by the earlier steps.
pub async fn install_dependencies() -> Result<()> {
    process::run("npm", &["install"]).await?;
    Ok(())
}

/// Root `start` script: the enabled sub-start scripts joined so both dev
/// servers run concurrently. `None` when neither exists.
pub fn compose_start_script(selection: &Selection) -> Option<String> {
    let mut parts = Vec::new();
    if selection.backend.is_some() {
        parts.push(format!("npm run start:{}", BACKEND_PACKAGE));
    }
    if selection.frontend.is_some() {
        parts.push(format!("npm run start:{}", FRONTEND_PACKAGE));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" & "))
    }
}

/// Write the composed root `start` script, if any sub-start script exists
pub async fn write_start_script(selection: &Selection) -> Result<()> {
    if let Some(cmd) = compose_start_script(selection) {
        ManifestEditor
            .set_script(&ScriptEntry::new("start", cmd))
            .await?;
    }
    Ok(())
}

/// Install the lint/format dev dependencies, their config files, and the
/// four root tooling scripts.
pub async fn install_tooling(fetcher: &TemplateFetcher) -> Result<()> {
    let mut args = vec!["install", "-D"];
    args.extend(TOOLING_PACKAGES);
    process::run("npm", &args).await?;

    if let Err(error) = fetcher.fetch(TOOLING_CONFIG_FILES).await {
        eprintln!(
            "{} could not fetch tooling config templates: {}",
            "Warning:".yellow(),
            error
        );
    }

    let editor = ManifestEditor;
    let tooling_scripts = [
        ("lint", "eslint . --fix"),
        ("normalize", "prettier --write '**/*.{js,ts,cjs,mjs,jsx,tsx}'"),
        ("check", "npm run normalize && npm run lint"),
        ("setup:githooks", "lefthook install"),
    ];
    for (name, cmd) in tooling_scripts {
        editor.set_script(&ScriptEntry::new(name, cmd)).await?;
    }

    Ok(())
}

/// Compose the project README and write it to the project root
pub async fn write_readme(title: &str, layout: &WorkspaceLayout, selection: &Selection) -> Result<()> {
    let sections = readme::project_sections(layout, selection);
    fs::write("README.md", readme::compose(title, &sections))
        .await
        .context("failed to write README.md")?;
    Ok(())
}

/// The shell command chain the user should run next
pub fn next_command(project_dir: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(dir) = project_dir {
        parts.push(format!("cd {}", dir));
    }
    parts.push("npm start".to_string());
    parts.join(" && ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_django_script_entries_substitute_package() {
        let entries = backend_script_entries(BackendKind::Django, "backend").unwrap();
        assert_eq!(entries.len(), DJANGO_SCRIPTS.len());
        for (entry, (name, cmd)) in entries.iter().zip(DJANGO_SCRIPTS) {
            assert_eq!(entry.name, *name);
            assert_eq!(entry.cmd, *cmd);
            assert_eq!(entry.package_name.as_deref(), Some("backend"));
        }
    }

    #[test]
    fn test_laravel_script_entries_substitute_package() {
        let entries = backend_script_entries(BackendKind::Laravel, "api").unwrap();
        assert_eq!(entries.len(), LARAVEL_SCRIPTS.len());
        assert!(entries
            .iter()
            .all(|entry| entry.package_name.as_deref() == Some("api")));
    }

    #[test]
    fn test_fastify_has_no_script_set_but_a_generator() {
        assert!(backend_script_set(BackendKind::Fastify).is_none());
        assert!(backend_script_entries(BackendKind::Fastify, "backend").is_none());
        let generator = backend_generator(BackendKind::Fastify).unwrap();
        assert!(generator.contains("fastify-cli generate"));
        assert!(generator.contains("-w backend"));
    }

    #[test]
    fn test_scripted_kinds_have_no_generator() {
        assert!(backend_generator(BackendKind::Django).is_none());
        assert!(backend_generator(BackendKind::Laravel).is_none());
    }

    #[test]
    fn test_backend_prereqs() {
        assert_eq!(
            backend_prereq(BackendKind::Laravel).unwrap().binary,
            "composer"
        );
        assert_eq!(
            backend_prereq(BackendKind::Django).unwrap().binary,
            "django-admin"
        );
        assert!(backend_prereq(BackendKind::Fastify).is_none());
    }

    #[test]
    fn test_start_script_backend_only() {
        let selection = Selection {
            backend: Some(BackendKind::Django),
            ..Selection::default()
        };
        assert_eq!(
            compose_start_script(&selection).as_deref(),
            Some("npm run start:backend")
        );
    }

    #[test]
    fn test_start_script_both_enabled() {
        let selection = Selection {
            backend: Some(BackendKind::Laravel),
            frontend: Some(FrontendKind::Svelte),
            ..Selection::default()
        };
        assert_eq!(
            compose_start_script(&selection).as_deref(),
            Some("npm run start:backend & npm run start:frontend")
        );
    }

    #[test]
    fn test_start_script_neither_enabled() {
        assert_eq!(compose_start_script(&Selection::default()), None);
    }

    #[test]
    fn test_next_command() {
        assert_eq!(next_command(None), "npm start");
        assert_eq!(next_command(Some("my-app")), "cd my-app && npm start");
    }
}
