//! Idempotent edits to package manifests via `npm init` / `npm pkg`
//!
//! Every operation shells out to npm, which owns the JSON surgery; this
//! module only assembles the argument lists. `npm pkg set` overwrites on
//! re-set and `npm pkg delete` of an absent key exits 0, so all edits are
//! safe to repeat.

use crate::runtime::process::{self, ProcessFailure, ProcessOutput};

/// A single manifest script to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    pub name: String,
    pub cmd: String,
    /// Workspace package the script belongs to; `None` targets the root
    pub package_name: Option<String>,
}

impl ScriptEntry {
    pub fn new(name: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            package_name: None,
        }
    }

    pub fn scoped(
        name: impl Into<String>,
        cmd: impl Into<String>,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            package_name: Some(package_name.into()),
        }
    }
}

/// Editor for the manifests reachable from the current working directory.
///
/// Workspace-scoped edits go through npm's `-w` flag rather than touching
/// sub-package files directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestEditor;

impl ManifestEditor {
    /// Initialize a new package manifest (`npm init -y`), optionally as a
    /// workspace sub-package with a scope
    pub async fn init_package(
        &self,
        workspace_path: Option<&str>,
        scope: Option<&str>,
    ) -> Result<ProcessOutput, ProcessFailure> {
        run_npm(init_args(workspace_path, scope)).await
    }

    /// Set `scripts.<name>` to `<cmd>`, scoped to the entry's workspace
    /// package if present. Re-setting the same name overwrites.
    pub async fn set_script(&self, entry: &ScriptEntry) -> Result<ProcessOutput, ProcessFailure> {
        run_npm(set_script_args(entry)).await
    }

    /// Set an arbitrary manifest field. `json` makes npm parse the value as
    /// JSON (needed for booleans like `private=true`).
    pub async fn set_field(
        &self,
        key: &str,
        value: &str,
        json: bool,
        package_name: Option<&str>,
    ) -> Result<ProcessOutput, ProcessFailure> {
        run_npm(set_field_args(key, value, json, package_name)).await
    }

    /// Delete manifest fields. Absent keys are not an error.
    pub async fn delete_fields(
        &self,
        keys: &[&str],
        package_name: Option<&str>,
    ) -> Result<ProcessOutput, ProcessFailure> {
        run_npm(delete_args(keys, package_name)).await
    }
}

async fn run_npm(args: Vec<String>) -> Result<ProcessOutput, ProcessFailure> {
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    process::run("npm", &arg_refs).await
}

fn init_args(workspace_path: Option<&str>, scope: Option<&str>) -> Vec<String> {
    let mut args = vec!["init".to_string(), "-y".to_string()];
    if let Some(path) = workspace_path {
        args.push("-w".to_string());
        args.push(path.to_string());
    }
    if let Some(scope) = scope {
        args.push(format!("--scope={}", scope));
    }
    args
}

fn set_script_args(entry: &ScriptEntry) -> Vec<String> {
    let mut args = vec![
        "pkg".to_string(),
        "set".to_string(),
        format!("scripts.{}={}", entry.name, entry.cmd),
    ];
    if let Some(package) = &entry.package_name {
        args.push("-w".to_string());
        args.push(package.clone());
    }
    args
}

fn set_field_args(key: &str, value: &str, json: bool, package_name: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "pkg".to_string(),
        "set".to_string(),
        format!("{}={}", key, value),
    ];
    if json {
        args.push("--json".to_string());
    }
    if let Some(package) = package_name {
        args.push("-w".to_string());
        args.push(package.to_string());
    }
    args
}

fn delete_args(keys: &[&str], package_name: Option<&str>) -> Vec<String> {
    let mut args = vec!["pkg".to_string(), "delete".to_string()];
    args.extend(keys.iter().map(|key| key.to_string()));
    if let Some(package) = package_name {
        args.push("-w".to_string());
        args.push(package.to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_root() {
        assert_eq!(init_args(None, None), ["init", "-y"]);
    }

    #[test]
    fn test_init_args_scoped_workspace() {
        assert_eq!(
            init_args(Some("helpers/tokens"), Some("@fsg")),
            ["init", "-y", "-w", "helpers/tokens", "--scope=@fsg"]
        );
    }

    #[test]
    fn test_set_script_args_root() {
        let entry = ScriptEntry::new("start", "npm run dev");
        assert_eq!(
            set_script_args(&entry),
            ["pkg", "set", "scripts.start=npm run dev"]
        );
    }

    #[test]
    fn test_set_script_args_workspace_scoped() {
        let entry = ScriptEntry::scoped("build", "style-dictionary build", "@fsg/tokens");
        assert_eq!(
            set_script_args(&entry),
            [
                "pkg",
                "set",
                "scripts.build=style-dictionary build",
                "-w",
                "@fsg/tokens"
            ]
        );
    }

    #[test]
    fn test_set_field_args_json_mode() {
        assert_eq!(
            set_field_args("private", "true", true, None),
            ["pkg", "set", "private=true", "--json"]
        );
        assert_eq!(
            set_field_args("type", "module", false, Some("backend")),
            ["pkg", "set", "type=module", "-w", "backend"]
        );
    }

    #[test]
    fn test_delete_args() {
        assert_eq!(
            delete_args(&["scripts.test", "keywords", "main"], None),
            ["pkg", "delete", "scripts.test", "keywords", "main"]
        );
        assert_eq!(
            delete_args(&["main"], Some("backend")),
            ["pkg", "delete", "main", "-w", "backend"]
        );
    }
}
