//! Async execution of package manager and generator commands

use std::process::{Output, Stdio};
use thiserror::Error;
use tokio::process::Command;

/// Captured output of a process that exited with status 0
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Failure modes for a spawned process
#[derive(Debug, Error)]
pub enum ProcessFailure {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}: {stderr}")]
    Exit {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Run a command with arguments, buffering stdout and stderr.
///
/// Single attempt, no timeout; the spawned process inherits the caller's
/// environment and working directory.
pub async fn run(command: &str, args: &[&str]) -> Result<ProcessOutput, ProcessFailure> {
    let output = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ProcessFailure::Spawn {
            command: command.to_string(),
            source,
        })?;

    finish(format!("{} {}", command, args.join(" ")), output)
}

/// Run a full command line through the shell.
///
/// Needed for commands that rely on shell features (`cd` chaining, `&&`,
/// redirection).
pub async fn run_shell(command_line: &str) -> Result<ProcessOutput, ProcessFailure> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command_line)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ProcessFailure::Spawn {
            command: command_line.to_string(),
            source,
        })?;

    finish(command_line.to_string(), output)
}

fn finish(command: String, output: Output) -> Result<ProcessOutput, ProcessFailure> {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if output.status.success() {
        Ok(ProcessOutput { stdout, stderr })
    } else {
        Err(ProcessFailure::Exit {
            command,
            code: output.status.code().unwrap_or(-1),
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let output = run("sh", &["-c", "printf hello"]).await.unwrap();
        assert_eq!(output.stdout, "hello");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_is_failure() {
        let err = run("sh", &["-c", "echo oops >&2; exit 3"])
            .await
            .unwrap_err();
        match err {
            ProcessFailure::Exit { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert!(stderr.contains("oops"));
            }
            other => panic!("expected Exit failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_missing_binary_is_spawn_failure() {
        let err = run("definitely-not-a-real-binary-xyz", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessFailure::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_run_shell_supports_chaining() {
        let output = run_shell("printf a && printf b").await.unwrap();
        assert_eq!(output.stdout, "ab");
    }
}
