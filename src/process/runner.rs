//! Child process execution
//!
//! Every invocation yields a [`CommandResult`]; a missing executable is
//! reported as exit code 127 instead of an error, so callers can treat
//! "tool absent" as data rather than a failure to handle.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// Exit code reserved for "executable not found".
pub const NOT_FOUND_EXIT_CODE: i32 = 127;

/// How the child's stdio is wired up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdioMode {
    /// Child talks to the controlling terminal directly; nothing is captured.
    #[default]
    Inherit,
    /// Both output streams are captured into the result, nothing is forwarded.
    Pipe,
    /// Both output streams are captured and forwarded chunk-by-chunk as they
    /// arrive, preserving the original chunk text.
    Tee,
}

/// Options for a single [`run`] call.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub cwd: Option<PathBuf>,
    pub stdio: StdioMode,
}

impl RunOptions {
    pub fn new(stdio: StdioMode) -> Self {
        Self { cwd: None, stdio }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// Normalized outcome of one child process invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            exit_code: NOT_FOUND_EXIT_CODE,
            stdout: String::new(),
            stderr: message.into(),
        }
    }
}

/// Candidate binary names for `command`.
///
/// Windows resolves `npm` through `npm.cmd` and friends; a name that already
/// carries an extension is used verbatim, as is every name elsewhere.
fn candidates_for(command: &str, windows: bool) -> Vec<String> {
    if !windows || command.contains('.') {
        return vec![command.to_string()];
    }
    vec![
        command.to_string(),
        format!("{command}.cmd"),
        format!("{command}.exe"),
        format!("{command}.bat"),
    ]
}

/// Run `command args` and normalize the outcome.
///
/// Spawn-level errors (binary missing, permission denied) are folded into a
/// 127 result with the error text as stderr. A child killed by a signal
/// reports exit code 0, matching an unknown exit status.
pub async fn run(command: &str, args: &[&str], options: RunOptions) -> CommandResult {
    for candidate in candidates_for(command, cfg!(windows)) {
        let result = run_once(&candidate, args, &options).await;
        // On Windows a 127 only means "try the next extension".
        if !(cfg!(windows) && result.exit_code == NOT_FOUND_EXIT_CODE) {
            return result;
        }
    }
    CommandResult::not_found(format!("Command not found: {command}"))
}

async fn run_once(command: &str, args: &[&str], options: &RunOptions) -> CommandResult {
    let mut cmd = Command::new(command);
    cmd.args(args);
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    match options.stdio {
        StdioMode::Inherit => match cmd.status().await {
            Ok(status) => CommandResult {
                exit_code: status.code().unwrap_or(0),
                stdout: String::new(),
                stderr: String::new(),
            },
            Err(err) => CommandResult::not_found(err.to_string()),
        },
        StdioMode::Pipe | StdioMode::Tee => {
            let tee = options.stdio == StdioMode::Tee;
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());

            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(err) => return CommandResult::not_found(err.to_string()),
            };

            let stdout_pipe = child.stdout.take();
            let stderr_pipe = child.stderr.take();

            // Drain both streams to completion before producing the result.
            // Order is preserved within each stream, not across them.
            let (stdout, stderr, status) = tokio::join!(
                drain(stdout_pipe, tee, TeeTarget::Stdout),
                drain(stderr_pipe, tee, TeeTarget::Stderr),
                child.wait(),
            );

            match status {
                Ok(status) => CommandResult {
                    exit_code: status.code().unwrap_or(0),
                    stdout,
                    stderr,
                },
                Err(err) => CommandResult::not_found(err.to_string()),
            }
        }
    }
}

#[derive(Clone, Copy)]
enum TeeTarget {
    Stdout,
    Stderr,
}

/// Read one output stream until EOF, optionally forwarding each chunk
/// verbatim to the matching terminal stream as it arrives.
async fn drain<R>(pipe: Option<R>, tee: bool, target: TeeTarget) -> String
where
    R: AsyncRead + Unpin,
{
    let mut captured = String::new();
    let Some(mut pipe) = pipe else {
        return captured;
    };

    let mut buf = [0u8; 8192];
    loop {
        match pipe.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let chunk = &buf[..n];
                captured.push_str(&String::from_utf8_lossy(chunk));
                if tee {
                    match target {
                        TeeTarget::Stdout => {
                            let mut out = std::io::stdout();
                            let _ = out.write_all(chunk);
                            let _ = out.flush();
                        }
                        TeeTarget::Stderr => {
                            let mut err = std::io::stderr();
                            let _ = err.write_all(chunk);
                            let _ = err.flush();
                        }
                    }
                }
            }
        }
    }
    captured
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_tries_extensions_in_order() {
        assert_eq!(
            candidates_for("npm", true),
            ["npm", "npm.cmd", "npm.exe", "npm.bat"]
        );
    }

    #[test]
    fn dotted_names_are_used_verbatim() {
        assert_eq!(candidates_for("npm.cmd", true), ["npm.cmd"]);
    }

    #[test]
    fn non_windows_uses_the_bare_name() {
        assert_eq!(candidates_for("node", false), ["node"]);
    }

    #[tokio::test]
    async fn missing_executable_reports_127_without_failing() {
        let result = run(
            "starter-cli-no-such-binary",
            &[],
            RunOptions::new(StdioMode::Pipe),
        )
        .await;
        assert_eq!(result.exit_code, NOT_FOUND_EXIT_CODE);
        assert!(!result.stderr.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn pipe_captures_both_streams() {
        let result = run(
            "sh",
            &["-c", "printf out; printf err >&2"],
            RunOptions::new(StdioMode::Pipe),
        )
        .await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "out");
        assert_eq!(result.stderr, "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_codes_are_forwarded() {
        let result = run("sh", &["-c", "exit 3"], RunOptions::new(StdioMode::Pipe)).await;
        assert_eq!(result.exit_code, 3);
        assert!(!result.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cwd_is_honored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let expected = dir.path().canonicalize().expect("canonicalize");
        let result = run(
            "pwd",
            &[],
            RunOptions::new(StdioMode::Pipe).in_dir(dir.path()),
        )
        .await;
        assert_eq!(result.stdout.trim(), expected.to_string_lossy());
    }
}
