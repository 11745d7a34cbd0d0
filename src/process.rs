//! Shell command execution with live output
//!
//! Commands run through `sh -c` in the project directory. stdout and stderr
//! are read line by line into one buffer in arrival order; each line is also
//! forwarded to the debug log as it arrives.

use crate::error::ProcessError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Shell used to interpret commands
const DEFAULT_SHELL: &str = "sh";

/// Per-invocation options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Do not forward stdout lines to the log (stderr is always forwarded)
    pub suppress: bool,
}

impl RunOptions {
    /// Options that keep stdout out of the log
    pub fn suppressed() -> Self {
        Self { suppress: true }
    }
}

/// Trait for running shell commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion.
    ///
    /// Returns the trimmed combined output on exit code 0.
    async fn run(&self, command: &str, options: RunOptions) -> Result<String, ProcessError>;

    /// Directory the commands run in
    fn working_dir(&self) -> &Path;
}

/// Runner that executes real commands through the system shell
#[derive(Debug, Clone)]
pub struct ShellRunner {
    working_dir: PathBuf,
    shell: String,
}

impl ShellRunner {
    /// Create a runner for the given project directory
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            shell: DEFAULT_SHELL.to_string(),
        }
    }

    /// Use a different shell (must accept `-c <command>`)
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }
}

/// Decode one buffered line, replacing invalid UTF-8, and reset the buffer
fn take_line(buf: &mut Vec<u8>) -> String {
    let line = String::from_utf8_lossy(buf)
        .trim_end_matches(['\n', '\r'])
        .to_string();
    buf.clear();
    line
}

fn append_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(line);
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, options: RunOptions) -> Result<String, ProcessError> {
        let wait_failed = |source: std::io::Error| ProcessError::WaitFailed {
            command: command.to_string(),
            source,
        };

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command.to_string(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| wait_failed(std::io::Error::other("stdout was not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| wait_failed(std::io::Error::other("stderr was not captured")))?;

        let mut stdout = BufReader::new(stdout);
        let mut stderr = BufReader::new(stderr);
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut output = String::new();
        let mut stdout_open = true;
        let mut stderr_open = true;

        // Partial reads stay in the buffers when the other branch wins
        while stdout_open || stderr_open {
            tokio::select! {
                read = stdout.read_until(b'\n', &mut stdout_buf), if stdout_open => match read {
                    Ok(read) => {
                        if read == 0 {
                            stdout_open = false;
                        }
                        if !stdout_buf.is_empty() {
                            let line = take_line(&mut stdout_buf);
                            if !options.suppress {
                                tracing::debug!("{}", line);
                            }
                            append_line(&mut output, &line);
                        }
                    }
                    Err(e) => return Err(wait_failed(e)),
                },
                read = stderr.read_until(b'\n', &mut stderr_buf), if stderr_open => match read {
                    Ok(read) => {
                        if read == 0 {
                            stderr_open = false;
                        }
                        if !stderr_buf.is_empty() {
                            let line = take_line(&mut stderr_buf);
                            tracing::debug!("{}", line);
                            append_line(&mut output, &line);
                        }
                    }
                    Err(e) => return Err(wait_failed(e)),
                },
            }
        }

        let status = child.wait().await.map_err(wait_failed)?;

        if status.success() {
            Ok(output.trim().to_string())
        } else {
            tracing::error!("failed on command {}", command);
            Err(ProcessError::failed(command, status.code(), output.trim()))
        }
    }

    fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_trimmed_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new(dir.path());
        let output = runner
            .run("echo '  v20.11.1  '", RunOptions::default())
            .await
            .unwrap();
        assert_eq!(output, "v20.11.1");
    }

    #[tokio::test]
    async fn test_run_combines_stdout_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new(dir.path());
        let output = runner
            .run("echo out; echo err 1>&2", RunOptions::suppressed())
            .await
            .unwrap();
        assert!(output.contains("out"));
        assert!(output.contains("err"));
    }

    #[tokio::test]
    async fn test_run_uses_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let runner = ShellRunner::new(dir.path());
        let output = runner.run("ls", RunOptions::default()).await.unwrap();
        assert!(output.contains("marker.txt"));
        assert_eq!(runner.working_dir(), dir.path());
    }

    #[tokio::test]
    async fn test_run_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new(dir.path());
        let err = runner
            .run("echo broken; exit 3", RunOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(3));
        match err {
            ProcessError::Failed { command, output, .. } => {
                assert_eq!(command, "echo broken; exit 3");
                assert_eq!(output, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_run_missing_shell() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new(dir.path()).with_shell("/nonexistent/shell");
        let err = runner.run("true", RunOptions::default()).await.unwrap_err();
        assert!(matches!(err, ProcessError::SpawnFailed { .. }));
    }

    #[tokio::test]
    async fn test_run_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new(dir.path());
        let output = runner
            .run(r"printf 'caf\351\n'; printf 'ok\377' 1>&2; exit 0", RunOptions::default())
            .await
            .unwrap();
        assert!(output.contains("caf\u{fffd}"));
        assert!(output.contains("ok\u{fffd}"));
    }

    #[tokio::test]
    async fn test_run_keeps_last_line_without_newline() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new(dir.path());
        let output = runner
            .run("printf 'one\\ntwo'", RunOptions::default())
            .await
            .unwrap();
        assert_eq!(output, "one\ntwo");
    }

    #[test]
    fn test_take_line_strips_crlf() {
        let mut buf = b"done\r\n".to_vec();
        assert_eq!(take_line(&mut buf), "done");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_run_options_suppressed() {
        assert!(RunOptions::suppressed().suppress);
        assert!(!RunOptions::default().suppress);
    }
}
