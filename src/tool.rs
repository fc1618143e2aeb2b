//! Locating and running external tools (`git`, `gh`)
//!
//! Every collaborator call goes through [`Tool`], which captures stdout and
//! stderr and maps failures to [`Error::Command`].

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tracing::{debug, trace};

/// Raw result of running a tool
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, `None` when killed by a signal
    pub status: Option<i32>,
    /// Whether the process exited successfully
    pub success: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// How stderr output is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrPolicy {
    /// Only the exit status decides success
    Ignore,
    /// Any stderr output is a failure, even with a zero exit status
    Fail,
}

/// An external executable bound to a working directory
#[derive(Debug, Clone)]
pub struct Tool {
    name: String,
    path: PathBuf,
    cwd: PathBuf,
    env: Vec<(String, String)>,
}

impl Tool {
    /// Locate `name` on `PATH`, or use `explicit` when given
    pub fn locate(name: &str, explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => return Err(Error::ToolNotFound(path.display().to_string())),
            None => {
                let search = std::env::var_os("PATH").unwrap_or_default();
                find_in_path(name, &search).ok_or_else(|| Error::ToolNotFound(name.to_string()))?
            }
        };
        debug!(tool = name, path = %path.display(), "located tool");

        Ok(Self {
            name: name.to_string(),
            path,
            cwd: cwd.to_path_buf(),
            env: Vec::new(),
        })
    }

    /// Set an environment variable for every invocation
    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Run and return stdout; fails on non-zero exit
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args, false).await?;
        self.check(args, output, StderrPolicy::Ignore)
    }

    /// Run and return stdout; fails on non-zero exit or any stderr output
    pub async fn run_strict(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args, false).await?;
        self.check(args, output, StderrPolicy::Fail)
    }

    /// Run in a separate process group; fails on non-zero exit
    ///
    /// A Ctrl+C in the terminal is not delivered to the child, so a step that
    /// mutates the working copy always runs to completion.
    pub async fn run_detached(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args, true).await?;
        self.check(args, output, StderrPolicy::Ignore)
    }

    /// Run and capture output without interpreting the exit status
    pub async fn output(&self, args: &[&str], detached: bool) -> Result<ToolOutput> {
        debug!(tool = %self.name, ?args, detached, "running");

        let mut std_cmd = std::process::Command::new(&self.path);
        std_cmd
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.env {
            std_cmd.env(key, value);
        }
        #[cfg(unix)]
        if detached {
            use std::os::unix::process::CommandExt;
            std_cmd.process_group(0);
        }

        let output = tokio::process::Command::from(std_cmd).output().await?;
        let result = ToolOutput {
            status: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        trace!(tool = %self.name, status = ?result.status, stderr = %result.stderr, "finished");
        Ok(result)
    }

    fn check(&self, args: &[&str], output: ToolOutput, policy: StderrPolicy) -> Result<String> {
        let stderr_failed = policy == StderrPolicy::Fail && !output.stderr.trim().is_empty();
        if output.success && !stderr_failed {
            return Ok(output.stdout);
        }
        Err(Error::Command {
            program: self.name.clone(),
            args: args.join(" "),
            status: output.status,
            stderr: output.stderr,
        })
    }
}

/// Search a `PATH`-style list of directories for an executable
pub fn find_in_path(name: &str, search: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search)
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    if cfg!(windows) {
        vec![dir.join(format!("{name}.exe")), dir.join(name)]
    } else {
        vec![dir.join(name)]
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
