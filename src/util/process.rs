//! Subprocess execution utilities.
//!
//! The external build tool is the one place the resolver's decisions
//! leave the process; everything funnels through this builder so
//! invocations are logged and failures carry the full command line.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{bail, Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// The command line, for logging and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Run the command, inheriting stdio, and fail on a non-zero exit.
    pub fn exec(&self) -> Result<()> {
        tracing::debug!("running: {}", self.command_line());

        let status = self
            .build_command()
            .status()
            .with_context(|| format!("failed to run: {}", self.command_line()))?;

        if !status.success() {
            bail!(
                "command exited with {}: {}",
                status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                self.command_line()
            );
        }
        Ok(())
    }

    /// Run the command and capture its output; fail on a non-zero exit.
    pub fn exec_with_output(&self) -> Result<Output> {
        tracing::debug!("running: {}", self.command_line());

        let output = self
            .build_command()
            .output()
            .with_context(|| format!("failed to run: {}", self.command_line()))?;

        if !output.status.success() {
            bail!(
                "command failed: {}\nstderr:\n{}",
                self.command_line(),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_rendering() {
        let builder = ProcessBuilder::new("cmake")
            .arg("-S")
            .arg(".")
            .args(["-B", "build"]);
        assert_eq!(builder.command_line(), "cmake -S . -B build");
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_reports_exit_status() {
        ProcessBuilder::new("true").exec().unwrap();

        let err = ProcessBuilder::new("false").exec().unwrap_err();
        assert!(err.to_string().contains("false"));
    }
}
