//! External process invocation.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// One external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
}

/// Exit status and stderr of a finished command.
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stderr: String,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Human-readable command line for messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Run to completion with output discarded, returning the elapsed
    /// monotonic time. A non-zero exit is an error.
    pub fn run_timed(&self) -> Result<Duration> {
        let mut cmd = self.command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let start = Instant::now();
        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        let elapsed = start.elapsed();

        if !status.success() {
            return Err(Error::Execution {
                command: self.command_line(),
                status,
            });
        }
        Ok(elapsed)
    }

    /// Run to completion, capturing stderr. The exit status is returned
    /// rather than checked.
    pub fn run_captured(&self) -> Result<Captured> {
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        Ok(Captured {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn spawn_error(&self, err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::NotFound {
            Error::Setup(format!("`{}` not found", self.program.display()))
        } else {
            Error::Setup(format!("cannot start `{}`: {err}", self.command_line()))
        }
    }
}

/// Resolve a tool name the way a shell would.
///
/// Names containing a path separator are checked as paths; bare names are
/// searched for in `PATH`.
pub fn find_tool(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    let name = Path::new(name.as_ref());
    if name.components().count() > 1 {
        return name.is_file().then(|| name.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
