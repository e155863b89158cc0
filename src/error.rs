//! Error types for the pixbench harness.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for pixbench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop a benchmark sweep.
///
/// An unavailable candidate decode is not an error. It is carried as `None`
/// in [`SizeRun`](crate::runner::SizeRun) and recorded in the
/// [`ResultSet`](crate::result::ResultSet).
#[derive(Error, Debug)]
pub enum Error {
    /// Missing tool, invalid argument, corpus write failure or failed build.
    #[error("setup failed: {0}")]
    Setup(String),

    /// An external codec process exited unsuccessfully.
    #[error("`{command}` exited with {status}")]
    Execution {
        /// The command line that was run.
        command: String,
        /// Exit status reported by the OS.
        status: ExitStatus,
    },

    /// An external codec failed after its fallback path was exhausted.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The candidate's structured result document could not be used.
    #[error("invalid benchmark document {}: {reason}", path.display())]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// The TOML configuration file could not be loaded.
    #[error("invalid configuration {}: {reason}", path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser or I/O message.
        reason: String,
    },

    /// I/O failure outside corpus generation (report writing, directories).
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error belongs to the setup class (exit before any run).
    pub fn is_setup(&self) -> bool {
        matches!(self, Error::Setup(_) | Error::Config { .. })
    }
}
