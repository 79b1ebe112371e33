//! Error types shared by every filevol operation.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type FilevolResult<T> = Result<T, FilevolError>;

/// External tool an operation shelled out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolOp {
    Copy,
    Allocate,
    Format,
    Mount,
    Unmount,
    Delete,
}

impl ToolOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolOp::Copy => "copy",
            ToolOp::Allocate => "allocate",
            ToolOp::Format => "format",
            ToolOp::Mount => "mount",
            ToolOp::Unmount => "unmount",
            ToolOp::Delete => "delete",
        }
    }
}

impl fmt::Display for ToolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum FilevolError {
    #[error("volume {0} already exists")]
    AlreadyExists(String),

    #[error("source volume {0} not found")]
    SourceNotFound(String),

    #[error("volume {name} not found (mountpoint {})", .mountpoint.display())]
    NotFound { name: String, mountpoint: PathBuf },

    /// An external tool exited non-zero or could not be spawned.
    ///
    /// `target` is the path the tool acted on: the image for copy, allocate,
    /// format and delete; the mount point for mount and unmount.
    #[error("{op} failed on {} (exit status {}): {output}", .target.display(), format_status(.status))]
    ToolFailure {
        op: ToolOp,
        target: PathBuf,
        status: Option<i32>,
        output: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl FilevolError {
    /// Path the failed tool was aimed at, if this is a tool failure.
    pub fn tool_target(&self) -> Option<&Path> {
        match self {
            FilevolError::ToolFailure { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FilevolError::NotFound { .. } | FilevolError::SourceNotFound(_)
        )
    }
}

fn format_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}
