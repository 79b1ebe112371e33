//! Running external tools with captured output.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::{FilevolError, FilevolResult, ToolOp};

/// One invocation of an external tool on behalf of a volume operation.
///
/// Stdout and stderr are captured and joined, so a failure can be reported
/// with everything the tool printed.
pub struct ToolCommand {
    op: ToolOp,
    target: PathBuf,
    command: Command,
}

impl ToolCommand {
    /// # Arguments
    /// * `op` - Operation the tool performs (used in errors and logs)
    /// * `program` - Executable to run, resolved through `PATH`
    /// * `target` - Path the tool acts on, reported back on failure
    pub fn new(op: ToolOp, program: impl AsRef<OsStr>, target: &Path) -> Self {
        Self {
            op,
            target: target.to_path_buf(),
            command: Command::new(program),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.command.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command.args(args);
        self
    }

    /// Run to completion and return the combined output.
    ///
    /// Blocks for the tool's full duration; there is no timeout.
    pub fn run(mut self) -> FilevolResult<String> {
        let program = self.command.get_program().to_string_lossy().into_owned();
        tracing::debug!(op = %self.op, command = ?self.command, "Running tool");

        let output = match self.command.output() {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(op = %self.op, program = %program, "Failed to spawn tool: {}", e);
                return Err(FilevolError::ToolFailure {
                    op: self.op,
                    target: self.target,
                    status: None,
                    output: format!("failed to run {}: {}", program, e),
                });
            }
        };

        let combined = combine_output(&output.stdout, &output.stderr);

        if !output.status.success() {
            tracing::error!(
                op = %self.op,
                target = %self.target.display(),
                status = ?output.status.code(),
                "{} error: {}",
                program,
                combined.trim_end()
            );
            return Err(FilevolError::ToolFailure {
                op: self.op,
                target: self.target,
                status: output.status.code(),
                output: combined,
            });
        }

        Ok(combined)
    }
}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    let stderr = String::from_utf8_lossy(stderr);
    if !combined.is_empty() && !stderr.is_empty() && !combined.ends_with('\n') {
        combined.push('\n');
    }
    combined.push_str(&stderr);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_tool_returns_output() {
        let out = ToolCommand::new(ToolOp::Copy, "sh", Path::new("/tmp/x"))
            .args(["-c", "echo hello"])
            .run()
            .unwrap();
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn test_failure_carries_status_and_combined_output() {
        let err = ToolCommand::new(ToolOp::Format, "sh", Path::new("/tmp/a.img"))
            .args(["-c", "echo out; echo err >&2; exit 3"])
            .run()
            .unwrap_err();

        match err {
            FilevolError::ToolFailure {
                op,
                target,
                status,
                output,
            } => {
                assert_eq!(op, ToolOp::Format);
                assert_eq!(target, PathBuf::from("/tmp/a.img"));
                assert_eq!(status, Some(3));
                assert!(output.contains("out"));
                assert!(output.contains("err"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_is_tool_failure() {
        let err = ToolCommand::new(ToolOp::Mount, "filevol-no-such-tool", Path::new("/mnt/a"))
            .run()
            .unwrap_err();
        assert!(matches!(
            err,
            FilevolError::ToolFailure {
                op: ToolOp::Mount,
                status: None,
                ..
            }
        ));
    }

    #[test]
    fn test_combine_output_separates_streams() {
        assert_eq!(combine_output(b"a", b"b"), "a\nb");
        assert_eq!(combine_output(b"a\n", b"b"), "a\nb");
        assert_eq!(combine_output(b"", b"b"), "b");
        assert_eq!(combine_output(b"a", b""), "a");
    }
}
