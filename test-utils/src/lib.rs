//! Shared fixtures for filevol tests.
//!
//! [`RecordingTools`] stands in for `dd`/`cp`/`rm`/`mkfs`/`mount`/`umount`:
//! it records every call, touches real files so existence checks behave,
//! keeps a set of "mounted" mount points, and can be told to fail any
//! operation.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use filevol::disk::{ImageAllocator, ImageFormatter};
use filevol::mount::LoopMounter;
use filevol::{FilevolError, FilevolOptions, FilevolResult, ToolOp, ToolSet, VolumeManager};
use parking_lot::Mutex;
use tempfile::TempDir;

/// Exit status `mount(8)` uses for mount failures.
const MOUNT_FAILURE: i32 = 32;

/// Block size the fake allocator sizes files with.
const BLOCK_SIZE: u64 = 512;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolCall {
    Allocate { image: PathBuf, blocks: u64 },
    Copy { source: PathBuf, target: PathBuf },
    Delete { image: PathBuf },
    Format { image: PathBuf, fs_type: String },
    Mount { image: PathBuf, mount_point: PathBuf, fs_type: String },
    Unmount { mount_point: PathBuf },
}

impl ToolCall {
    pub fn op(&self) -> ToolOp {
        match self {
            ToolCall::Allocate { .. } => ToolOp::Allocate,
            ToolCall::Copy { .. } => ToolOp::Copy,
            ToolCall::Delete { .. } => ToolOp::Delete,
            ToolCall::Format { .. } => ToolOp::Format,
            ToolCall::Mount { .. } => ToolOp::Mount,
            ToolCall::Unmount { .. } => ToolOp::Unmount,
        }
    }
}

#[derive(Default)]
struct State {
    calls: Vec<ToolCall>,
    failing: HashSet<ToolOp>,
    mounted: HashSet<PathBuf>,
}

/// Fake tool set that records calls instead of shelling out.
#[derive(Default)]
pub struct RecordingTools {
    state: Mutex<State>,
}

impl RecordingTools {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every later call of `op` fail with exit status 1.
    pub fn fail(&self, op: ToolOp) {
        self.state.lock().failing.insert(op);
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.state.lock().calls.clone()
    }

    pub fn ops(&self) -> Vec<ToolOp> {
        self.state.lock().calls.iter().map(ToolCall::op).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn is_mounted(&self, mount_point: &Path) -> bool {
        self.state.lock().mounted.contains(mount_point)
    }

    /// A [`ToolSet`] whose three capabilities all point at `self`.
    pub fn tool_set(self: &Arc<Self>) -> ToolSet {
        ToolSet {
            allocator: self.clone(),
            formatter: self.clone(),
            mounter: self.clone(),
        }
    }

    /// Record `call`, then report whether it was told to fail.
    fn record(&self, call: ToolCall) -> bool {
        let mut state = self.state.lock();
        let op = call.op();
        state.calls.push(call);
        state.failing.contains(&op)
    }
}

fn tool_error(op: ToolOp, target: &Path, status: i32, output: &str) -> FilevolError {
    FilevolError::ToolFailure {
        op,
        target: target.to_path_buf(),
        status: Some(status),
        output: output.to_string(),
    }
}

fn io_error(op: ToolOp, target: &Path, e: std::io::Error) -> FilevolError {
    tool_error(op, target, 1, &e.to_string())
}

impl ImageAllocator for RecordingTools {
    fn allocate(&self, image: &Path, blocks: u64) -> FilevolResult<()> {
        let failing = self.record(ToolCall::Allocate {
            image: image.to_path_buf(),
            blocks,
        });

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(image)
            .map_err(|e| io_error(ToolOp::Allocate, image, e))?;

        if failing {
            // leave a truncated file behind, like an interrupted dd
            return Err(tool_error(ToolOp::Allocate, image, 1, "dd: No space left on device"));
        }

        file.set_len(blocks * BLOCK_SIZE)
            .map_err(|e| io_error(ToolOp::Allocate, image, e))
    }

    fn copy_sparse(&self, source: &Path, target: &Path) -> FilevolResult<()> {
        let failing = self.record(ToolCall::Copy {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
        });
        if failing {
            std::fs::write(target, b"partial").map_err(|e| io_error(ToolOp::Copy, target, e))?;
            return Err(tool_error(ToolOp::Copy, target, 1, "cp: error writing: Input/output error"));
        }

        std::fs::copy(source, target)
            .map(|_| ())
            .map_err(|e| io_error(ToolOp::Copy, target, e))
    }

    fn delete(&self, image: &Path) -> FilevolResult<()> {
        let failing = self.record(ToolCall::Delete {
            image: image.to_path_buf(),
        });
        if failing {
            return Err(tool_error(ToolOp::Delete, image, 1, "rm: Operation not permitted"));
        }

        match std::fs::remove_file(image) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(ToolOp::Delete, image, e)),
        }
    }
}

impl ImageFormatter for RecordingTools {
    fn format(&self, image: &Path, fs_type: &str) -> FilevolResult<()> {
        let failing = self.record(ToolCall::Format {
            image: image.to_path_buf(),
            fs_type: fs_type.to_string(),
        });
        if failing {
            return Err(tool_error(ToolOp::Format, image, 1, "mkfs: invalid block count"));
        }

        // stamp the image so copies can be told apart from fresh allocations
        let mut file = OpenOptions::new()
            .write(true)
            .open(image)
            .map_err(|e| io_error(ToolOp::Format, image, e))?;
        file.write_all(format!("fakefs:{}", fs_type).as_bytes())
            .map_err(|e| io_error(ToolOp::Format, image, e))
    }
}

impl LoopMounter for RecordingTools {
    fn mount(&self, image: &Path, mount_point: &Path, fs_type: &str) -> FilevolResult<()> {
        let failing = self.record(ToolCall::Mount {
            image: image.to_path_buf(),
            mount_point: mount_point.to_path_buf(),
            fs_type: fs_type.to_string(),
        });
        if failing {
            return Err(tool_error(ToolOp::Mount, mount_point, MOUNT_FAILURE, "mount: permission denied"));
        }
        if !image.exists() {
            return Err(tool_error(
                ToolOp::Mount,
                mount_point,
                MOUNT_FAILURE,
                &format!("mount: {}: special device does not exist", image.display()),
            ));
        }

        let mut state = self.state.lock();
        if !state.mounted.insert(mount_point.to_path_buf()) {
            return Err(tool_error(
                ToolOp::Mount,
                mount_point,
                MOUNT_FAILURE,
                &format!("mount: {}: already mounted", mount_point.display()),
            ));
        }
        Ok(())
    }

    fn unmount(&self, mount_point: &Path) -> FilevolResult<()> {
        let failing = self.record(ToolCall::Unmount {
            mount_point: mount_point.to_path_buf(),
        });
        if failing {
            return Err(tool_error(ToolOp::Unmount, mount_point, MOUNT_FAILURE, "umount: target is busy"));
        }

        if !self.state.lock().mounted.remove(mount_point) {
            return Err(tool_error(
                ToolOp::Unmount,
                mount_point,
                MOUNT_FAILURE,
                &format!("umount: {}: not mounted", mount_point.display()),
            ));
        }
        Ok(())
    }
}

/// A manager over temporary directories, wired to [`RecordingTools`].
pub struct TestVolumes {
    pub manager: VolumeManager,
    pub tools: Arc<RecordingTools>,
    pub volume_dir: PathBuf,
    pub mount_home: PathBuf,
    _temp_dir: TempDir, // Dropped after test
}

impl TestVolumes {
    pub fn new() -> Self {
        Self::with_default_size(2048)
    }

    pub fn with_default_size(default_size: u64) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let volume_dir = temp_dir.path().join("volumes");
        let mount_home = temp_dir.path().join("mounts");
        std::fs::create_dir(&volume_dir).expect("Failed to create volume dir");

        let options = FilevolOptions {
            default_size,
            volume_dir: volume_dir.clone(),
            fs_type: "ext4".to_string(),
            mount_home: mount_home.clone(),
        };

        let tools = RecordingTools::new();
        let manager = VolumeManager::with_tools(options, tools.tool_set())
            .expect("Failed to create volume manager");
        manager.prepare().expect("Failed to prepare mount home");

        Self {
            manager,
            tools,
            volume_dir,
            mount_home,
            _temp_dir: temp_dir,
        }
    }

    pub fn image_path(&self, name: &str) -> PathBuf {
        self.volume_dir.join(format!("{}.img", name))
    }

    pub fn mount_path(&self, name: &str) -> PathBuf {
        self.mount_home.join(name)
    }
}

impl Default for TestVolumes {
    fn default() -> Self {
        Self::new()
    }
}
