#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Isolated volume dir, mount home and config path for one test.
pub struct TestContext {
    pub cmd: Command,
    pub volume_dir: PathBuf,
    pub home: PathBuf,
    pub config: PathBuf,
    _temp_dir: TempDir,
}

impl TestContext {
    /// A fresh command sharing this context's directories.
    pub fn new_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_filevol");
        let mut cmd = Command::new(bin_path);
        cmd.timeout(Duration::from_secs(30));
        cmd.env_remove("FILEVOL_HOME");
        cmd.env_remove("FILEVOL_CONFIG");
        cmd.env_remove("RUST_LOG");
        cmd.arg("--config").arg(&self.config);
        cmd.arg("--home").arg(&self.home);
        cmd.arg("--volume-dir").arg(&self.volume_dir);
        cmd
    }

    pub fn image_path(&self, name: &str) -> PathBuf {
        self.volume_dir.join(format!("{}.img", name))
    }

    /// Drop an image file straight into the volume dir.
    pub fn seed_image(&self, name: &str, content: &[u8]) {
        std::fs::write(self.image_path(name), content).expect("Failed to seed image");
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config, content).expect("Failed to write config");
    }

    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }
}

pub fn filevol() -> TestContext {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let volume_dir = temp_dir.path().join("volumes");
    let home = temp_dir.path().join("mounts");
    // no file here unless a test writes one
    let config = temp_dir.path().join("filevol-plugin");
    std::fs::create_dir(&volume_dir).expect("Failed to create volume dir");

    let mut ctx = TestContext {
        cmd: Command::new(env!("CARGO_BIN_EXE_filevol")),
        volume_dir,
        home,
        config,
        _temp_dir: temp_dir,
    };
    ctx.cmd = ctx.new_cmd();
    ctx
}
