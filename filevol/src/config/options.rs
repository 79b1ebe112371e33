//! Construction options for the volume manager.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::defaults;
use crate::errors::{FilevolError, FilevolResult};

use super::file::ConfigFile;

/// The four immutable parameters a [`VolumeManager`](crate::VolumeManager)
/// is built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilevolOptions {
    /// Allocation size for new images, in 512-byte blocks.
    #[serde(default = "default_size")]
    pub default_size: u64,

    /// Directory holding `<name>.img` files.
    #[serde(default = "default_volume_dir")]
    pub volume_dir: PathBuf,

    /// Filesystem type every image is formatted and mounted with.
    #[serde(default = "default_fs_type")]
    pub fs_type: String,

    /// Directory under which `<name>` mount points are created.
    #[serde(default = "default_mount_home")]
    pub mount_home: PathBuf,
}

fn default_size() -> u64 {
    defaults::SIZE_BLOCKS
}

fn default_volume_dir() -> PathBuf {
    PathBuf::from(defaults::VOLUME_DIR)
}

fn default_fs_type() -> String {
    defaults::FS_TYPE.to_string()
}

fn default_mount_home() -> PathBuf {
    PathBuf::from(defaults::MOUNT_HOME)
}

impl Default for FilevolOptions {
    fn default() -> Self {
        Self {
            default_size: default_size(),
            volume_dir: default_volume_dir(),
            fs_type: default_fs_type(),
            mount_home: default_mount_home(),
        }
    }
}

impl FilevolOptions {
    /// Defaults overridden by the config file at `path`.
    ///
    /// A missing file is not an error; the defaults are returned unchanged.
    pub fn load(path: &Path) -> FilevolResult<Self> {
        let mut options = Self::default();
        if let Some(file) = ConfigFile::read(path)? {
            file.apply(&mut options);
        }
        Ok(options)
    }

    /// Reject options no manager could work with.
    pub fn validate(&self) -> FilevolResult<()> {
        if self.default_size == 0 {
            return Err(FilevolError::Config(
                "default size must be at least one block".to_string(),
            ));
        }
        if self.fs_type.trim().is_empty() {
            return Err(FilevolError::Config(
                "filesystem type must not be empty".to_string(),
            ));
        }
        if self.volume_dir.as_os_str().is_empty() {
            return Err(FilevolError::Config(
                "volume directory must not be empty".to_string(),
            ));
        }
        if self.mount_home.as_os_str().is_empty() {
            return Err(FilevolError::Config(
                "mount home must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
