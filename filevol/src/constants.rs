//! Constants for filevol
//!
//! Centralized location for hardcoded paths, defaults and naming rules.

/// Built-in defaults, overridable by the config file.
pub mod defaults {
    /// Default image size in 512-byte blocks (102 MiB).
    pub const SIZE_BLOCKS: u64 = 208_896;

    /// Default filesystem type for new images.
    pub const FS_TYPE: &str = "ext4";

    /// Default directory holding image files.
    pub const VOLUME_DIR: &str = "/mnt/data/apps";

    /// Default directory holding mount points.
    pub const MOUNT_HOME: &str = "/var/lib/docker-filevol-plugin";
}

/// Well-known host paths.
pub mod paths {
    /// Line-oriented `key=value` config file read at startup.
    pub const CONFIG_FILE: &str = "/etc/docker/filevol-plugin";

    /// Log file used when file logging is requested without a path.
    pub const LOG_FILE: &str = "/var/log/docker-filevol-plugin.log";
}

pub mod envs {
    pub const FILEVOL_HOME: &str = "FILEVOL_HOME";
    pub const FILEVOL_CONFIG: &str = "FILEVOL_CONFIG";
}

/// Config file keys.
pub mod config_keys {
    pub const SIZE: &str = "size";
    pub const PATH: &str = "path";
    pub const FS_TYPE: &str = "fstyp";
}

/// Create request option keys.
pub mod create_options {
    pub const SIZE: &str = "size";
    pub const SOURCE: &str = "source";
}

/// Image file naming and allocation.
pub mod image {
    /// Extension of image files, without the dot.
    pub const EXTENSION: &str = "img";

    /// Block size used when allocating images with `dd`.
    pub const BLOCK_SIZE: u64 = 512;
}

/// Permission bits for mount points and the mount home.
pub const MOUNT_DIR_MODE: u32 = 0o700;
