//! filevol - file-backed loopback volumes
//!
//! Provisions sparse image files formatted with a filesystem and mounts
//! them on demand through loop devices. The image directory is the only
//! record of which volumes exist.

pub mod config;
pub mod constants;
pub mod disk;
pub mod errors;
pub mod mount;
pub mod util;
pub mod volumes;

pub use config::FilevolOptions;
pub use errors::{FilevolError, FilevolResult, ToolOp};
pub use volumes::{Capabilities, CreateOptions, Scope, ToolSet, Volume, VolumeLayout, VolumeManager};
