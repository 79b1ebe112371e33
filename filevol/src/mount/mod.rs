//! Loopback mounting of image files.

mod loopback;

pub use loopback::HostLoopMounter;

use std::path::Path;

use crate::errors::FilevolResult;

/// Attaches image files to mount points and detaches them again.
///
/// Neither call is idempotent: mounting an occupied mount point or
/// unmounting an idle one is reported by the implementation as an error.
pub trait LoopMounter: Send + Sync {
    /// Loop-mount `image`, formatted as `fs_type`, onto `mount_point`.
    fn mount(&self, image: &Path, mount_point: &Path, fs_type: &str) -> FilevolResult<()>;

    fn unmount(&self, mount_point: &Path) -> FilevolResult<()>;
}
