use std::path::Path;

use crate::errors::{FilevolResult, ToolOp};
use crate::util::ToolCommand;

use super::LoopMounter;

/// Loop mounts through the host's `mount` and `umount`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostLoopMounter;

impl HostLoopMounter {
    pub fn new() -> Self {
        Self
    }
}

impl LoopMounter for HostLoopMounter {
    fn mount(&self, image: &Path, mount_point: &Path, fs_type: &str) -> FilevolResult<()> {
        tracing::info!(
            "Mounting image: {} → {} (fs_type={})",
            image.display(),
            mount_point.display(),
            fs_type
        );

        ToolCommand::new(ToolOp::Mount, "mount", mount_point)
            .args(["-o", "loop", "-t", fs_type])
            .arg(image)
            .arg(mount_point)
            .run()?;
        Ok(())
    }

    fn unmount(&self, mount_point: &Path) -> FilevolResult<()> {
        tracing::info!("Unmounting {}", mount_point.display());

        ToolCommand::new(ToolOp::Unmount, "umount", mount_point)
            .arg(mount_point)
            .run()?;
        Ok(())
    }
}
