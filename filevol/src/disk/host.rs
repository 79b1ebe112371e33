use std::path::Path;

use crate::constants::image::BLOCK_SIZE;
use crate::errors::{FilevolResult, ToolOp};
use crate::util::ToolCommand;

use super::{ImageAllocator, ImageFormatter};

/// Image tools backed by the host's coreutils and `mkfs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostImageTools;

impl HostImageTools {
    pub fn new() -> Self {
        Self
    }
}

impl ImageAllocator for HostImageTools {
    fn allocate(&self, image: &Path, blocks: u64) -> FilevolResult<()> {
        // count=0 with seek only extends the file, so nothing is written and
        // the whole image stays a hole.
        ToolCommand::new(ToolOp::Allocate, "dd", image)
            .arg("if=/dev/zero")
            .arg(format!("of={}", image.display()))
            .arg(format!("bs={}", BLOCK_SIZE))
            .arg("count=0")
            .arg(format!("seek={}", blocks))
            .run()?;
        Ok(())
    }

    fn copy_sparse(&self, source: &Path, target: &Path) -> FilevolResult<()> {
        ToolCommand::new(ToolOp::Copy, "cp", target)
            .args(["--sparse=always", "-p"])
            .arg(source)
            .arg(target)
            .run()?;
        Ok(())
    }

    fn delete(&self, image: &Path) -> FilevolResult<()> {
        ToolCommand::new(ToolOp::Delete, "rm", image)
            .arg("-f")
            .arg(image)
            .run()?;
        Ok(())
    }
}

impl ImageFormatter for HostImageTools {
    fn format(&self, image: &Path, fs_type: &str) -> FilevolResult<()> {
        // -F: don't prompt about formatting a regular file
        ToolCommand::new(ToolOp::Format, "mkfs", image)
            .args(["-t", fs_type, "-F"])
            .arg(image)
            .run()?;
        Ok(())
    }
}
