//! RAII guard for an image that is still being built.

use std::path::{Path, PathBuf};

use super::ImageAllocator;

/// An image file that has not been completed yet.
///
/// Deletes the file through the allocator when dropped, unless
/// [`PendingImage::commit`] was called. Create uses this so a failed
/// allocation or format never leaves a half-made image behind.
pub struct PendingImage<'a> {
    path: PathBuf,
    allocator: &'a dyn ImageAllocator,
    committed: bool,
}

impl<'a> PendingImage<'a> {
    pub fn new(path: PathBuf, allocator: &'a dyn ImageAllocator) -> Self {
        Self {
            path,
            allocator,
            committed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the image and hand back its path.
    pub fn commit(mut self) -> PathBuf {
        self.committed = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PendingImage<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        if let Err(e) = self.allocator.delete(&self.path) {
            tracing::warn!("Failed to cleanup image {}: {}", self.path.display(), e);
        } else {
            tracing::debug!("Cleaned up image: {}", self.path.display());
        }
    }
}
