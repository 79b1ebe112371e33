//! Image file operations.
//!
//! This module provides the capabilities the volume manager needs to
//! produce and destroy image files:
//! - `ImageAllocator` - sparse allocation, sparse-preserving copy, deletion
//! - `ImageFormatter` - filesystem creation on an image
//! - `HostImageTools` - implementation of both over `dd`, `cp`, `rm`, `mkfs`
//! - `PendingImage` - RAII guard removing an image that was never finished

mod host;
mod image;

pub use host::HostImageTools;
pub use image::PendingImage;

use std::path::Path;

use crate::errors::FilevolResult;

/// Produces, copies and deletes image files.
pub trait ImageAllocator: Send + Sync {
    /// Create a sparse, zero-reading file of `blocks` 512-byte blocks.
    fn allocate(&self, image: &Path, blocks: u64) -> FilevolResult<()>;

    /// Copy `source` to `target`, keeping holes unallocated.
    fn copy_sparse(&self, source: &Path, target: &Path) -> FilevolResult<()>;

    /// Delete an image file. Deleting a missing file succeeds.
    fn delete(&self, image: &Path) -> FilevolResult<()>;
}

/// Writes a filesystem onto an image file.
pub trait ImageFormatter: Send + Sync {
    fn format(&self, image: &Path, fs_type: &str) -> FilevolResult<()>;
}
