//! Thread-safe volume manager implementation.

use std::fmt;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::FilevolOptions;
use crate::constants::MOUNT_DIR_MODE;
use crate::disk::{HostImageTools, ImageAllocator, ImageFormatter, PendingImage};
use crate::errors::{FilevolError, FilevolResult};
use crate::mount::{HostLoopMounter, LoopMounter};

use super::layout::{VolumeLayout, validate_name};
use super::types::{Capabilities, CreateOptions, Scope, Volume};

/// The external tools a manager drives.
#[derive(Clone)]
pub struct ToolSet {
    pub allocator: Arc<dyn ImageAllocator>,
    pub formatter: Arc<dyn ImageFormatter>,
    pub mounter: Arc<dyn LoopMounter>,
}

impl ToolSet {
    /// `dd`/`cp`/`rm`/`mkfs` for images, `mount`/`umount` for mounts.
    pub fn host() -> Self {
        Self {
            allocator: Arc::new(HostImageTools::new()),
            formatter: Arc::new(HostImageTools::new()),
            mounter: Arc::new(HostLoopMounter::new()),
        }
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::host()
    }
}

/// Manages file-backed volumes under one volume directory.
///
/// # Design
///
/// - **Filesystem as database**: a volume exists iff its image file does;
///   mount state is not tracked at all
/// - **One lock**: Create/Remove/Mount/Unmount hold it exclusively,
///   Get/List share it, Path/Capabilities skip it
/// - **No retries**: every tool failure is returned to the caller as-is
pub struct VolumeManager {
    layout: VolumeLayout,
    fs_type: String,
    default_size: u64,
    tools: ToolSet,
    lock: RwLock<()>,
}

impl fmt::Debug for VolumeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeManager")
            .field("layout", &self.layout)
            .field("fs_type", &self.fs_type)
            .field("default_size", &self.default_size)
            .finish_non_exhaustive()
    }
}

impl VolumeManager {
    /// Create a manager that shells out to the host's tools.
    pub fn new(options: FilevolOptions) -> FilevolResult<Self> {
        Self::with_tools(options, ToolSet::host())
    }

    pub fn with_tools(options: FilevolOptions, tools: ToolSet) -> FilevolResult<Self> {
        options.validate()?;

        tracing::debug!(
            volume_dir = %options.volume_dir.display(),
            mount_home = %options.mount_home.display(),
            fs_type = %options.fs_type,
            default_size = options.default_size,
            "Creating volume manager"
        );

        Ok(Self {
            layout: VolumeLayout::new(options.volume_dir, options.mount_home),
            fs_type: options.fs_type,
            default_size: options.default_size,
            tools,
            lock: RwLock::new(()),
        })
    }

    /// Make sure the mount home exists, creating it with mode 0700.
    pub fn prepare(&self) -> FilevolResult<()> {
        let home = self.layout.mount_home();
        let created = !home.exists();
        create_mount_dir(home)?;
        if created {
            tracing::debug!("Created home dir at {}", home.display());
        }
        Ok(())
    }

    pub fn layout(&self) -> &VolumeLayout {
        &self.layout
    }

    pub fn fs_type(&self) -> &str {
        &self.fs_type
    }

    pub fn default_size(&self) -> u64 {
        self.default_size
    }

    /// Create a volume's image, either fresh or as a copy of `source`.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the image is already there (nothing is touched)
    /// - `SourceNotFound` if `source` names a volume with no image
    /// - `ToolFailure` if copy, allocation or formatting fails; the
    ///   unfinished image is deleted before returning
    pub fn create(&self, name: &str, options: &CreateOptions) -> FilevolResult<()> {
        validate_name(name)?;
        if let Some(source) = options.source.as_deref() {
            validate_name(source)?;
        }
        let blocks = options.size_blocks(self.default_size)?;

        let _guard = self.lock.write();

        let image = self.layout.image_path(name);
        if image_exists(&image)? {
            tracing::error!("Create: target volume exists: {}", image.display());
            return Err(FilevolError::AlreadyExists(name.to_string()));
        }

        let allocator = self.tools.allocator.as_ref();

        if let Some(source) = options.source.as_deref() {
            let source_image = self.layout.image_path(source);
            if !image_exists(&source_image)? {
                tracing::error!("Create: snapshot source missing: {}", source_image.display());
                return Err(FilevolError::SourceNotFound(source.to_string()));
            }

            let pending = PendingImage::new(image, allocator);
            allocator.copy_sparse(&source_image, pending.path())?;
            let image = pending.commit();

            tracing::info!(
                volume = name,
                source = source,
                "Created snapshot volume at {}",
                image.display()
            );
            return Ok(());
        }

        let pending = PendingImage::new(image, allocator);
        allocator.allocate(pending.path(), blocks)?;
        self.tools.formatter.format(pending.path(), &self.fs_type)?;
        let image = pending.commit();

        tracing::info!(
            volume = name,
            blocks = blocks,
            fs_type = %self.fs_type,
            "Created volume at {}",
            image.display()
        );
        Ok(())
    }

    /// Delete a volume's image. Removing an absent volume succeeds.
    ///
    /// The volume is not unmounted first.
    pub fn remove(&self, name: &str) -> FilevolResult<()> {
        validate_name(name)?;

        let _guard = self.lock.write();

        let image = self.layout.image_path(name);
        if !image_exists(&image)? {
            tracing::debug!(volume = name, "Remove: no image, nothing to do");
            return Ok(());
        }

        self.tools.allocator.delete(&image)?;

        tracing::info!(volume = name, "Removed volume {}", image.display());
        Ok(())
    }

    /// Loop-mount a volume and return its mount point.
    ///
    /// On tool failure the returned `ToolFailure` targets the same mount
    /// point, so callers can always find the intended path.
    pub fn mount(&self, name: &str) -> FilevolResult<PathBuf> {
        validate_name(name)?;

        let _guard = self.lock.write();

        let mount_path = self.layout.mount_path(name);
        let image = self.layout.image_path(name);

        create_mount_dir(&mount_path)?;

        self.tools
            .mounter
            .mount(&image, &mount_path, &self.fs_type)
            .map_err(|e| retarget(e, &mount_path))?;

        tracing::info!(volume = name, "Mounted {} → {}", image.display(), mount_path.display());
        Ok(mount_path)
    }

    /// Unmount a volume's mount point. The image is not consulted.
    pub fn unmount(&self, name: &str) -> FilevolResult<()> {
        validate_name(name)?;

        let _guard = self.lock.write();

        let mount_path = self.layout.mount_path(name);
        self.tools
            .mounter
            .unmount(&mount_path)
            .map_err(|e| retarget(e, &mount_path))?;

        tracing::info!(volume = name, "Unmounted {}", mount_path.display());
        Ok(())
    }

    /// Look up one volume.
    ///
    /// # Errors
    ///
    /// `NotFound` if there is no image; it carries the same mount point a
    /// successful lookup would have returned.
    pub fn get(&self, name: &str) -> FilevolResult<Volume> {
        validate_name(name)?;

        let _guard = self.lock.read();

        let mountpoint = self.layout.mount_path(name);
        if !image_exists(&self.layout.image_path(name))? {
            return Err(FilevolError::NotFound {
                name: name.to_string(),
                mountpoint,
            });
        }

        Ok(Volume {
            name: name.to_string(),
            mountpoint,
        })
    }

    /// All volumes with an image in the volume directory, in directory order.
    pub fn list(&self) -> FilevolResult<Vec<Volume>> {
        let _guard = self.lock.read();

        let dir = self.layout.volume_dir();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Volume directory {} does not exist", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(FilevolError::Storage(format!(
                    "Failed to read volume directory {}: {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut volumes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                FilevolError::Storage(format!(
                    "Failed to read volume directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;

            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }

            let Some(name) = VolumeLayout::name_from_image(&entry.path()) else {
                continue;
            };
            if validate_name(&name).is_err() {
                tracing::warn!("Skipping image with unusable name: {}", entry.path().display());
                continue;
            }

            let mountpoint = self.layout.mount_path(&name);
            volumes.push(Volume { name, mountpoint });
        }

        Ok(volumes)
    }

    /// Mount point for `name`, whether or not it is mounted or even exists.
    pub fn path(&self, name: &str) -> FilevolResult<PathBuf> {
        validate_name(name)?;
        Ok(self.layout.mount_path(name))
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            scope: Scope::Local,
        }
    }
}

fn image_exists(image: &Path) -> FilevolResult<bool> {
    match std::fs::metadata(image) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FilevolError::Storage(format!(
            "Failed to stat {}: {}",
            image.display(),
            e
        ))),
    }
}

/// `mkdir -p` with mode 0700; an existing directory is fine.
fn create_mount_dir(path: &Path) -> FilevolResult<()> {
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(MOUNT_DIR_MODE)
        .create(path)
        .map_err(|e| {
            tracing::error!("Mount: mkdir error: {}: {}", path.display(), e);
            FilevolError::Storage(format!(
                "Failed to create mount point {}: {}",
                path.display(),
                e
            ))
        })
}

/// Point a mounter's tool failure at the manager's mount point.
fn retarget(err: FilevolError, mount_path: &Path) -> FilevolError {
    match err {
        FilevolError::ToolFailure {
            op, status, output, ..
        } => FilevolError::ToolFailure {
            op,
            target: mount_path.to_path_buf(),
            status,
            output,
        },
        other => other,
    }
}
