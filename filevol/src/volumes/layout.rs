//! Name ↔ path derivation.
//!
//! Nothing about a volume is stored: its image path and mount path are
//! recomputed from its name every time, and its name is recovered from the
//! image filename when listing.

use std::path::{Path, PathBuf};

use crate::constants::image::EXTENSION;
use crate::errors::{FilevolError, FilevolResult};

/// Where image files and mount points live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeLayout {
    volume_dir: PathBuf,
    mount_home: PathBuf,
}

impl VolumeLayout {
    pub fn new(volume_dir: impl Into<PathBuf>, mount_home: impl Into<PathBuf>) -> Self {
        Self {
            volume_dir: volume_dir.into(),
            mount_home: mount_home.into(),
        }
    }

    pub fn volume_dir(&self) -> &Path {
        &self.volume_dir
    }

    pub fn mount_home(&self) -> &Path {
        &self.mount_home
    }

    /// Image file: `<volume_dir>/<name>.img`
    pub fn image_path(&self, name: &str) -> PathBuf {
        self.volume_dir.join(format!("{}.{}", name, EXTENSION))
    }

    /// Mount point: `<mount_home>/<name>`
    pub fn mount_path(&self, name: &str) -> PathBuf {
        self.mount_home.join(name)
    }

    /// Recover a volume name from an image path.
    ///
    /// Returns `None` for files that are not `<name>.img` with a non-empty
    /// name.
    pub fn name_from_image(image: &Path) -> Option<String> {
        let file_name = image.file_name()?.to_str()?;
        let name = file_name.strip_suffix(EXTENSION)?.strip_suffix('.')?;
        if name.is_empty() {
            return None;
        }
        Some(name.to_string())
    }
}

/// Check that `name` maps to exactly one image and one mount point.
///
/// Rejected: empty names, `.` and `..`, names containing `/` or NUL, and
/// names ending in the image extension.
pub fn validate_name(name: &str) -> FilevolResult<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name == "." || name == ".." {
        Some("must not be '.' or '..'")
    } else if name.contains('/') {
        Some("must not contain '/'")
    } else if name.contains('\0') {
        Some("must not contain NUL")
    } else if name.ends_with(&format!(".{}", EXTENSION)) {
        Some("must not end with the image extension")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(FilevolError::InvalidArgument(format!(
            "volume name {:?} {}",
            name, reason
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout() -> VolumeLayout {
        VolumeLayout::new("/mnt/data/apps", "/var/lib/docker-filevol-plugin")
    }

    #[test]
    fn test_image_path() {
        assert_eq!(
            layout().image_path("web"),
            PathBuf::from("/mnt/data/apps/web.img")
        );
    }

    #[test]
    fn test_mount_path() {
        assert_eq!(
            layout().mount_path("web"),
            PathBuf::from("/var/lib/docker-filevol-plugin/web")
        );
    }

    #[test]
    fn test_name_from_image() {
        assert_eq!(
            VolumeLayout::name_from_image(Path::new("/mnt/data/apps/web.img")),
            Some("web".to_string())
        );
        assert_eq!(
            VolumeLayout::name_from_image(Path::new("db.v2.img")),
            Some("db.v2".to_string())
        );
    }

    #[test]
    fn test_name_from_image_rejects_other_files() {
        for path in ["/vols/.img", "/vols/web.raw", "/vols/webimg", "/vols/web.img.bak", "/"] {
            assert_eq!(VolumeLayout::name_from_image(Path::new(path)), None, "{path}");
        }
    }

    #[test]
    fn test_validate_name() {
        for good in ["web", "db.v2", "a-b_c", ".hidden", "img"] {
            assert!(validate_name(good).is_ok(), "{good}");
        }
        for bad in ["", ".", "..", "a/b", "/abs", "nul\0", "web.img"] {
            assert!(
                matches!(validate_name(bad), Err(FilevolError::InvalidArgument(_))),
                "{bad:?}"
            );
        }
    }

    fn valid_name() -> impl Strategy<Value = String> {
        "[A-Za-z0-9._-]{1,24}".prop_filter("valid volume name", |n| validate_name(n).is_ok())
    }

    proptest! {
        #[test]
        fn prop_name_round_trips_through_image_path(name in valid_name()) {
            let image = layout().image_path(&name);
            prop_assert_eq!(VolumeLayout::name_from_image(&image), Some(name));
        }

        #[test]
        fn prop_distinct_names_never_share_paths(a in valid_name(), b in valid_name()) {
            prop_assume!(a != b);
            let layout = layout();
            prop_assert_ne!(layout.image_path(&a), layout.image_path(&b));
            prop_assert_ne!(layout.mount_path(&a), layout.mount_path(&b));
        }

        #[test]
        fn prop_paths_stay_inside_their_directories(name in valid_name()) {
            let layout = layout();
            let image = layout.image_path(&name);
            let mountpoint = layout.mount_path(&name);
            prop_assert_eq!(image.parent(), Some(layout.volume_dir()));
            prop_assert_eq!(mountpoint.parent(), Some(layout.mount_home()));
        }
    }
}
