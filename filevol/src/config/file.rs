//! Line-oriented `key=value` config file.
//!
//! ```text
//! # comment
//! size=208896
//! path=/mnt/data/apps
//! fstyp=ext4
//! ```

use std::path::{Path, PathBuf};

use crate::constants::config_keys;
use crate::errors::{FilevolError, FilevolResult};

use super::FilevolOptions;

/// Values recognized in a config file. Absent keys leave defaults alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub size: Option<u64>,
    pub path: Option<PathBuf>,
    pub fs_type: Option<String>,
}

impl ConfigFile {
    /// Read and parse `path`. Returns `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> FilevolResult<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(None);
            }
            Err(e) => {
                return Err(FilevolError::Config(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let file = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), config = ?file, "Loaded config file");
        Ok(Some(file))
    }

    pub fn parse(content: &str) -> FilevolResult<Self> {
        let mut file = Self::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = idx + 1, "Ignoring config line without '=': {}", line);
                continue;
            };
            let value = value.trim();

            match key.trim() {
                config_keys::SIZE => {
                    let size = value.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                        FilevolError::Config(format!(
                            "line {}: size must be a positive block count, got '{}'",
                            idx + 1,
                            value
                        ))
                    })?;
                    file.size = Some(size);
                }
                config_keys::PATH => {
                    if value.is_empty() {
                        return Err(FilevolError::Config(format!(
                            "line {}: path must not be empty",
                            idx + 1
                        )));
                    }
                    file.path = Some(PathBuf::from(value));
                }
                config_keys::FS_TYPE => {
                    if value.is_empty() {
                        return Err(FilevolError::Config(format!(
                            "line {}: fstyp must not be empty",
                            idx + 1
                        )));
                    }
                    file.fs_type = Some(value.to_string());
                }
                other => {
                    tracing::warn!(line = idx + 1, key = other, "Ignoring unknown config key");
                }
            }
        }

        Ok(file)
    }

    pub fn apply(&self, options: &mut FilevolOptions) {
        if let Some(size) = self.size {
            options.default_size = size;
        }
        if let Some(path) = &self.path {
            options.volume_dir = path.clone();
        }
        if let Some(fs_type) = &self.fs_type {
            options.fs_type = fs_type.clone();
        }
    }
}
