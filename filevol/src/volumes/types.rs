use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::create_options;
use crate::errors::{FilevolError, FilevolResult};

/// Public description of a volume.
///
/// `mountpoint` is where the volume is (or would be) mounted; it is derived
/// from the name and says nothing about whether a mount is active.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Volume {
    pub name: String,
    pub mountpoint: PathBuf,
}

/// Options accepted by Create.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Size in 512-byte blocks, as the caller sent it.
    #[serde(default)]
    pub size: Option<String>,

    /// Existing volume to copy the new image from.
    #[serde(default)]
    pub source: Option<String>,
}

impl CreateOptions {
    /// Pick the recognized keys out of a request's option map.
    ///
    /// Unknown keys are ignored; empty values count as unset.
    pub fn from_map(options: &HashMap<String, String>) -> Self {
        let pick = |key: &str| {
            options
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            size: pick(create_options::SIZE),
            source: pick(create_options::SOURCE),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Requested size in blocks, or `default` when none was given.
    pub fn size_blocks(&self, default: u64) -> FilevolResult<u64> {
        let Some(size) = self.size.as_deref() else {
            return Ok(default);
        };

        match size.trim().parse::<u64>() {
            Ok(blocks) if blocks > 0 => Ok(blocks),
            _ => Err(FilevolError::InvalidArgument(format!(
                "size must be a positive block count, got '{}'",
                size
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Volumes exist only on this host.
    Local,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub scope: Scope,
}
