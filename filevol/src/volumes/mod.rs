//! Volume lifecycle management.
//!
//! # Overview
//!
//! - **VolumeManager**: create/remove/mount/unmount/get/list over one
//!   volume directory and one mount home
//! - **VolumeLayout**: pure name → path derivations
//! - **Volume**: `{name, mountpoint}` descriptor returned by lookups
//!
//! # Example
//!
//! ```rust,no_run
//! use filevol::{CreateOptions, FilevolOptions, VolumeManager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = VolumeManager::new(FilevolOptions::default())?;
//! manager.prepare()?;
//!
//! manager.create("web", &CreateOptions::default().with_size("409600"))?;
//! let mountpoint = manager.mount("web")?;
//! println!("web mounted at {}", mountpoint.display());
//!
//! for volume in manager.list()? {
//!     println!("{} -> {}", volume.name, volume.mountpoint.display());
//! }
//! # Ok(())
//! # }
//! ```

mod layout;
mod manager;
mod types;

pub use layout::{VolumeLayout, validate_name};
pub use manager::{ToolSet, VolumeManager};
pub use types::{Capabilities, CreateOptions, Scope, Volume};
