//! Configuration for filevol.
//!
//! Precedence, lowest first: built-in defaults, the config file, then
//! whatever the caller sets on [`FilevolOptions`] directly.

mod file;
mod options;

pub use file::ConfigFile;
pub use options::FilevolOptions;
