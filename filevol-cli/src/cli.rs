use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use filevol::constants::{envs, paths};
use filevol::{FilevolOptions, VolumeManager};

use crate::commands;

#[derive(Parser, Debug)]
#[command(
    name = "filevol",
    version,
    about = "Manage file-backed loopback volumes"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// Config file with size=, path= and fstyp= lines
    #[arg(long, global = true, env = envs::FILEVOL_CONFIG, default_value = paths::CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding mount points
    #[arg(long, global = true, env = envs::FILEVOL_HOME)]
    pub home: Option<PathBuf>,

    /// Directory holding image files (overrides `path` from the config file)
    #[arg(long, global = true)]
    pub volume_dir: Option<PathBuf>,

    /// Filesystem type for new images (overrides `fstyp`)
    #[arg(long, global = true)]
    pub fs_type: Option<String>,

    /// Default image size in 512-byte blocks (overrides `size`)
    #[arg(long, global = true)]
    pub default_size: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Also write logs to this file
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        default_missing_value = paths::LOG_FILE
    )]
    pub log_file: Option<PathBuf>,
}

impl GlobalFlags {
    /// Defaults, then the config file, then command-line flags.
    pub fn options(&self) -> anyhow::Result<FilevolOptions> {
        let mut options = FilevolOptions::load(&self.config)?;

        if let Some(home) = &self.home {
            options.mount_home = home.clone();
        }
        if let Some(dir) = &self.volume_dir {
            options.volume_dir = dir.clone();
        }
        if let Some(fs_type) = &self.fs_type {
            options.fs_type = fs_type.clone();
        }
        if let Some(size) = self.default_size {
            options.default_size = size;
        }

        Ok(options)
    }

    pub fn create_manager(&self) -> anyhow::Result<VolumeManager> {
        let options = self.options()?;
        tracing::debug!(options = ?options, "Effective options");
        Ok(VolumeManager::new(options)?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a volume image
    Create(commands::create::CreateArgs),

    /// Remove one or more volume images
    Rm(commands::rm::RmArgs),

    /// Loop-mount a volume and print its mount point
    Mount(commands::mount::MountArgs),

    /// Unmount a volume
    Unmount(commands::unmount::UnmountArgs),

    /// Show volumes as JSON
    Inspect(commands::inspect::InspectArgs),

    /// List volumes
    #[command(visible_alias = "ls")]
    List(commands::list::ListArgs),

    /// Print the mount point a volume uses
    Path(commands::path::PathArgs),

    /// Print the driver's capabilities
    Capabilities,

    /// Print the effective configuration
    Info,
}

impl Commands {
    pub fn execute(self, global: &GlobalFlags) -> anyhow::Result<()> {
        match self {
            Commands::Create(args) => commands::create::execute(args, global),
            Commands::Rm(args) => commands::rm::execute(args, global),
            Commands::Mount(args) => commands::mount::execute(args, global),
            Commands::Unmount(args) => commands::unmount::execute(args, global),
            Commands::Inspect(args) => commands::inspect::execute(args, global),
            Commands::List(args) => commands::list::execute(args, global),
            Commands::Path(args) => commands::path::execute(args, global),
            Commands::Capabilities => commands::capabilities::execute(global),
            Commands::Info => commands::info::execute(global),
        }
    }
}
