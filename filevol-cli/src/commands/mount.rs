use clap::Args;

#[derive(Args, Debug)]
pub struct MountArgs {
    /// Name of the volume to mount
    pub name: String,
}

pub fn execute(args: MountArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let manager = global.create_manager()?;
    manager.prepare()?;

    match manager.mount(&args.name) {
        Ok(mountpoint) => {
            println!("{}", mountpoint.display());
            Ok(())
        }
        Err(e) => {
            if let Some(target) = e.tool_target() {
                eprintln!("Mount point: {}", target.display());
            }
            Err(e.into())
        }
    }
}
