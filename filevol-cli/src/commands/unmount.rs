use clap::Args;

#[derive(Args, Debug)]
pub struct UnmountArgs {
    /// Name of the volume to unmount
    pub name: String,
}

pub fn execute(args: UnmountArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let manager = global.create_manager()?;
    manager.unmount(&args.name)?;
    println!("{}", args.name);
    Ok(())
}
