use clap::Args;

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Name of the volume
    pub name: String,
}

pub fn execute(args: PathArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let manager = global.create_manager()?;
    println!("{}", manager.path(&args.name)?.display());
    Ok(())
}
