use clap::Args;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Name of the volume(s) to inspect
    #[arg(required = true, num_args = 1..)]
    pub targets: Vec<String>,
}

pub fn execute(args: InspectArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let manager = global.create_manager()?;

    let mut volumes = Vec::new();
    let mut errors = Vec::new();
    for target in &args.targets {
        match manager.get(target) {
            Ok(volume) => volumes.push(volume),
            Err(e) => {
                eprintln!("Error: {}", e);
                errors.push(target.as_str());
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&volumes)?);

    if !errors.is_empty() {
        anyhow::bail!("No such volume(s): {}", errors.join(", "));
    }
    Ok(())
}
