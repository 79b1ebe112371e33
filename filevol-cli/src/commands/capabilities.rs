pub fn execute(global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let manager = global.create_manager()?;
    println!("{}", serde_json::to_string(&manager.capabilities())?);
    Ok(())
}
