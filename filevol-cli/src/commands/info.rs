pub fn execute(global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let options = global.options()?;
    options.validate()?;
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}
