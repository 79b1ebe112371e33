use clap::{Args, ValueEnum};
use comfy_table::{Table, presets};
use filevol::Volume;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only print volume names
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn execute(args: ListArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let manager = global.create_manager()?;

    let mut volumes = manager.list()?;
    // directory order is arbitrary; keep the output stable
    volumes.sort_by(|a, b| a.name.cmp(&b.name));

    if args.quiet {
        for volume in &volumes {
            println!("{}", volume.name);
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&volumes)?),
        OutputFormat::Table => println!("{}", render_table(&volumes)),
    }
    Ok(())
}

fn render_table(volumes: &[Volume]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_header(vec!["NAME", "MOUNTPOINT"]);

    for volume in volumes {
        table.add_row(vec![
            volume.name.clone(),
            volume.mountpoint.display().to_string(),
        ]);
    }
    table
}
