use std::collections::HashMap;

use clap::Args;
use filevol::CreateOptions;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Size in 512-byte blocks (defaults to the configured size)
    #[arg(long)]
    pub size: Option<String>,

    /// Copy the image of this existing volume instead of formatting a new one
    #[arg(long)]
    pub source: Option<String>,

    /// Driver option as key=value, as passed by `docker volume create -o`
    #[arg(short = 'o', long = "opt", value_parser = parse_opt)]
    pub opts: Vec<(String, String)>,

    /// Name of the volume
    pub name: String,
}

fn parse_opt(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

impl CreateArgs {
    /// `-o` options first, explicit flags on top.
    fn create_options(&self) -> CreateOptions {
        let map: HashMap<String, String> = self.opts.iter().cloned().collect();
        let mut options = CreateOptions::from_map(&map);
        if let Some(size) = &self.size {
            options.size = Some(size.clone());
        }
        if let Some(source) = &self.source {
            options.source = Some(source.clone());
        }
        options
    }
}

pub fn execute(args: CreateArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let manager = global.create_manager()?;
    manager.prepare()?;

    manager.create(&args.name, &args.create_options())?;
    println!("{}", args.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(opts: &[(&str, &str)], size: Option<&str>, source: Option<&str>) -> CreateArgs {
        CreateArgs {
            size: size.map(str::to_string),
            source: source.map(str::to_string),
            opts: opts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            name: "web".to_string(),
        }
    }

    #[test]
    fn test_parse_opt() {
        assert_eq!(
            parse_opt("size=4096").unwrap(),
            ("size".to_string(), "4096".to_string())
        );
        assert!(parse_opt("size").is_err());
    }

    #[test]
    fn test_flags_win_over_opts() {
        let options = args(&[("size", "1"), ("source", "a")], Some("2"), None).create_options();
        assert_eq!(options.size.as_deref(), Some("2"));
        assert_eq!(options.source.as_deref(), Some("a"));
    }

    #[test]
    fn test_unknown_opts_ignored() {
        let options = args(&[("color", "blue")], None, None).create_options();
        assert_eq!(options, CreateOptions::default());
    }
}
