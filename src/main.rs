use std::path::PathBuf;

use anyhow::{Result, anyhow};
use render_state_forge::{
    dsl,
    fields::ActiveFields,
    generation::{GenerationOptions, render_state_block},
    presets,
    render_state::RenderStateCollection,
};

#[derive(Debug, Default, Clone)]
struct Cli {
    pass_json: Option<PathBuf>,
    preset: Option<String>,
    fields: Vec<String>,
    indent: Option<usize>,
    list_presets: bool,
}

const USAGE: &str = concat!(
    "supported: --pass <pass.json>, --preset <name>, --field <Tag.Name>, ",
    "--indent <n>, --list-presets"
);

fn parse_cli(args: &[String]) -> Result<Cli> {
    let mut cli = Cli::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--list-presets" => {
                cli.list_presets = true;
                i += 1;
            }
            "--pass" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(anyhow!("missing value for --pass"));
                };
                cli.pass_json = Some(PathBuf::from(v));
                i += 2;
            }
            "--preset" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(anyhow!("missing value for --preset"));
                };
                cli.preset = Some(v.clone());
                i += 2;
            }
            "--field" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(anyhow!("missing value for --field"));
                };
                cli.fields.push(v.clone());
                i += 2;
            }
            "--indent" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(anyhow!("missing value for --indent"));
                };
                let n = v
                    .parse::<usize>()
                    .map_err(|e| anyhow!("invalid --indent value {v}: {e}"))?;
                cli.indent = Some(n);
                i += 2;
            }
            other => {
                return Err(anyhow!("unknown argument: {other} ({USAGE})"));
            }
        }
    }
    if cli.pass_json.is_some() && cli.preset.is_some() {
        return Err(anyhow!("--pass and --preset are mutually exclusive"));
    }
    Ok(cli)
}

fn load_collection(cli: &Cli) -> Result<RenderStateCollection> {
    if let Some(path) = cli.pass_json.as_deref() {
        let pass = dsl::load_pass_state_from_path(path)?;
        log::info!(
            "[pass] {} ({} states, preset {})",
            pass.metadata.name,
            pass.states.len(),
            pass.preset.as_deref().unwrap_or("none")
        );
        return dsl::build_collection(&pass);
    }
    if let Some(name) = cli.preset.as_deref() {
        return presets::load_default_presets()?.collection(name);
    }
    Err(anyhow!("nothing to render: pass --pass or --preset ({USAGE})"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_cli(&argv)?;

    if cli.list_presets {
        for name in presets::load_default_presets()?.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let collection = load_collection(&cli)?;
    let fields: ActiveFields = cli.fields.iter().cloned().collect();
    let mut options = GenerationOptions::default();
    if let Some(indent) = cli.indent {
        options.indent_width = indent;
    }

    log::debug!(
        "[render-state] {} entries, {} active fields",
        collection.len(),
        fields.len()
    );
    println!("{}", render_state_block(&collection, &fields, options));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_cli_preset_with_fields() {
        let cli = parse_cli(&args(&[
            "--preset",
            "Uber",
            "--field",
            "SurfaceType.Transparent",
            "--field",
            "DoubleSided",
            "--indent",
            "2",
        ]))
        .unwrap();
        assert_eq!(cli.preset.as_deref(), Some("Uber"));
        assert_eq!(cli.fields, vec!["SurfaceType.Transparent", "DoubleSided"]);
        assert_eq!(cli.indent, Some(2));
        assert!(cli.pass_json.is_none());
    }

    #[test]
    fn parse_cli_rejects_conflicting_sources_and_unknown_flags() {
        assert!(parse_cli(&args(&["--pass", "p.json", "--preset", "Opaque"])).is_err());
        assert!(parse_cli(&args(&["--verbose"])).is_err());
        assert!(parse_cli(&args(&["--field"])).is_err());
        assert!(parse_cli(&args(&["--indent", "four"])).is_err());
    }

    #[test]
    fn preset_collection_loads_from_cli() {
        let cli = parse_cli(&args(&["--preset", "DepthOnly"])).unwrap();
        let collection = load_collection(&cli).unwrap();
        assert_eq!(collection.len(), 4);
    }
}
