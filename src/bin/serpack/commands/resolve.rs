//! `serpack resolve` command

use anyhow::{bail, Result};

use crate::cli::ResolveArgs;
use crate::commands::{gather_input, parse_version};
use serpack::ops::resolve::{resolve_recipe, Resolution};
use serpack::util::diagnostic;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let version = parse_version(&args.version)?;
    let (profile, options) = gather_input(&args.profile, &args.options)?;

    let resolution = match resolve_recipe(&version, &options, &profile) {
        Ok(resolution) => resolution,
        Err(err) => {
            diagnostic::emit(&err.to_diagnostic(), false);
            bail!("unsupported configuration for bitserializer/{}", version);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        print_resolution(&resolution);
    }

    Ok(())
}

fn print_resolution(resolution: &Resolution) {
    println!(
        "bitserializer/{}: {}",
        resolution.version, resolution.mode
    );
    println!("fingerprint: {}", resolution.fingerprint);
    println!();

    println!("options:");
    for (name, value) in resolution.options.entries() {
        println!("  {} = {}", name, value);
    }
    println!();

    if resolution.requirements.is_empty() {
        println!("requirements: (none)");
    } else {
        println!("requirements:");
        for req in &resolution.requirements {
            println!("  {}", req.reference());
        }
    }
    println!();

    println!("components:");
    super::components::print_graph(&resolution.components);

    if !resolution.build_switches.is_empty() {
        println!();
        println!("build switches:");
        for (switch, enabled) in &resolution.build_switches {
            println!("  {} = {}", switch, if *enabled { "ON" } else { "OFF" });
        }
    }
}
