//! `serpack build` command

use anyhow::{bail, Result};

use crate::cli::BuildArgs;
use crate::commands::{gather_input, load_index, parse_version};
use serpack::ops::fetch::{fetch_source, FetchOptions};
use serpack::ops::install::{install, InstallOptions};
use serpack::ops::resolve::resolve_recipe;
use serpack::util::diagnostic;

pub fn execute(args: BuildArgs) -> Result<()> {
    let version = parse_version(&args.version)?;
    let (profile, options) = gather_input(&args.profile, &args.options)?;

    let resolution = match resolve_recipe(&version, &options, &profile) {
        Ok(resolution) => resolution,
        Err(err) => {
            diagnostic::emit(&err.to_diagnostic(), false);
            bail!("unsupported configuration for bitserializer/{}", version);
        }
    };

    let source_dir = match args.source_dir {
        Some(dir) => dir,
        None => {
            let index = load_index(args.sources.as_deref())?;
            fetch_source(&FetchOptions {
                version: version.clone(),
                dest: None,
                index,
            })?
        }
    };

    let build_dir = args
        .build_dir
        .unwrap_or_else(|| source_dir.join("build"));

    install(
        &resolution,
        &InstallOptions {
            source_dir,
            build_dir,
            prefix: args.prefix.clone(),
        },
    )?;

    println!(
        "installed bitserializer/{} ({}) to {}",
        version,
        resolution.mode,
        args.prefix.display()
    );
    Ok(())
}
