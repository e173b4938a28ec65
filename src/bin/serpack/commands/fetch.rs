//! `serpack fetch` command

use anyhow::Result;

use crate::cli::FetchArgs;
use crate::commands::{load_index, parse_version};
use serpack::ops::fetch::{fetch_source, FetchOptions};

pub fn execute(args: FetchArgs) -> Result<()> {
    let version = parse_version(&args.version)?;
    let index = load_index(args.sources.as_deref())?;

    let dir = fetch_source(&FetchOptions {
        version,
        dest: args.dest,
        index,
    })?;

    println!("{}", dir.display());
    Ok(())
}
