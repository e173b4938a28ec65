//! `serpack releases` command

use anyhow::Result;

use crate::cli::ReleasesArgs;
use crate::commands::load_index;

pub fn execute(args: ReleasesArgs) -> Result<()> {
    let index = load_index(args.sources.as_deref())?;

    if index.is_empty() {
        println!("no releases in the source index");
        return Ok(());
    }

    for version in index.versions() {
        // get() cannot miss for a key we just iterated
        if let Some(location) = index.get(version) {
            println!("{}\t{}", version, location.url);
        }
    }
    Ok(())
}
