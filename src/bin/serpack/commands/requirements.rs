//! `serpack requirements` command

use anyhow::Result;

use crate::cli::RequirementsArgs;
use crate::commands::{parse_option_flags, parse_version};
use serpack::core::profile::host_os;
use serpack::resolver::options::resolve_options;
use serpack::resolver::requirements::build_requirements;

pub fn execute(args: RequirementsArgs) -> Result<()> {
    let version = parse_version(&args.version)?;
    let raw = parse_option_flags(&args.options.options)?;
    let os = args.os.unwrap_or_else(|| host_os().to_string());

    let (options, _) = resolve_options(&raw, &version, &os);
    let requirements = build_requirements(&options, &version);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&requirements)?);
        return Ok(());
    }

    if requirements.is_empty() {
        println!("no external requirements");
        return Ok(());
    }

    for req in &requirements {
        println!(
            "{} (transitive headers: {}, transitive libs: {})",
            req.reference(),
            req.transitive_headers,
            req.transitive_libs
        );
    }
    Ok(())
}
