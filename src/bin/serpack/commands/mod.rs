//! Command implementations.

pub mod build;
pub mod completions;
pub mod components;
pub mod fetch;
pub mod releases;
pub mod requirements;
pub mod resolve;
pub mod validate;

use anyhow::{bail, Context, Result};

use serpack::core::options::RawOptions;
use serpack::core::profile::{BuildProfile, CompilerFamily, ProfileFile, StdlibVariant};
use serpack::core::version::PackageVersion;
use serpack::sources::SourceIndex;

use crate::cli::{OptionArgs, ProfileArgs};

/// Parse a package version argument.
pub fn parse_version(s: &str) -> Result<PackageVersion> {
    PackageVersion::parse(s).with_context(|| format!("invalid package version `{}`", s))
}

/// Assemble the effective profile and options: profile file first, CLI
/// flags override, `-o` flags override the file's `[options]` table.
pub fn gather_input(
    profile_args: &ProfileArgs,
    option_args: &OptionArgs,
) -> Result<(BuildProfile, RawOptions)> {
    let mut doc = match &profile_args.profile {
        Some(path) => ProfileFile::load(path)?,
        None => ProfileFile::default(),
    };

    if let Some(os) = &profile_args.os {
        doc.os = Some(os.clone());
    }
    if let Some(arch) = &profile_args.arch {
        doc.arch = Some(arch.clone());
    }
    if let Some(compiler) = &profile_args.compiler {
        doc.compiler = Some(CompilerFamily::from(compiler.clone()));
    }
    if let Some(version) = &profile_args.compiler_version {
        doc.compiler_version = Some(
            PackageVersion::parse(version)
                .with_context(|| format!("invalid compiler version `{}`", version))?,
        );
    }
    if let Some(stdlib) = &profile_args.stdlib {
        doc.stdlib = Some(StdlibVariant::from(stdlib.clone()));
    }
    if let Some(cppstd) = &profile_args.cppstd {
        doc.cppstd = Some(cppstd.parse().map_err(anyhow::Error::msg)?);
    }
    if let Some(build_type) = &profile_args.build_type {
        doc.build_type = Some(build_type.parse().map_err(anyhow::Error::msg)?);
    }

    let (profile, mut options) = doc.into_profile()?;

    let cli_options = parse_option_flags(&option_args.options)?;
    options.merge(&cli_options);

    Ok((profile, options))
}

/// Parse repeated `-o NAME=VALUE` flags into an option bag.
pub fn parse_option_flags(flags: &[String]) -> Result<RawOptions> {
    let mut raw = RawOptions::default();

    for flag in flags {
        let Some((name, value)) = flag.split_once('=') else {
            bail!("invalid option `{}`\nhelp: expected NAME=VALUE, e.g. -o with_csv=true", flag);
        };

        let value = match value.trim() {
            "true" | "True" | "1" | "on" => true,
            "false" | "False" | "0" | "off" => false,
            other => bail!(
                "invalid value `{}` for option `{}`\nhelp: options are boolean, use true or false",
                other,
                name
            ),
        };

        raw.set(name.trim(), value)?;
    }

    Ok(raw)
}

/// Load the source index from a file, or fall back to the built-in one.
pub fn load_index(sources: Option<&std::path::Path>) -> Result<SourceIndex> {
    match sources {
        Some(path) => SourceIndex::load(path),
        None => Ok(SourceIndex::builtin()),
    }
}
