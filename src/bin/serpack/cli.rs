//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// serpack - package configuration resolver for BitSerializer
#[derive(Parser)]
#[command(name = "serpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the full configuration for a release
    Resolve(ResolveArgs),

    /// Check a compiler profile against the support table
    Validate(ValidateArgs),

    /// Show the external requirements for a release and option set
    Requirements(RequirementsArgs),

    /// Show the published component graph
    Components(ComponentsArgs),

    /// List releases known to the source index
    Releases(ReleasesArgs),

    /// Download, verify and extract a release's sources
    Fetch(FetchArgs),

    /// Resolve, then build and install through CMake
    Build(BuildArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Compiler/platform profile inputs, shared by several commands.
///
/// A profile file provides the base; individual flags override it.
#[derive(Args)]
pub struct ProfileArgs {
    /// Profile TOML file with settings and an optional [options] table
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Target operating system (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,

    /// Target architecture (defaults to the host)
    #[arg(long)]
    pub arch: Option<String>,

    /// Compiler family (gcc, clang, apple-clang, msvc, visual-studio)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Compiler version (e.g. 11, 191, 14.0)
    #[arg(long)]
    pub compiler_version: Option<String>,

    /// Standard library variant (libstdc++11, libc++, ...)
    #[arg(long)]
    pub stdlib: Option<String>,

    /// C++ standard (17, 20, 23)
    #[arg(long = "std")]
    pub cppstd: Option<String>,

    /// Build type (debug, release, relwithdebinfo, minsizerel)
    #[arg(long)]
    pub build_type: Option<String>,
}

/// Package option inputs, shared by several commands.
#[derive(Args)]
pub struct OptionArgs {
    /// Set a package option (repeatable), e.g. -o with_csv=true
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Package version to resolve (e.g. 0.80)
    pub version: String,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Emit the resolution as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Args)]
pub struct RequirementsArgs {
    /// Package version (e.g. 0.80)
    pub version: String,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Target operating system (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,

    /// Emit the requirement list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ComponentsArgs {
    /// Package version (e.g. 0.80)
    pub version: String,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Emit the component graph as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ReleasesArgs {
    /// Source index TOML file replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub sources: Option<PathBuf>,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Package version to fetch (e.g. 0.80)
    pub version: String,

    /// Directory to extract into (defaults to the user cache)
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Source index TOML file replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub sources: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Package version to build (e.g. 0.80)
    pub version: String,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Extracted source tree (fetched first when omitted)
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Build directory
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Install prefix
    #[arg(long, value_name = "DIR")]
    pub prefix: PathBuf,

    /// Source index TOML file replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub sources: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
