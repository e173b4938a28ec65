//! Compiler/platform compatibility validation.
//!
//! An advisory gate over the caller's profile: it accepts or rejects the
//! combination the caller intends to build with, and never mutates the
//! configuration. Every rule is checked against a static support table;
//! compiler families outside the table pass unconstrained.

use crate::core::profile::{BuildProfile, CompilerFamily, CppStandard, StdlibVariant};
use crate::core::version::PackageVersion;
use crate::resolver::errors::ConfigError;

/// The oldest language standard any published component compiles under.
pub const MINIMUM_CPP_STANDARD: CppStandard = CppStandard::Cpp17;

/// Minimum supported version per compiler family.
///
/// Unknown families are unconstrained: the table is a floor for
/// toolchains we know about, not an allowlist.
fn minimum_compiler_version(family: &CompilerFamily) -> Option<PackageVersion> {
    match family {
        CompilerFamily::Gcc => Some(PackageVersion::new(8, 0, 0)),
        CompilerFamily::Clang => Some(PackageVersion::new(8, 0, 0)),
        CompilerFamily::AppleClang => Some(PackageVersion::new(12, 0, 0)),
        CompilerFamily::Msvc => Some(PackageVersion::new(191, 0, 0)),
        CompilerFamily::VisualStudio => Some(PackageVersion::new(15, 0, 0)),
        CompilerFamily::Other(_) => None,
    }
}

/// Standard-library variants a family is allowed to build with, where
/// the family is constrained at all.
fn accepted_stdlibs(family: &CompilerFamily) -> Option<&'static [StdlibVariant]> {
    match family {
        // gcc links only against the dual-ABI libstdc++
        CompilerFamily::Gcc => Some(&[StdlibVariant::Libstdcxx11]),
        // clang may use either modern variant
        CompilerFamily::Clang => Some(&[StdlibVariant::Libstdcxx11, StdlibVariant::Libcxx]),
        _ => None,
    }
}

/// Validate a profile against the support table.
///
/// Each rule is independent and all must hold; the first violation is
/// returned and aborts the resolution.
pub fn validate(profile: &BuildProfile) -> Result<(), ConfigError> {
    check_cppstd(profile)?;
    check_compiler_floor(profile)?;
    check_stdlib_abi(profile)?;
    Ok(())
}

fn check_cppstd(profile: &BuildProfile) -> Result<(), ConfigError> {
    match profile.cppstd {
        Some(std) if std >= MINIMUM_CPP_STANDARD => Ok(()),
        Some(std) => Err(ConfigError::UnsupportedStandard {
            found: std.to_string(),
        }),
        // No standard in the profile: fail closed rather than guess a
        // compiler default.
        None => Err(ConfigError::UnsupportedStandard {
            found: "(not set)".to_string(),
        }),
    }
}

fn check_compiler_floor(profile: &BuildProfile) -> Result<(), ConfigError> {
    if let Some(minimum) = minimum_compiler_version(&profile.compiler) {
        if profile.compiler_version < minimum {
            return Err(ConfigError::UnsupportedCompiler {
                compiler: profile.compiler.clone(),
                version: profile.compiler_version.clone(),
                minimum,
            });
        }
    }
    Ok(())
}

fn check_stdlib_abi(profile: &BuildProfile) -> Result<(), ConfigError> {
    let Some(accepted) = accepted_stdlibs(&profile.compiler) else {
        return Ok(());
    };

    let ok = profile
        .stdlib
        .as_ref()
        .is_some_and(|stdlib| accepted.contains(stdlib));
    if ok {
        return Ok(());
    }

    Err(ConfigError::IncompatibleStdlibAbi {
        compiler: profile.compiler.clone(),
        found: profile
            .stdlib
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
        accepted: accepted.iter().map(|s| s.to_string()).collect(),
    })
}
