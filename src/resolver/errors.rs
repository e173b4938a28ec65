//! Configuration error types and diagnostics.

use thiserror::Error;

use crate::core::profile::CompilerFamily;
use crate::core::version::PackageVersion;
use crate::util::diagnostic::Diagnostic;

/// A compiler/platform combination the package cannot be built for.
///
/// Raised by the compatibility validator; always fatal to the
/// resolution. There is no partial acceptance and no recovery path.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("C++ standard {found} is not supported, C++17 or newer is required")]
    UnsupportedStandard { found: String },

    #[error("{compiler} {version} is not supported, need {compiler} {minimum} or newer")]
    UnsupportedCompiler {
        compiler: CompilerFamily,
        version: PackageVersion,
        minimum: PackageVersion,
    },

    #[error("standard library `{found}` cannot link {compiler} builds of this package")]
    IncompatibleStdlibAbi {
        compiler: CompilerFamily,
        found: String,
        accepted: Vec<String>,
    },
}

impl ConfigError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::UnsupportedStandard { found } => {
                Diagnostic::error(format!(
                    "C++ standard {} is not supported by this package",
                    found
                ))
                .with_context("every published component requires C++17 language features")
                .with_suggestion("Set `cppstd = \"17\"` (or newer) in the profile")
            }

            ConfigError::UnsupportedCompiler {
                compiler,
                version,
                minimum,
            } => Diagnostic::error(format!(
                "{} {} is below the supported floor",
                compiler, version
            ))
            .with_context(format!(
                "the package requires at least {} {}",
                compiler, minimum
            ))
            .with_suggestion(format!("Upgrade to {} {} or newer", compiler, minimum))
            .with_suggestion("Switch the profile to a supported compiler family"),

            ConfigError::IncompatibleStdlibAbi {
                compiler,
                found,
                accepted,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "standard library `{}` is not binary-compatible with {} builds",
                    found, compiler
                ));
                diag = diag.with_context(format!(
                    "accepted for {}: {}",
                    compiler,
                    accepted.join(", ")
                ));
                for variant in accepted {
                    diag = diag
                        .with_suggestion(format!("Set `stdlib = \"{}\"` in the profile", variant));
                }
                diag
            }
        }
    }
}
