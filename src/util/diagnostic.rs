//! User-friendly diagnostic messages.
//!
//! Every error shown to the user should name the root cause, the
//! constraint that was violated, and at least one way out.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no profile information is available.
    pub const NO_PROFILE: &str =
        "help: Pass --profile <file> or the --compiler/--compiler-version flags";

    /// Suggestion when a release is not in the source index.
    pub const UNKNOWN_RELEASE: &str =
        "help: Run `serpack releases` to list known releases, or pass --sources <file>";

    /// Suggestion when a download or checksum fails.
    pub const FETCH_FAILED: &str =
        "help: Check your network connection, or point --sources at a mirror";

    /// Suggestion when cmake cannot be found for a compiled build.
    pub const NO_CMAKE: &str =
        "help: Install CMake, or resolve a header-only configuration instead";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
                Severity::Note => "\x1b[1;36mnote\x1b[0m",
                Severity::Help => "\x1b[1;32mhelp\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Note => "note",
                Severity::Help => "help",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        for ctx in &self.context {
            output.push_str(&format!("  -> {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

/// Release not present in the source index.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("release `{version}` is not in the source index")]
#[diagnostic(code(serpack::sources::unknown_release))]
pub struct UnknownReleaseError {
    pub version: String,
    #[help]
    pub known: Option<String>,
}

/// Downloaded archive does not match its published checksum.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("checksum mismatch for `{url}`")]
#[diagnostic(
    code(serpack::sources::checksum_mismatch),
    help("The download may be corrupted or the index stale; retry or use a different mirror")
)]
pub struct ChecksumMismatchError {
    pub url: String,
    pub expected: String,
    pub found: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("gcc 7 is below the supported floor")
            .with_context("the package requires at least gcc 8")
            .with_suggestion("Upgrade to gcc 8 or newer");

        let output = diag.format(false);
        assert!(output.contains("error: gcc 7 is below the supported floor"));
        assert!(output.contains("-> the package requires at least gcc 8"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Upgrade to gcc 8 or newer"));
    }

    #[test]
    fn test_checksum_error_display() {
        let err = ChecksumMismatchError {
            url: "https://example.com/pkg.tar.gz".to_string(),
            expected: "aa".to_string(),
            found: "bb".to_string(),
        };
        assert!(err.to_string().contains("checksum mismatch"));
    }
}
