//! Compiler and platform profiles.
//!
//! A [`BuildProfile`] describes the toolchain a consumer intends to build
//! the package with: target platform, compiler family and version,
//! standard-library variant, C++ standard and build type. Profiles are
//! caller-supplied and read-only; the resolver never mutates them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::options::RawOptions;
use crate::core::version::PackageVersion;

/// Compiler family.
///
/// The supported families carry their own compatibility rules; anything
/// else is treated as an open-world `Other` and passes validation
/// unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompilerFamily {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
    /// Legacy Visual Studio toolset numbering (15, 16, ...).
    VisualStudio,
    Other(String),
}

impl CompilerFamily {
    /// Canonical name of the family.
    pub fn as_str(&self) -> &str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::VisualStudio => "visual-studio",
            CompilerFamily::Other(name) => name,
        }
    }
}

impl From<String> for CompilerFamily {
    fn from(s: String) -> Self {
        match s.as_str() {
            "gcc" | "g++" => CompilerFamily::Gcc,
            "clang" | "clang++" => CompilerFamily::Clang,
            "apple-clang" | "apple_clang" => CompilerFamily::AppleClang,
            "msvc" => CompilerFamily::Msvc,
            "visual-studio" | "Visual Studio" => CompilerFamily::VisualStudio,
            _ => CompilerFamily::Other(s),
        }
    }
}

impl From<CompilerFamily> for String {
    fn from(f: CompilerFamily) -> String {
        f.as_str().to_string()
    }
}

impl FromStr for CompilerFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CompilerFamily::from(s.to_string()))
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Standard-library variant a compiled component must match to link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StdlibVariant {
    /// GNU libstdc++ with the pre-C++11 ABI.
    LibstdcxxLegacy,
    /// GNU libstdc++ with the dual-ABI (`_GLIBCXX_USE_CXX11_ABI`) layout.
    Libstdcxx11,
    /// LLVM libc++.
    Libcxx,
    Other(String),
}

impl StdlibVariant {
    /// Canonical name as it appears in profiles.
    pub fn as_str(&self) -> &str {
        match self {
            StdlibVariant::LibstdcxxLegacy => "libstdc++",
            StdlibVariant::Libstdcxx11 => "libstdc++11",
            StdlibVariant::Libcxx => "libc++",
            StdlibVariant::Other(name) => name,
        }
    }
}

impl From<String> for StdlibVariant {
    fn from(s: String) -> Self {
        match s.as_str() {
            "libstdc++" => StdlibVariant::LibstdcxxLegacy,
            "libstdc++11" => StdlibVariant::Libstdcxx11,
            "libc++" => StdlibVariant::Libcxx,
            _ => StdlibVariant::Other(s),
        }
    }
}

impl From<StdlibVariant> for String {
    fn from(v: StdlibVariant) -> String {
        v.as_str().to_string()
    }
}

impl FromStr for StdlibVariant {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StdlibVariant::from(s.to_string()))
    }
}

impl fmt::Display for StdlibVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// C++ standard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CppStandard {
    /// C++11
    #[serde(rename = "11", alias = "c++11", alias = "cpp11")]
    Cpp11,
    /// C++14
    #[serde(rename = "14", alias = "c++14", alias = "cpp14")]
    Cpp14,
    /// C++17
    #[serde(rename = "17", alias = "c++17", alias = "cpp17")]
    Cpp17,
    /// C++20
    #[serde(rename = "20", alias = "c++20", alias = "cpp20")]
    Cpp20,
    /// C++23
    #[serde(rename = "23", alias = "c++23", alias = "cpp23")]
    Cpp23,
}

impl CppStandard {
    /// The standard's year digits, as CMake's `CMAKE_CXX_STANDARD` wants them.
    pub fn year(&self) -> u32 {
        match self {
            CppStandard::Cpp11 => 11,
            CppStandard::Cpp14 => 14,
            CppStandard::Cpp17 => 17,
            CppStandard::Cpp20 => 20,
            CppStandard::Cpp23 => 23,
        }
    }
}

impl FromStr for CppStandard {
    type Err = CppStandardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "11" | "c++11" | "cpp11" => Ok(CppStandard::Cpp11),
            "14" | "c++14" | "cpp14" => Ok(CppStandard::Cpp14),
            "17" | "c++17" | "cpp17" => Ok(CppStandard::Cpp17),
            "20" | "c++20" | "cpp20" => Ok(CppStandard::Cpp20),
            "23" | "c++23" | "cpp23" => Ok(CppStandard::Cpp23),
            _ => Err(CppStandardParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid C++ standard string.
#[derive(Debug, Clone)]
pub struct CppStandardParseError(pub String);

impl fmt::Display for CppStandardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid C++ standard '{}', valid values: 11, 14, 17, 20, 23",
            self.0
        )
    }
}

impl std::error::Error for CppStandardParseError {}

impl fmt::Display for CppStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C++{}", self.year())
    }
}

/// Build type, CMake-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    #[serde(rename = "relwithdebinfo", alias = "rel-with-deb-info")]
    RelWithDebInfo,
    #[serde(rename = "minsizerel", alias = "min-size-rel")]
    MinSizeRel,
}

impl BuildType {
    /// Whether this build type produces debug artifacts (and therefore
    /// debug-suffixed library names).
    pub fn is_debug(&self) -> bool {
        matches!(self, BuildType::Debug)
    }

    /// The CMake spelling of this build type.
    pub fn as_cmake_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(format!(
                "invalid build type '{}', valid values: debug, release, relwithdebinfo, minsizerel",
                s
            )),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cmake_str())
    }
}

/// The compiler/platform combination a resolution targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildProfile {
    /// Target operating system (linux, macos, windows, ...)
    pub os: String,

    /// Target architecture (x86_64, aarch64, ...)
    pub arch: String,

    /// Compiler family
    pub compiler: CompilerFamily,

    /// Compiler version ("11", "191", "14.0")
    pub compiler_version: PackageVersion,

    /// Standard-library variant; absent for toolchains that have no
    /// selectable stdlib (MSVC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdlib: Option<StdlibVariant>,

    /// Effective C++ standard the consumer builds with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cppstd: Option<CppStandard>,

    /// Build type
    #[serde(default)]
    pub build_type: BuildType,
}

impl BuildProfile {
    /// Create a profile with the required settings; the rest default.
    pub fn new(
        os: impl Into<String>,
        arch: impl Into<String>,
        compiler: CompilerFamily,
        compiler_version: PackageVersion,
    ) -> Self {
        BuildProfile {
            os: os.into(),
            arch: arch.into(),
            compiler,
            compiler_version,
            stdlib: None,
            cppstd: None,
            build_type: BuildType::default(),
        }
    }

    /// Set the standard-library variant.
    pub fn with_stdlib(mut self, stdlib: StdlibVariant) -> Self {
        self.stdlib = Some(stdlib);
        self
    }

    /// Set the C++ standard.
    pub fn with_cppstd(mut self, cppstd: CppStandard) -> Self {
        self.cppstd = Some(cppstd);
        self
    }

    /// Set the build type.
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Check whether the profile targets Windows.
    pub fn is_windows(&self) -> bool {
        self.os.eq_ignore_ascii_case("windows")
    }

    /// Check whether the profile targets Linux.
    pub fn is_linux(&self) -> bool {
        self.os.eq_ignore_ascii_case("linux")
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.os, self.arch, self.compiler, self.compiler_version
        )
    }
}

/// A profile document as stored on disk.
///
/// Settings live at the top level, package options under `[options]`.
/// Every field is optional so CLI flags can fill in or override entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileFile {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<CompilerFamily>,
    pub compiler_version: Option<PackageVersion>,
    pub stdlib: Option<StdlibVariant>,
    pub cppstd: Option<CppStandard>,
    pub build_type: Option<BuildType>,
    pub options: RawOptions,
}

impl ProfileFile {
    /// Load a profile document from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse profile: {}", path.display()))
    }

    /// Parse a profile document from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Turn the document into a complete profile.
    ///
    /// `os` and `arch` default to the host, `build_type` to release.
    /// Compiler family and version have no sensible default and must be
    /// present.
    pub fn into_profile(self) -> Result<(BuildProfile, RawOptions)> {
        let compiler = self.compiler.ok_or_else(|| {
            anyhow::anyhow!(
                "no compiler set\n\
                 help: pass --compiler or set `compiler` in the profile file"
            )
        })?;
        let compiler_version = self.compiler_version.ok_or_else(|| {
            anyhow::anyhow!(
                "no compiler version set\n\
                 help: pass --compiler-version or set `compiler_version` in the profile file"
            )
        })?;

        let profile = BuildProfile {
            os: self.os.unwrap_or_else(|| host_os().to_string()),
            arch: self
                .arch
                .unwrap_or_else(|| std::env::consts::ARCH.to_string()),
            compiler,
            compiler_version,
            stdlib: self.stdlib,
            cppstd: self.cppstd,
            build_type: self.build_type.unwrap_or_default(),
        };

        Ok((profile, self.options))
    }
}

/// Host operating system name, in profile spelling.
pub fn host_os() -> &'static str {
    std::env::consts::OS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_family_round_trip() {
        assert_eq!(CompilerFamily::from("gcc".to_string()), CompilerFamily::Gcc);
        assert_eq!(
            CompilerFamily::from("apple-clang".to_string()),
            CompilerFamily::AppleClang
        );
        assert_eq!(
            CompilerFamily::from("Visual Studio".to_string()),
            CompilerFamily::VisualStudio
        );
        assert_eq!(
            CompilerFamily::from("icc".to_string()),
            CompilerFamily::Other("icc".to_string())
        );
        assert_eq!(CompilerFamily::Msvc.to_string(), "msvc");
    }

    #[test]
    fn test_stdlib_variant_round_trip() {
        assert_eq!(
            StdlibVariant::from("libstdc++11".to_string()),
            StdlibVariant::Libstdcxx11
        );
        assert_eq!(StdlibVariant::Libcxx.as_str(), "libc++");
        assert_eq!(
            StdlibVariant::from("msvcrt".to_string()),
            StdlibVariant::Other("msvcrt".to_string())
        );
    }

    #[test]
    fn test_cpp_standard_ordering() {
        assert!(CppStandard::Cpp11 < CppStandard::Cpp14);
        assert!(CppStandard::Cpp14 < CppStandard::Cpp17);
        assert!(CppStandard::Cpp17 < CppStandard::Cpp20);
        assert!(CppStandard::Cpp20 < CppStandard::Cpp23);
    }

    #[test]
    fn test_cpp_standard_parse() {
        assert_eq!("17".parse::<CppStandard>().unwrap(), CppStandard::Cpp17);
        assert_eq!("c++20".parse::<CppStandard>().unwrap(), CppStandard::Cpp20);
        assert!("16".parse::<CppStandard>().is_err());
    }

    #[test]
    fn test_build_type() {
        assert!(BuildType::Debug.is_debug());
        assert!(!BuildType::Release.is_debug());
        assert_eq!(BuildType::RelWithDebInfo.as_cmake_str(), "RelWithDebInfo");
        assert_eq!("Debug".parse::<BuildType>().unwrap(), BuildType::Debug);
    }

    #[test]
    fn test_profile_builder() {
        let profile = BuildProfile::new(
            "linux",
            "x86_64",
            CompilerFamily::Gcc,
            PackageVersion::new(11, 0, 0),
        )
        .with_stdlib(StdlibVariant::Libstdcxx11)
        .with_cppstd(CppStandard::Cpp17)
        .with_build_type(BuildType::Debug);

        assert!(profile.is_linux());
        assert!(!profile.is_windows());
        assert_eq!(profile.to_string(), "linux-x86_64-gcc-11");
    }

    #[test]
    fn test_profile_file_parse() {
        let doc = ProfileFile::from_toml_str(
            r#"
os = "linux"
arch = "x86_64"
compiler = "gcc"
compiler_version = "11"
stdlib = "libstdc++11"
cppstd = "17"
build_type = "debug"

[options]
with_rapidjson = true
"#,
        )
        .unwrap();

        let (profile, options) = doc.into_profile().unwrap();
        assert_eq!(profile.compiler, CompilerFamily::Gcc);
        assert_eq!(profile.stdlib, Some(StdlibVariant::Libstdcxx11));
        assert_eq!(profile.cppstd, Some(CppStandard::Cpp17));
        assert_eq!(profile.build_type, BuildType::Debug);
        assert_eq!(options.with_rapidjson, Some(true));
    }

    #[test]
    fn test_profile_file_requires_compiler() {
        let doc = ProfileFile::from_toml_str("os = \"linux\"").unwrap();
        let err = doc.into_profile().unwrap_err().to_string();
        assert!(err.contains("no compiler set"));
    }

    #[test]
    fn test_profile_file_rejects_unknown_keys() {
        assert!(ProfileFile::from_toml_str("complier = \"gcc\"").is_err());
    }
}
