//! CLI integration tests for serpack.
//!
//! These drive the binary end to end: resolution output, validation
//! failures, JSON modes and input handling. Nothing here touches the
//! network.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the serpack binary command.
fn serpack() -> Command {
    Command::cargo_bin("serpack").unwrap()
}

/// Standard gcc profile flags used by most tests.
fn gcc_flags() -> Vec<&'static str> {
    vec![
        "--os",
        "linux",
        "--arch",
        "x86_64",
        "--compiler",
        "gcc",
        "--compiler-version",
        "11",
        "--stdlib",
        "libstdc++11",
        "--std",
        "17",
    ]
}

// ============================================================================
// serpack resolve
// ============================================================================

#[test]
fn test_resolve_defaults_is_header_only() {
    serpack()
        .arg("resolve")
        .arg("0.90")
        .args(gcc_flags())
        .assert()
        .success()
        .stdout(predicate::str::contains("bitserializer/0.90: header-library"))
        .stdout(predicate::str::contains("requirements: (none)"))
        .stdout(predicate::str::contains("bitserializer-core"));
}

#[test]
fn test_resolve_scenario_rapidjson_csv() {
    serpack()
        .arg("resolve")
        .arg("0.75")
        .args(gcc_flags())
        .args(["-o", "with_rapidjson=true", "-o", "with_csv=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bitserializer/0.75: static-library"))
        .stdout(predicate::str::contains("rapidjson/1.1.0"))
        .stdout(predicate::str::contains("[lib csv-archive]"))
        .stdout(predicate::str::contains("BUILD_CSV_ARCHIVE = ON"))
        .stdout(predicate::str::contains("BUILD_RAPIDJSON_ARCHIVE = ON"))
        .stdout(predicate::str::contains("BUILD_PUGIXML_ARCHIVE = OFF"));
}

#[test]
fn test_resolve_msgpack_dropped_on_old_release() {
    serpack()
        .arg("resolve")
        .arg("0.60")
        .args(gcc_flags())
        .args(["-o", "with_msgpack=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("header-library"))
        .stdout(predicate::str::contains("with_msgpack").not());
}

#[test]
fn test_resolve_json_output() {
    serpack()
        .arg("resolve")
        .arg("0.80")
        .args(gcc_flags())
        .args(["-o", "with_msgpack=true", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"static-library\""))
        .stdout(predicate::str::contains("\"bitserializer-msgpack\""))
        .stdout(predicate::str::contains("\"fingerprint\""));
}

#[test]
fn test_resolve_rejects_bad_standard() {
    serpack()
        .arg("resolve")
        .arg("0.80")
        .args([
            "--os",
            "linux",
            "--compiler",
            "gcc",
            "--compiler-version",
            "11",
            "--stdlib",
            "libstdc++11",
            "--std",
            "14",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("C++ standard C++14 is not supported"))
        .stderr(predicate::str::contains("unsupported configuration"));
}

#[test]
fn test_resolve_requires_compiler() {
    serpack()
        .arg("resolve")
        .arg("0.80")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no compiler set"));
}

#[test]
fn test_resolve_rejects_unknown_option() {
    serpack()
        .arg("resolve")
        .arg("0.80")
        .args(gcc_flags())
        .args(["-o", "with_json=true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown option `with_json`"));
}

#[test]
fn test_resolve_with_profile_file() {
    let tmp = TempDir::new().unwrap();
    let profile = tmp.path().join("gcc11.toml");
    fs::write(
        &profile,
        r#"
os = "linux"
arch = "x86_64"
compiler = "gcc"
compiler_version = "11"
stdlib = "libstdc++11"
cppstd = "17"

[options]
with_pugixml = true
"#,
    )
    .unwrap();

    serpack()
        .arg("resolve")
        .arg("0.80")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("pugixml/1.15"));
}

#[test]
fn test_cli_flags_override_profile_file() {
    let tmp = TempDir::new().unwrap();
    let profile = tmp.path().join("gcc7.toml");
    fs::write(
        &profile,
        r#"
os = "linux"
compiler = "gcc"
compiler_version = "7"
stdlib = "libstdc++11"
cppstd = "17"
"#,
    )
    .unwrap();

    // gcc 7 alone would fail the floor; the flag lifts it
    serpack()
        .arg("resolve")
        .arg("0.80")
        .arg("--profile")
        .arg(&profile)
        .args(["--compiler-version", "12"])
        .assert()
        .success();
}

// ============================================================================
// serpack validate
// ============================================================================

#[test]
fn test_validate_supported_profile() {
    serpack()
        .arg("validate")
        .args(gcc_flags())
        .assert()
        .success()
        .stdout(predicate::str::contains("is supported"));
}

#[test]
fn test_validate_old_compiler_fails_with_floor() {
    serpack()
        .arg("validate")
        .args([
            "--os",
            "linux",
            "--compiler",
            "gcc",
            "--compiler-version",
            "7",
            "--stdlib",
            "libstdc++11",
            "--std",
            "17",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("below the supported floor"))
        .stderr(predicate::str::contains("at least gcc 8"));
}

#[test]
fn test_validate_wrong_stdlib_abi() {
    serpack()
        .arg("validate")
        .args([
            "--os",
            "linux",
            "--compiler",
            "gcc",
            "--compiler-version",
            "11",
            "--stdlib",
            "libstdc++",
            "--std",
            "17",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not binary-compatible"))
        .stderr(predicate::str::contains("libstdc++11"));
}

#[test]
fn test_validate_unknown_compiler_passes() {
    serpack()
        .arg("validate")
        .args([
            "--os",
            "linux",
            "--compiler",
            "chipmaker-cc",
            "--compiler-version",
            "1",
            "--std",
            "20",
        ])
        .assert()
        .success();
}

// ============================================================================
// serpack requirements / components
// ============================================================================

#[test]
fn test_requirements_json() {
    serpack()
        .arg("requirements")
        .arg("0.75")
        .args(["-o", "with_rapidyaml=true", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rapidyaml\""))
        .stdout(predicate::str::contains("\"0.5.0\""));
}

#[test]
fn test_requirements_empty_for_defaults() {
    serpack()
        .arg("requirements")
        .arg("0.90")
        .assert()
        .success()
        .stdout(predicate::str::contains("no external requirements"));
}

#[test]
fn test_components_show_cpprestjson_stem() {
    serpack()
        .arg("components")
        .arg("0.75")
        .args(gcc_flags())
        .args(["-o", "with_cpprestsdk=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bitserializer-cpprestjson"))
        .stdout(predicate::str::contains("BitSerializer::cpprestjson-archive"))
        .stdout(predicate::str::contains("cpprestsdk::cpprestsdk"));
}

#[test]
fn test_components_debug_suffix() {
    serpack()
        .arg("components")
        .arg("0.80")
        .args(gcc_flags())
        .args(["--build-type", "debug", "-o", "with_csv=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[lib bitserializer-csvd]"));
}

// ============================================================================
// serpack releases / fetch
// ============================================================================

#[test]
fn test_releases_lists_builtin_index() {
    serpack()
        .arg("releases")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.70"))
        .stdout(predicate::str::contains("0.80"))
        .stdout(predicate::str::contains("https://"));
}

#[test]
fn test_releases_with_override_file() {
    let tmp = TempDir::new().unwrap();
    let sources = tmp.path().join("sources.toml");
    fs::write(
        &sources,
        r#"
["0.80"]
url = "https://mirror.example.com/bitserializer-0.80.tar.gz"
sha256 = "0000000000000000000000000000000000000000000000000000000000000000"
"#,
    )
    .unwrap();

    serpack()
        .arg("releases")
        .arg("--sources")
        .arg(&sources)
        .assert()
        .success()
        .stdout(predicate::str::contains("mirror.example.com"))
        .stdout(predicate::str::contains("0.70").not());
}

#[test]
fn test_fetch_unknown_release_fails() {
    let tmp = TempDir::new().unwrap();
    serpack()
        .arg("fetch")
        .arg("0.42")
        .arg("--dest")
        .arg(tmp.path().join("src"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the source index"));
}

#[test]
fn test_fetch_reuses_existing_tree() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("src");
    fs::create_dir_all(dest.join("include/bitserializer")).unwrap();
    fs::write(
        dest.join("include/bitserializer/rapidyaml_archive.h"),
        "#include \"ryml/ryml.hpp\"\n",
    )
    .unwrap();

    serpack()
        .arg("fetch")
        .arg("0.80")
        .arg("--dest")
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("src"));
}
