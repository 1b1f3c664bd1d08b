/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copy the fixture snapshot into `dir` and return its path.
fn create_test_project(dir: &Path) -> PathBuf {
    let snapshot = dir.join("depgraph-snapshot.json");
    fs::copy(
        fixtures_path().join("multi-module/depgraph-snapshot.json"),
        &snapshot,
    )
    .unwrap();
    snapshot
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// Offline run against `snapshot`; the default license cache points into
/// the temp dir so the user's own build cache is never read.
fn run(snapshot: &Path, extra: &[&str]) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("depgraph-sbom");
    cmd.args(["--offline", "-s", snapshot.to_str().unwrap()])
        .args(extra)
        .env("GRADLE_USER_HOME", snapshot.parent().unwrap())
        .env_remove("GITHUB_ACTIONS")
        .env_remove("GITHUB_EVENT_NAME");
    cmd
}

fn component_ids(output: &std::process::Output) -> Vec<String> {
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    json["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_scope_toggles() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            "include_test: true\n",
        );

        let output = run(&snapshot, &[]).output().unwrap();
        assert!(output.status.success());
        assert!(component_ids(&output).contains(&"junit:junit:4.13.2".to_string()));
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());

        let output = run(&snapshot, &[]).output().unwrap();
        assert!(output.status.success());
        assert_eq!(component_ids(&output).len(), 3);
    }

    #[test]
    fn test_auto_discovery_applies_policy() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            r#"
allowed_licenses:
  - MIT
fail_on_violation: always
"#,
        );

        run(&snapshot, &[])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("3 license violation(s)"));
    }

    #[test]
    fn test_relative_license_cache_resolves_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());

        let pom_dir = dir
            .path()
            .join("cache/com.squareup.okio/okio/3.6.0/0a1b2c3d");
        fs::create_dir_all(&pom_dir).unwrap();
        fs::write(
            pom_dir.join("okio-3.6.0.pom"),
            "<project><licenses><license><name>MIT License</name></license></licenses></project>",
        )
        .unwrap();
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            "license_cache_dir: cache\n",
        );

        let output = run(&snapshot, &[]).output().unwrap();
        assert!(output.status.success());
        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        let okio = json["components"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == "com.squareup.okio:okio:3.6.0")
            .unwrap();
        assert_eq!(okio["license"]["id"], "MIT");
    }
}

// ============================================================================
// Explicit --config Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        let config_path = dir.path().join("custom.yml");
        write_config(&config_path, "include_debug: true\n");

        let output = run(&snapshot, &["-c", config_path.to_str().unwrap()])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert!(component_ids(&output)
            .contains(&"com.squareup.leakcanary:leakcanary-android:2.12".to_string()));
    }

    #[test]
    fn test_explicit_config_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());

        run(&snapshot, &["-c", "/nonexistent/depgraph-sbom.config.yml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }
}

// ============================================================================
// CLI / Config Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_fail_policy_overrides_config() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            r#"
allowed_licenses: [MIT]
fail_on_violation: always
"#,
        );

        run(&snapshot, &["--fail-on-violation", "never"])
            .assert()
            .code(0);
    }

    #[test]
    fn test_cli_allowed_licenses_replace_config_list() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            "allowed_licenses: [MIT]\nlicense_cache_dir: /nonexistent\n",
        );

        let cache = fixtures_path().join("license-cache");
        run(
            &snapshot,
            &[
                "--allowed-license",
                "Apache-2.0",
                "--license-cache",
                cache.to_str().unwrap(),
            ],
        )
        .assert()
        .code(0);
    }

    #[test]
    fn test_config_root_module_used() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            "root_module: \":core\"\n",
        );

        let output = run(&snapshot, &[]).output().unwrap();
        assert!(output.status.success());
        assert_eq!(
            component_ids(&output),
            vec![
                "org.jetbrains.kotlin:kotlin-stdlib:1.9.22",
                "com.squareup.okio:okio:3.6.0",
            ]
        );
    }
}

// ============================================================================
// Validation and Warning Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_unknown_field_warns_on_stderr() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            "format: xml\ninclude_test: false\n",
        );

        run(&snapshot, &[])
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Unknown config field 'format' will be ignored.",
            ));
    }

    #[test]
    fn test_invalid_yaml_is_application_error() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            "allowed_licenses: [[[broken",
        );

        run(&snapshot, &[])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_severity_is_application_error() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            "max_allowed_severity: SEVERE\n",
        );

        run(&snapshot, &[]).assert().code(3);
    }

    #[test]
    fn test_blank_allowed_license_is_application_error() {
        let dir = TempDir::new().unwrap();
        let snapshot = create_test_project(dir.path());
        write_config(
            &dir.path().join("depgraph-sbom.config.yml"),
            "allowed_licenses:\n  - MIT\n  - \"\"\n",
        );

        run(&snapshot, &[])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("allowed_licenses[1] must not be empty"));
    }
}
