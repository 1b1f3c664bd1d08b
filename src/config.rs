//! Configuration file support for depgraph-sbom.
//!
//! Provides YAML-based configuration through `depgraph-sbom.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use depgraph_sbom::sbom_generation::policies::VulnerabilityPolicy;
use depgraph_sbom::shared::Result;

pub const CONFIG_FILENAME: &str = "depgraph-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub root_module: Option<String>,
    pub target_platform: Option<String>,
    pub include_debug: Option<bool>,
    pub include_release: Option<bool>,
    pub include_test: Option<bool>,
    pub allowed_licenses: Option<Vec<String>>,
    pub max_allowed_severity: Option<String>,
    pub fail_on_violation: Option<String>,
    pub pinned_dependencies: Option<PathBuf>,
    pub license_cache_dir: Option<PathBuf>,
    pub check_cve: Option<bool>,
    pub offline: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// One warning per unknown field, sorted by field name.
    pub fn unknown_field_warnings(&self) -> Vec<String> {
        let mut keys: Vec<&String> = self.unknown_fields.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| format!("Unknown config field '{}' will be ignored.", key))
            .collect()
    }

    /// Relative paths in the file are relative to the file's directory.
    fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.pinned_dependencies, &mut self.license_cache_dir]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let mut config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref allowed) = config.allowed_licenses {
        for (i, id) in allowed.iter().enumerate() {
            if id.trim().is_empty() {
                bail!(
                    "Invalid config: allowed_licenses[{}] must not be empty.\n\n\
                     💡 Hint: Each allowed_licenses entry must be a license id (e.g., \"Apache-2.0\").",
                    i
                );
            }
        }
    }

    if let Some(ref severity) = config.max_allowed_severity {
        VulnerabilityPolicy::parse(severity).context("Invalid config")?;
    }
    Ok(())
}
