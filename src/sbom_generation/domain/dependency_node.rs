use crate::shared::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Maximum length for a single coordinate component (security limit)
const MAX_COMPONENT_LENGTH: usize = 255;

/// Unique key of a dependency: `group:name:version`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DependencyId(String);

impl DependencyId {
    pub fn new(group: &str, name: &str, version: &str) -> Result<Self> {
        validate_component(group, "group")?;
        validate_component(name, "name")?;
        validate_component(version, "version")?;
        Ok(Self(format!("{}:{}:{}", group, name, version)))
    }

    /// Parses an id of the form `group:name:version`
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(name), Some(version)) => Self::new(group, name, version),
            _ => anyhow::bail!(
                "Invalid dependency id '{}': expected group:name:version",
                raw
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DependencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_component(value: &str, component: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!("Dependency {} cannot be empty", component);
    }

    if value.len() > MAX_COMPONENT_LENGTH {
        anyhow::bail!(
            "Dependency {} is too long ({} bytes). Maximum allowed: {} bytes",
            component,
            value.len(),
            MAX_COMPONENT_LENGTH
        );
    }

    // ':' would make the composed id ambiguous
    if value.contains(':') || value.chars().any(|c| c.is_control() || c.is_whitespace()) {
        anyhow::bail!(
            "Dependency {} '{}' contains a separator, whitespace or control character",
            component,
            value
        );
    }

    Ok(())
}

/// A resolved third-party library. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    id: DependencyId,
    group: String,
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifact: Option<PathBuf>,
    externally_pinned: bool,
}

impl DependencyNode {
    pub fn new(group: String, name: String, version: String) -> Result<Self> {
        let id = DependencyId::new(&group, &name, &version)?;
        Ok(Self {
            id,
            group,
            name,
            version,
            artifact: None,
            externally_pinned: false,
        })
    }

    /// Creates a node for a dependency fixed by an external pin file
    pub fn pinned(group: String, name: String, version: String) -> Result<Self> {
        Ok(Self {
            externally_pinned: true,
            ..Self::new(group, name, version)?
        })
    }

    pub fn with_artifact(self, artifact: Option<PathBuf>) -> Self {
        Self { artifact, ..self }
    }

    pub fn id(&self) -> &DependencyId {
        &self.id
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn artifact(&self) -> Option<&Path> {
        self.artifact.as_deref()
    }

    pub fn is_externally_pinned(&self) -> bool {
        self.externally_pinned
    }
}
