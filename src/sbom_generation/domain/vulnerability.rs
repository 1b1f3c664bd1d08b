use super::{DependencyId, SeverityLevel};
use crate::shared::Result;
use serde::Serialize;

/// A known vulnerability affecting one dependency version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vulnerability {
    id: String,
    severity: SeverityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    cvss_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

impl Vulnerability {
    pub fn new(
        id: String,
        severity: SeverityLevel,
        cvss_score: Option<f64>,
        fixed_version: Option<String>,
        summary: Option<String>,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            anyhow::bail!("Vulnerability id cannot be empty");
        }
        if let Some(score) = cvss_score {
            if !(0.0..=10.0).contains(&score) {
                anyhow::bail!("CVSS score must be between 0.0 and 10.0, got {}", score);
            }
        }
        Ok(Self {
            id,
            severity,
            cvss_score,
            fixed_version,
            summary,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn severity(&self) -> SeverityLevel {
        self.severity
    }

    pub fn cvss_score(&self) -> Option<f64> {
        self.cvss_score
    }

    pub fn fixed_version(&self) -> Option<&str> {
        self.fixed_version.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// All vulnerabilities found for one dependency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentVulnerabilities {
    dependency_id: DependencyId,
    vulnerabilities: Vec<Vulnerability>,
}

impl ComponentVulnerabilities {
    pub fn new(dependency_id: DependencyId, vulnerabilities: Vec<Vulnerability>) -> Self {
        Self {
            dependency_id,
            vulnerabilities,
        }
    }

    pub fn dependency_id(&self) -> &DependencyId {
        &self.dependency_id
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }
}
