use async_trait::async_trait;
use depgraph_sbom::prelude::*;
use std::collections::HashMap;

/// Mock VulnerabilityRepository for testing
#[derive(Default)]
pub struct MockVulnerabilityRepository {
    findings: HashMap<String, Vec<Vulnerability>>,
    unavailable: bool,
}

impl MockVulnerabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vulnerability(mut self, id: &str, vuln_id: &str, severity: SeverityLevel) -> Self {
        let vulnerability = Vulnerability::new(vuln_id.to_string(), severity, None, None, None)
            .expect("valid vulnerability");
        self.findings
            .entry(id.to_string())
            .or_default()
            .push(vulnerability);
        self
    }

    /// Every query fails, as if the advisory database were down
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl VulnerabilityRepository for MockVulnerabilityRepository {
    async fn fetch_vulnerabilities(
        &self,
        dependencies: &[DependencyNode],
    ) -> Result<Vec<ComponentVulnerabilities>> {
        if self.unavailable {
            anyhow::bail!("advisory database unavailable");
        }
        Ok(dependencies
            .iter()
            .filter_map(|dep| {
                self.findings
                    .get(dep.id().as_str())
                    .map(|found| ComponentVulnerabilities::new(dep.id().clone(), found.clone()))
            })
            .collect())
    }
}
