use crate::sbom_generation::domain::{ComponentVulnerabilities, DependencyNode};
use crate::shared::Result;
use async_trait::async_trait;

/// VulnerabilityRepository port for fetching known vulnerabilities
///
/// Abstracts the advisory database (e.g. OSV) queried for each
/// collected dependency.
#[async_trait]
pub trait VulnerabilityRepository: Send + Sync {
    /// Fetches vulnerabilities for the given dependencies
    ///
    /// Only dependencies with at least one finding appear in the result.
    ///
    /// # Errors
    /// Returns an error if the advisory database cannot be queried.
    async fn fetch_vulnerabilities(
        &self,
        dependencies: &[DependencyNode],
    ) -> Result<Vec<ComponentVulnerabilities>>;
}
