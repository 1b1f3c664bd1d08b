use crate::sbom_generation::domain::{
    DependencyGraph, DependencyNode, LicenseRecord, ModuleId, RunMetadata, Vulnerability,
};
use crate::sbom_generation::services::PolicyEvaluation;
use crate::shared::Result;
use serde::Serialize;

/// One collected dependency with everything resolved for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentEntry {
    #[serde(flatten)]
    pub dependency: DependencyNode,
    pub license: Option<LicenseRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities: Vec<Vulnerability>,
}

/// GenerationResponse - Result of one generation run
///
/// Serialized as-is to produce the JSON inventory.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub metadata: RunMetadata,
    pub root_module: ModuleId,
    /// Modules whose scopes were collected, in discovery order
    pub modules: Vec<ModuleId>,
    /// Components in discovery order
    pub components: Vec<ComponentEntry>,
    pub graph: DependencyGraph,
    /// Whether the vulnerability repository was queried
    pub vulnerability_check: bool,
    pub policy: PolicyEvaluation,
    /// Non-fatal anomalies absorbed during the run
    pub warnings: Vec<String>,
}

impl GenerationResponse {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn component(&self, id: &str) -> Option<&ComponentEntry> {
        self.components
            .iter()
            .find(|entry| entry.dependency.id().as_str() == id)
    }
}
