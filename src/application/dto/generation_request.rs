use crate::sbom_generation::domain::ModuleId;
use crate::sbom_generation::policies::PolicyConfig;
use crate::sbom_generation::services::ScopeFilter;
use std::path::PathBuf;

/// GenerationRequest - Internal request DTO for the generation use case
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Path to the project snapshot exported by the build tool
    pub snapshot_path: PathBuf,
    /// Overrides the root module declared in the snapshot
    pub root_module: Option<ModuleId>,
    /// Which scopes of each module are collected
    pub scope_filter: ScopeFilter,
    /// Optional pinned-dependency descriptor
    pub pins_path: Option<PathBuf>,
    pub policy: PolicyConfig,
    /// Whether to query the vulnerability repository
    pub check_cve: bool,
}

impl GenerationRequest {
    pub fn new(snapshot_path: PathBuf, scope_filter: ScopeFilter, policy: PolicyConfig) -> Self {
        Self {
            snapshot_path,
            root_module: None,
            scope_filter,
            pins_path: None,
            policy,
            check_cve: false,
        }
    }

    pub fn with_root_module(mut self, root_module: Option<ModuleId>) -> Self {
        self.root_module = root_module;
        self
    }

    pub fn with_pins_path(mut self, pins_path: Option<PathBuf>) -> Self {
        self.pins_path = pins_path;
        self
    }

    pub fn with_check_cve(mut self, check_cve: bool) -> Self {
        self.check_cve = check_cve;
        self
    }
}
