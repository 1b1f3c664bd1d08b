use super::{DependencyId, ModuleId, ResolutionGraph};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Outcome of asking the host to resolve one scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeResolution {
    Resolved(ResolutionGraph),
    /// The host raised an error while resolving; the message is kept for reporting
    Failed(String),
}

/// A named, resolvable set of dependency declarations within a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    name: String,
    resolvable: bool,
    module_dependencies: Vec<ModuleId>,
    resolution: ScopeResolution,
    artifacts: BTreeMap<DependencyId, PathBuf>,
}

impl Scope {
    pub fn new(name: impl Into<String>, resolution: ScopeResolution) -> Self {
        Self {
            name: name.into(),
            resolvable: true,
            module_dependencies: Vec::new(),
            resolution,
            artifacts: BTreeMap::new(),
        }
    }

    pub fn resolved(name: impl Into<String>, graph: ResolutionGraph) -> Self {
        Self::new(name, ScopeResolution::Resolved(graph))
    }

    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, ScopeResolution::Failed(reason.into()))
    }

    pub fn with_resolvable(mut self, resolvable: bool) -> Self {
        self.resolvable = resolvable;
        self
    }

    pub fn with_module_dependency(mut self, module: ModuleId) -> Self {
        self.module_dependencies.push(module);
        self
    }

    pub fn with_artifact(mut self, id: DependencyId, path: PathBuf) -> Self {
        self.artifacts.insert(id, path);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_resolvable(&self) -> bool {
        self.resolvable
    }

    pub fn module_dependencies(&self) -> &[ModuleId] {
        &self.module_dependencies
    }

    pub fn resolution(&self) -> &ScopeResolution {
        &self.resolution
    }

    pub fn artifacts(&self) -> &BTreeMap<DependencyId, PathBuf> {
        &self.artifacts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildModule {
    id: ModuleId,
    scopes: Vec<Scope>,
}

impl BuildModule {
    pub fn new(id: ModuleId, scopes: Vec<Scope>) -> Self {
        Self { id, scopes }
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }
}

/// Read-only view of the host build's modules and their resolved scopes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSnapshot {
    root_module: Option<ModuleId>,
    modules: BTreeMap<ModuleId, BuildModule>,
}

impl ProjectSnapshot {
    pub fn new(root_module: Option<ModuleId>, modules: Vec<BuildModule>) -> Self {
        Self {
            root_module,
            modules: modules
                .into_iter()
                .map(|module| (module.id().clone(), module))
                .collect(),
        }
    }

    /// Root module declared by the exporter, if any
    pub fn root_module(&self) -> Option<&ModuleId> {
        self.root_module.as_ref()
    }

    pub fn module(&self, id: &ModuleId) -> Option<&BuildModule> {
        self.modules.get(id)
    }

    pub fn modules(&self) -> impl Iterator<Item = &BuildModule> {
        self.modules.values()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}
