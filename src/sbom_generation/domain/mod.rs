pub mod dependency_graph;
pub mod dependency_node;
pub mod license_record;
pub mod project;
pub mod resolution;
pub mod run_metadata;
pub mod severity;
pub mod violation;
pub mod vulnerability;

pub use dependency_graph::{DependencyCollectionResult, DependencyGraph};
pub use dependency_node::{DependencyId, DependencyNode};
pub use license_record::LicenseRecord;
pub use project::{BuildModule, ProjectSnapshot, Scope, ScopeResolution};
pub use resolution::{
    ComponentIdentity, LibraryCoordinates, ModuleId, NodeIndex, ResolutionGraph, ResolutionNode,
};
pub use run_metadata::RunMetadata;
pub use severity::SeverityLevel;
pub use violation::{Violation, ViolationKind};
pub use vulnerability::{ComponentVulnerabilities, Vulnerability};
