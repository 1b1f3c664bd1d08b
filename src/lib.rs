//! depgraph-sbom - dependency inventory and policy checks for multi-module builds
//!
//! This library collapses the per-scope resolution graphs exported by a
//! multi-module build into one deduplicated dependency DAG, resolves a
//! license for every dependency and evaluates license and vulnerability
//! policy, following hexagonal architecture and Domain-Driven Design
//! principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depgraph_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let cache = LocalCacheLicenseSource::new(PathBuf::from("/tmp/gradle-cache"));
//! let resolver = LicenseResolver::new(vec![Box::new(cache)]);
//!
//! // Create use case
//! let use_case: GenerateSbomUseCase<_, _, _, OsvClient, _> = GenerateSbomUseCase::new(
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     resolver,
//!     StderrProgressReporter::new(),
//!     None,
//!     GitHubActionsEnvironment::from_process_env(),
//! );
//!
//! // Execute
//! let request = GenerationRequest::new(
//!     PathBuf::from("build/depgraph-snapshot.json"),
//!     ScopeFilter::new("android", false, true, false),
//!     PolicyConfig::default(),
//! );
//! let response = use_case.execute(request).await?;
//! println!("{}", response.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::environment::GitHubActionsEnvironment;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, LocalCacheLicenseSource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{
        build_http_client, CachingLicenseSource, GitHubLicenseSource,
        MavenRepositoryLicenseSource, OsvClient,
    };
    pub use crate::application::dto::{ComponentEntry, GenerationRequest, GenerationResponse};
    pub use crate::application::use_cases::{GenerateSbomUseCase, LicenseLookup, LicenseResolver};
    pub use crate::ports::outbound::{
        CiEnvironment, LicenseSource, OutputPresenter, PinnedDependencies,
        PinnedDependencyReader, ProgressReporter, ProjectSnapshotReader, VulnerabilityRepository,
    };
    pub use crate::sbom_generation::domain::{
        BuildModule, ComponentIdentity, ComponentVulnerabilities, DependencyCollectionResult,
        DependencyGraph, DependencyId, DependencyNode, LicenseRecord, ModuleId, ProjectSnapshot,
        ResolutionGraph, Scope, SeverityLevel, Violation, ViolationKind, Vulnerability,
    };
    pub use crate::sbom_generation::policies::{
        FailPolicy, LicenseNormalization, PolicyConfig, VulnerabilityPolicy,
    };
    pub use crate::sbom_generation::services::{
        CiContext, CollectionOutcome, CollectionWarning, GraphCollector, ModuleClosureFinder,
        PolicyEvaluation, ScopeFilter, ViolationEvaluator,
    };
    pub use crate::shared::error::{ExitCode, SbomError};
    pub use crate::shared::Result;
}
