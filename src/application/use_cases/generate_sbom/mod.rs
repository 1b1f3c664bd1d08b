use crate::application::dto::{ComponentEntry, GenerationRequest, GenerationResponse};
use crate::application::use_cases::{LicenseLookup, LicenseResolver};
use crate::ports::outbound::{
    CiEnvironment, PinnedDependencyReader, ProgressReporter, ProjectSnapshotReader,
    VulnerabilityRepository,
};
use crate::sbom_generation::domain::{
    ComponentVulnerabilities, DependencyCollectionResult, DependencyId, DependencyNode, ModuleId,
    ProjectSnapshot, Scope, Vulnerability,
};
use crate::sbom_generation::services::{
    GraphCollector, MetadataGenerator, ModuleClosure, ModuleClosureFinder, PolicyEvaluation,
    ViolationEvaluator,
};
use crate::shared::error::SbomError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::Path;

/// Upper bound on license lookups in flight at once
const LICENSE_LOOKUP_CONCURRENCY: usize = 8;

/// GenerateSbomUseCase - Core use case for dependency inventory generation
///
/// Orchestrates one run: module closure, scope selection, graph collection,
/// pinned dependencies, license resolution, the optional vulnerability
/// check and finally the policy verdict.
///
/// # Type Parameters
/// * `SR` - ProjectSnapshotReader implementation
/// * `PDR` - PinnedDependencyReader implementation
/// * `PR` - ProgressReporter implementation
/// * `VREPO` - VulnerabilityRepository implementation (optional)
/// * `CI` - CiEnvironment implementation
pub struct GenerateSbomUseCase<SR, PDR, PR, VREPO, CI> {
    snapshot_reader: SR,
    pin_reader: PDR,
    license_resolver: LicenseResolver,
    progress_reporter: PR,
    vulnerability_repository: Option<VREPO>,
    ci_environment: CI,
}

impl<SR, PDR, PR, VREPO, CI> GenerateSbomUseCase<SR, PDR, PR, VREPO, CI>
where
    SR: ProjectSnapshotReader,
    PDR: PinnedDependencyReader,
    PR: ProgressReporter,
    VREPO: VulnerabilityRepository,
    CI: CiEnvironment,
{
    /// Creates a new GenerateSbomUseCase with injected dependencies
    pub fn new(
        snapshot_reader: SR,
        pin_reader: PDR,
        license_resolver: LicenseResolver,
        progress_reporter: PR,
        vulnerability_repository: Option<VREPO>,
        ci_environment: CI,
    ) -> Self {
        Self {
            snapshot_reader,
            pin_reader,
            license_resolver,
            progress_reporter,
            vulnerability_repository,
            ci_environment,
        }
    }

    /// Executes one generation run
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be loaded or names no usable
    /// root module. Everything after that degrades to warnings.
    pub async fn execute(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let mut warnings = Vec::new();

        // Step 1: Load the host build's resolution state
        let snapshot = self.read_snapshot(&request.snapshot_path)?;
        let root = Self::select_root(&request, &snapshot)?;

        // Step 2: Modules reachable from the root
        let closure = self.find_modules(&snapshot, &root, &request, &mut warnings)?;

        // Step 3: Collapse eligible scopes into one DAG
        let mut collection = self.collect_dependencies(&snapshot, &closure, &request, &mut warnings);

        // Step 4: Dependencies pinned outside the build tool
        if let Some(pins_path) = &request.pins_path {
            self.add_pinned_dependencies(&mut collection, pins_path, &mut warnings);
        }

        // Step 5: Licenses
        let licenses = self
            .resolve_licenses(collection.dependencies(), &mut warnings)
            .await;

        // Step 6: Vulnerabilities if requested
        let (vulnerabilities, vulnerability_check) = self
            .check_vulnerabilities_if_requested(&request, collection.dependencies(), &mut warnings)
            .await;

        // Step 7: Assemble components and judge them
        let (dependencies, graph) = collection.into_parts();
        let components = Self::build_components(dependencies, licenses, &vulnerabilities);

        let policy = ViolationEvaluator::evaluate(
            components
                .iter()
                .map(|entry| (entry.dependency.id(), entry.license.as_slice())),
            &vulnerabilities,
            &request.policy,
            self.ci_environment.context(),
        );
        self.report_policy(&policy);

        Ok(GenerationResponse {
            metadata: MetadataGenerator::generate_default(),
            root_module: root,
            modules: closure.modules.iter().cloned().collect(),
            components,
            graph,
            vulnerability_check,
            policy,
            warnings,
        })
    }

    fn read_snapshot(&self, path: &Path) -> Result<ProjectSnapshot> {
        self.progress_reporter.report(&format!(
            "📖 Loading project snapshot from: {}",
            path.display()
        ));

        let snapshot = self.snapshot_reader.read_snapshot(path)?;

        self.progress_reporter.report(&format!(
            "✅ Snapshot describes {} module(s)",
            snapshot.module_count()
        ));
        Ok(snapshot)
    }

    /// The request's override wins over the root the exporter declared
    fn select_root(request: &GenerationRequest, snapshot: &ProjectSnapshot) -> Result<ModuleId> {
        request
            .root_module
            .clone()
            .or_else(|| snapshot.root_module().cloned())
            .ok_or_else(|| {
                SbomError::Validation {
                    message: "The snapshot declares no root module; pass one with --root-module"
                        .to_string(),
                }
                .into()
            })
    }

    fn find_modules(
        &self,
        snapshot: &ProjectSnapshot,
        root: &ModuleId,
        request: &GenerationRequest,
        warnings: &mut Vec<String>,
    ) -> Result<ModuleClosure> {
        let closure = ModuleClosureFinder::find(snapshot, root, &request.scope_filter);

        if closure.modules.is_empty() {
            return Err(SbomError::Validation {
                message: format!("Root module '{}' is not described by the snapshot", root),
            }
            .into());
        }

        for missing in &closure.missing {
            self.warn(
                warnings,
                format!(
                    "Module '{}' is declared as a dependency but missing from the snapshot",
                    missing
                ),
            );
        }

        self.progress_reporter.report(&format!(
            "📦 Collecting {} module(s) reachable from {}",
            closure.modules.len(),
            root
        ));
        Ok(closure)
    }

    fn collect_dependencies(
        &self,
        snapshot: &ProjectSnapshot,
        closure: &ModuleClosure,
        request: &GenerationRequest,
        warnings: &mut Vec<String>,
    ) -> DependencyCollectionResult {
        let scopes: Vec<&Scope> = closure
            .modules
            .iter()
            .filter_map(|id| snapshot.module(id))
            .flat_map(|module| request.scope_filter.select(module))
            .collect();

        let outcome = GraphCollector::new().collect(&scopes);
        for warning in &outcome.warnings {
            self.warn(warnings, warning.to_string());
        }

        self.progress_reporter.report(&format!(
            "✅ Collected {} dependencies from {} scope(s)",
            outcome.result.dependencies().len(),
            scopes.len()
        ));
        outcome.result
    }

    /// A descriptor that cannot be read contributes nothing but a warning
    fn add_pinned_dependencies(
        &self,
        collection: &mut DependencyCollectionResult,
        path: &Path,
        warnings: &mut Vec<String>,
    ) {
        let pins = match self.pin_reader.read_pins(path) {
            Ok(pins) => pins,
            Err(e) => {
                self.warn(warnings, format!("Ignoring pinned dependencies: {}", e));
                return;
            }
        };

        for warning in pins.warnings {
            self.warn(warnings, warning);
        }

        let added = pins
            .dependencies
            .into_iter()
            .filter(|node| collection.add_root(node.clone()))
            .count();
        if added > 0 {
            self.progress_reporter
                .report(&format!("📌 Added {} pinned dependencies", added));
        }
    }

    /// Resolves every dependency's license, several at a time.
    ///
    /// Returns one lookup per dependency, in the same order.
    async fn resolve_licenses(
        &self,
        dependencies: &[DependencyNode],
        warnings: &mut Vec<String>,
    ) -> Vec<LicenseLookup> {
        let total = dependencies.len();
        if total == 0 {
            return Vec::new();
        }

        self.progress_reporter.report(&format!(
            "🔍 Resolving licenses via: {}",
            self.license_resolver.source_names().join(", ")
        ));

        let resolver = &self.license_resolver;
        let mut lookups = stream::iter(dependencies.iter().enumerate())
            .map(|(index, dependency)| async move { (index, resolver.resolve(dependency).await) })
            .buffer_unordered(LICENSE_LOOKUP_CONCURRENCY);

        let mut results: Vec<LicenseLookup> = vec![LicenseLookup::default(); total];
        let mut done = 0;
        while let Some((index, lookup)) = lookups.next().await {
            results[index] = lookup;
            done += 1;
            self.progress_reporter
                .report_progress(done, total, Some("Resolving licenses..."));
        }

        let mut found = 0;
        for (dependency, lookup) in dependencies.iter().zip(&results) {
            if lookup.record.is_some() {
                found += 1;
            } else if !lookup.failures.is_empty() {
                let reasons: Vec<String> = lookup
                    .failures
                    .iter()
                    .map(|(source, error)| format!("{}: {}", source, error))
                    .collect();
                self.warn(
                    warnings,
                    format!(
                        "Failed to resolve license for {}: {}",
                        dependency.id(),
                        reasons.join("; ")
                    ),
                );
            }
        }

        self.progress_reporter.report_completion(&format!(
            "✅ License resolution complete: {} of {} resolved",
            found, total
        ));
        results
    }

    /// Returns the findings and whether the check actually ran
    async fn check_vulnerabilities_if_requested(
        &self,
        request: &GenerationRequest,
        dependencies: &[DependencyNode],
        warnings: &mut Vec<String>,
    ) -> (Vec<ComponentVulnerabilities>, bool) {
        if !request.check_cve {
            return (Vec::new(), false);
        }

        let Some(repository) = &self.vulnerability_repository else {
            return (Vec::new(), false);
        };

        self.progress_reporter
            .report("🔐 Checking for vulnerabilities...");

        match repository.fetch_vulnerabilities(dependencies).await {
            Ok(findings) => {
                let total: usize = findings.iter().map(|f| f.vulnerabilities().len()).sum();
                if total > 0 {
                    self.progress_reporter.report_completion(&format!(
                        "✅ Vulnerability check complete: {} vulnerabilities found in {} dependencies",
                        total,
                        findings.len()
                    ));
                } else {
                    self.progress_reporter.report_completion(
                        "✅ Vulnerability check complete: No known vulnerabilities found",
                    );
                }
                (findings, true)
            }
            Err(e) => {
                self.warn(warnings, format!("Vulnerability check failed: {}", e));
                (Vec::new(), false)
            }
        }
    }

    fn build_components(
        dependencies: Vec<DependencyNode>,
        licenses: Vec<LicenseLookup>,
        vulnerabilities: &[ComponentVulnerabilities],
    ) -> Vec<ComponentEntry> {
        let by_id: HashMap<&DependencyId, &[Vulnerability]> = vulnerabilities
            .iter()
            .map(|c| (c.dependency_id(), c.vulnerabilities()))
            .collect();

        let mut licenses = licenses.into_iter();
        dependencies
            .into_iter()
            .map(|dependency| {
                let license = licenses.next().and_then(|lookup| lookup.record);
                let vulnerabilities = by_id
                    .get(dependency.id())
                    .map(|found| found.to_vec())
                    .unwrap_or_default();
                ComponentEntry {
                    dependency,
                    license,
                    vulnerabilities,
                }
            })
            .collect()
    }

    fn report_policy(&self, policy: &PolicyEvaluation) {
        if !policy.has_violations() {
            self.progress_reporter
                .report_completion("✅ No policy violations found");
            return;
        }

        for violation in policy.violations() {
            self.progress_reporter.report_warning(&violation.to_string());
        }
        self.progress_reporter
            .report(&format!("Policy check: {}", policy.summary()));
    }

    fn warn(&self, warnings: &mut Vec<String>, message: String) {
        self.progress_reporter.report_warning(&message);
        warnings.push(message);
    }
}
