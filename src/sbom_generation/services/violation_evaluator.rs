use crate::sbom_generation::domain::{
    ComponentVulnerabilities, DependencyId, LicenseRecord, Violation, ViolationKind,
};
use crate::sbom_generation::policies::{FailPolicy, PolicyConfig};
use crate::shared::error::SbomError;
use serde::Serialize;

/// Environment facts the pull-request fail policy depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CiContext {
    pub is_ci: bool,
    pub is_pull_request: bool,
}

/// Violations found plus the pass/fail decision
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolicyEvaluation {
    violations: Vec<Violation>,
    should_fail: bool,
}

impl PolicyEvaluation {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn should_fail(&self) -> bool {
        self.should_fail
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn count(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind() == kind).count()
    }

    /// One-line count of violations by kind
    pub fn summary(&self) -> String {
        format!(
            "{} license violation(s), {} vulnerability violation(s)",
            self.count(ViolationKind::License),
            self.count(ViolationKind::Vulnerability)
        )
    }

    /// The build-stopping error for this evaluation
    pub fn to_error(&self) -> SbomError {
        SbomError::PolicyViolation {
            license_violations: self.count(ViolationKind::License),
            vulnerability_violations: self.count(ViolationKind::Vulnerability),
        }
    }
}

/// ViolationEvaluator - Judges finished license and vulnerability data
/// against a policy configuration
pub struct ViolationEvaluator;

impl ViolationEvaluator {
    /// Evaluates all components.
    ///
    /// # Arguments
    /// * `licenses` - each component id with its resolved licenses (empty if none)
    /// * `vulnerabilities` - findings per component
    /// * `config` - allowed licenses, vulnerability policy and fail policy
    /// * `ci` - whether the run is in CI and in a pull-request context
    pub fn evaluate<'a, I>(
        licenses: I,
        vulnerabilities: &[ComponentVulnerabilities],
        config: &PolicyConfig,
        ci: CiContext,
    ) -> PolicyEvaluation
    where
        I: IntoIterator<Item = (&'a DependencyId, &'a [LicenseRecord])>,
    {
        let mut violations = Vec::new();

        if config.checks_licenses() {
            for (id, records) in licenses {
                Self::check_licenses(id, records, config, &mut violations);
            }
        }

        let policy = config.vulnerability_policy();
        for component in vulnerabilities {
            for vulnerability in component.vulnerabilities() {
                if policy.is_violated_by(vulnerability) {
                    violations.push(Violation::new(
                        ViolationKind::Vulnerability,
                        component.dependency_id().to_string(),
                        format!(
                            "{} has severity {}, maximum allowed is {}",
                            vulnerability.id(),
                            vulnerability.severity(),
                            policy
                        ),
                    ));
                }
            }
        }

        let should_fail = Self::should_fail(!violations.is_empty(), config.fail_policy(), ci);

        PolicyEvaluation {
            violations,
            should_fail,
        }
    }

    fn check_licenses(
        id: &DependencyId,
        records: &[LicenseRecord],
        config: &PolicyConfig,
        violations: &mut Vec<Violation>,
    ) {
        if records.is_empty() {
            violations.push(Violation::new(
                ViolationKind::License,
                id.to_string(),
                "missing license".to_string(),
            ));
            return;
        }

        for record in records {
            if !config.is_license_allowed(record.id()) {
                violations.push(Violation::new(
                    ViolationKind::License,
                    id.to_string(),
                    format!("license '{}' is not allowed", record.id()),
                ));
            }
        }
    }

    fn should_fail(has_violations: bool, policy: FailPolicy, ci: CiContext) -> bool {
        if !has_violations {
            return false;
        }
        match policy {
            FailPolicy::Always => true,
            FailPolicy::PullRequest => ci.is_ci && ci.is_pull_request,
            FailPolicy::Never => false,
        }
    }
}
