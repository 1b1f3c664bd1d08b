use crate::sbom_generation::domain::{SeverityLevel, Vulnerability};
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::collections::HashSet;
use std::fmt;

/// How discovered vulnerabilities are judged.
///
/// Switching the check off and zero tolerance are distinct values:
/// `MaxAllowed(SeverityLevel::None)` blocks every finding, including
/// findings without severity data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VulnerabilityPolicy {
    Disabled,
    MaxAllowed(SeverityLevel),
}

impl VulnerabilityPolicy {
    /// Parses a config value: `DISABLED` or a severity name (case-insensitive)
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("disabled") {
            return Ok(VulnerabilityPolicy::Disabled);
        }
        trimmed
            .parse::<SeverityLevel>()
            .map(VulnerabilityPolicy::MaxAllowed)
            .map_err(|e| {
                SbomError::Validation {
                    message: format!(
                        "max_allowed_severity: {}. Expected DISABLED, NONE, LOW, MEDIUM, HIGH or CRITICAL",
                        e
                    ),
                }
                .into()
            })
    }

    /// Whether one finding breaches this policy
    pub fn is_violated_by(&self, vulnerability: &Vulnerability) -> bool {
        match self {
            VulnerabilityPolicy::Disabled => false,
            VulnerabilityPolicy::MaxAllowed(SeverityLevel::None) => true,
            VulnerabilityPolicy::MaxAllowed(max) => vulnerability.severity().is_more_severe_than(*max),
        }
    }
}

impl Default for VulnerabilityPolicy {
    fn default() -> Self {
        VulnerabilityPolicy::MaxAllowed(SeverityLevel::None)
    }
}

impl fmt::Display for VulnerabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VulnerabilityPolicy::Disabled => write!(f, "DISABLED"),
            VulnerabilityPolicy::MaxAllowed(level) => write!(f, "{}", level),
        }
    }
}

/// When policy violations stop the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailPolicy {
    #[default]
    Always,
    PullRequest,
    Never,
}

impl FailPolicy {
    /// Parses a config value. Unrecognized values fall back to `Never`;
    /// the second element carries the warning to report in that case.
    pub fn parse_lenient(raw: &str) -> (Self, Option<String>) {
        match raw.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ALWAYS" => (FailPolicy::Always, None),
            "PULL_REQUEST" => (FailPolicy::PullRequest, None),
            "NEVER" => (FailPolicy::Never, None),
            _ => (
                FailPolicy::Never,
                Some(format!(
                    "Unknown fail_on_violation value '{}'; violations will be reported but will not fail the run",
                    raw
                )),
            ),
        }
    }
}

impl fmt::Display for FailPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailPolicy::Always => write!(f, "ALWAYS"),
            FailPolicy::PullRequest => write!(f, "PULL_REQUEST"),
            FailPolicy::Never => write!(f, "NEVER"),
        }
    }
}

/// Policy values consumed by the violation evaluator
#[derive(Debug, Clone, Default)]
pub struct PolicyConfig {
    allowed_licenses: Vec<String>,
    allowed_lowercase: HashSet<String>,
    vulnerability_policy: VulnerabilityPolicy,
    fail_policy: FailPolicy,
}

impl PolicyConfig {
    /// # Errors
    /// Returns a validation error if an allowed license id is blank
    pub fn new(
        allowed_licenses: Vec<String>,
        vulnerability_policy: VulnerabilityPolicy,
        fail_policy: FailPolicy,
    ) -> Result<Self> {
        if let Some(position) = allowed_licenses.iter().position(|l| l.trim().is_empty()) {
            return Err(SbomError::Validation {
                message: format!("allowed_licenses[{}] is empty", position),
            }
            .into());
        }

        let allowed_lowercase = allowed_licenses
            .iter()
            .map(|l| l.trim().to_lowercase())
            .collect();

        Ok(Self {
            allowed_licenses,
            allowed_lowercase,
            vulnerability_policy,
            fail_policy,
        })
    }

    pub fn allowed_licenses(&self) -> &[String] {
        &self.allowed_licenses
    }

    /// The license check runs only when an allow-list is configured
    pub fn checks_licenses(&self) -> bool {
        !self.allowed_lowercase.is_empty()
    }

    pub fn is_license_allowed(&self, id: &str) -> bool {
        self.allowed_lowercase.contains(&id.trim().to_lowercase())
    }

    pub fn vulnerability_policy(&self) -> VulnerabilityPolicy {
        self.vulnerability_policy
    }

    pub fn fail_policy(&self) -> FailPolicy {
        self.fail_policy
    }
}
