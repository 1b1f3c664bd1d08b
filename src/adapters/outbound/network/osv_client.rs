use crate::ports::outbound::VulnerabilityRepository;
use crate::sbom_generation::domain::{
    ComponentVulnerabilities, DependencyNode, SeverityLevel, Vulnerability,
};
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// OSV API client for fetching vulnerability data
///
/// Uses the OSV.dev batch query API to find affected dependencies, then
/// fetches each advisory for its severity and fix version.
/// Maven packages are queried as `group:name`.
pub struct OsvClient {
    client: reqwest::Client,
    api_url: String,
}

impl OsvClient {
    const API_URL: &'static str = "https://api.osv.dev/v1";
    const ECOSYSTEM: &'static str = "Maven";
    const RATE_LIMIT_MS: u64 = 100;
    const MAX_BATCH_SIZE: usize = 100; // OSV API limit
    const DETAIL_CONCURRENCY: usize = 4;

    pub fn new(client: reqwest::Client) -> Self {
        Self::with_api_url(Self::API_URL, client)
    }

    pub fn with_api_url(api_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the batch query; pinned dependencies are not Maven packages
    fn build_queries(dependencies: &[&DependencyNode]) -> OsvBatchQuery {
        OsvBatchQuery {
            queries: dependencies
                .iter()
                .map(|dep| OsvQuery {
                    package: OsvPackage {
                        name: format!("{}:{}", dep.group(), dep.name()),
                        ecosystem: Self::ECOSYSTEM.to_string(),
                    },
                    version: dep.version().to_string(),
                })
                .collect(),
        }
    }

    async fn fetch_batch(&self, dependencies: &[&DependencyNode]) -> Result<Vec<OsvResult>> {
        let url = format!("{}/querybatch", self.api_url);
        let response = self
            .client
            .post(&url)
            .json(&Self::build_queries(dependencies))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        let batch: OsvBatchResponse = response.json().await?;
        if batch.results.len() != dependencies.len() {
            anyhow::bail!(
                "OSV API returned {} results for {} queries",
                batch.results.len(),
                dependencies.len()
            );
        }
        Ok(batch.results)
    }

    /// The batch API returns only ids; severity needs the full advisory
    async fn fetch_vulnerability_details(&self, vuln_id: &str) -> Result<OsvVulnerability> {
        let url = format!("{}/vulns/{}", self.api_url, urlencoding::encode(vuln_id));
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "OSV API returned status code {} for vulnerability {}",
                response.status(),
                vuln_id
            );
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl VulnerabilityRepository for OsvClient {
    async fn fetch_vulnerabilities(
        &self,
        dependencies: &[DependencyNode],
    ) -> Result<Vec<ComponentVulnerabilities>> {
        let registry: Vec<&DependencyNode> = dependencies
            .iter()
            .filter(|dep| !dep.is_externally_pinned())
            .collect();

        // Step 1: which dependencies have advisories at all
        let mut affected: Vec<(&DependencyNode, Vec<String>)> = Vec::new();
        for (index, chunk) in registry.chunks(Self::MAX_BATCH_SIZE).enumerate() {
            if index > 0 {
                tokio::time::sleep(Duration::from_millis(Self::RATE_LIMIT_MS)).await;
            }
            let results = self.fetch_batch(chunk).await?;
            for (dep, result) in chunk.iter().zip(results) {
                if !result.vulns.is_empty() {
                    affected.push((dep, result.vulns.into_iter().map(|v| v.id).collect()));
                }
            }
        }

        // Step 2: advisory details, each id fetched once
        let mut ids: Vec<String> = affected
            .iter()
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let details: HashMap<String, Vulnerability> = stream::iter(ids)
            .map(|id| async move {
                let result = self.fetch_vulnerability_details(&id).await;
                (id, result)
            })
            .buffer_unordered(Self::DETAIL_CONCURRENCY)
            .filter_map(|(id, result)| async move {
                let vuln = result
                    .and_then(|advisory| convert_to_vulnerability(&advisory))
                    .or_else(|e| unrated_vulnerability(&id, &e))
                    .ok()?;
                Some((id, vuln))
            })
            .collect()
            .await;

        Ok(affected
            .into_iter()
            .filter_map(|(dep, ids)| {
                let vulnerabilities: Vec<Vulnerability> =
                    ids.iter().filter_map(|id| details.get(id).cloned()).collect();
                (!vulnerabilities.is_empty())
                    .then(|| ComponentVulnerabilities::new(dep.id().clone(), vulnerabilities))
            })
            .collect())
    }
}

/// A finding whose advisory could not be fetched or read keeps its id with
/// an unknown severity, so policy evaluation still sees it.
fn unrated_vulnerability(id: &str, error: &anyhow::Error) -> Result<Vulnerability> {
    Vulnerability::new(
        id.to_string(),
        SeverityLevel::None,
        None,
        None,
        Some(format!("Advisory details unavailable: {}", error)),
    )
}

/// Converts one OSV advisory to the domain model.
///
/// Severity: CVSS v3 vector score first, then the database-specific
/// severity label, otherwise `None`.
fn convert_to_vulnerability(osv_vuln: &OsvVulnerability) -> Result<Vulnerability> {
    let cvss_score = osv_vuln
        .severity
        .as_ref()
        .and_then(|severities| severities.iter().find(|s| s.severity_type == "CVSS_V3"))
        .and_then(|s| parse_cvss_score(&s.score));

    let severity = if let Some(score) = cvss_score {
        SeverityLevel::from_cvss_score(score)
    } else if let Some(label) = osv_vuln
        .database_specific
        .as_ref()
        .and_then(|db| db.severity.as_deref())
    {
        SeverityLevel::from_advisory_label(label)
    } else {
        SeverityLevel::None
    };

    let fixed_version = osv_vuln.affected.as_ref().and_then(|affected| {
        affected.iter().find_map(|a| {
            a.ranges
                .as_ref()?
                .iter()
                .find_map(|r| r.events.iter().find_map(|e| e.fixed.clone()))
        })
    });

    Vulnerability::new(
        osv_vuln.id.clone(),
        severity,
        cvss_score,
        fixed_version,
        osv_vuln.summary.clone(),
    )
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvBatchQuery {
    queries: Vec<OsvQuery>,
}

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    version: String,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: String,
}

#[derive(Debug, Deserialize)]
struct OsvBatchResponse {
    results: Vec<OsvResult>,
}

#[derive(Debug, Deserialize)]
struct OsvResult {
    #[serde(default)]
    vulns: Vec<OsvVulnerabilityRef>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerabilityRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    severity: Option<Vec<OsvSeverity>>,
    #[serde(default)]
    database_specific: Option<DatabaseSpecific>,
    #[serde(default)]
    affected: Option<Vec<OsvAffected>>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String, // "CVSS_V3"
    score: String,         // e.g., "CVSS:3.1/AV:N/AC:L/..."
}

#[derive(Debug, Deserialize)]
struct DatabaseSpecific {
    #[serde(default)]
    severity: Option<String>, // "CRITICAL", "HIGH", "MODERATE", "LOW"
}

#[derive(Debug, Deserialize)]
struct OsvAffected {
    #[serde(default)]
    ranges: Option<Vec<OsvRange>>,
}

#[derive(Debug, Deserialize)]
struct OsvRange {
    events: Vec<OsvEvent>,
}

#[derive(Debug, Deserialize)]
struct OsvEvent {
    #[serde(default)]
    fixed: Option<String>,
}

/// Computes the CVSS v3 base score from a vector string
///
/// Example: "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H" -> Some(9.8)
fn parse_cvss_score(cvss_vector: &str) -> Option<f64> {
    let mut parts = cvss_vector.split('/');
    if !parts.next()?.starts_with("CVSS:3") {
        return None;
    }
    let metrics: HashMap<&str, &str> = parts.filter_map(|part| part.split_once(':')).collect();

    let scope_changed = match *metrics.get("S")? {
        "U" => false,
        "C" => true,
        _ => return None,
    };

    let av = match *metrics.get("AV")? {
        "N" => 0.85,
        "A" => 0.62,
        "L" => 0.55,
        "P" => 0.2,
        _ => return None,
    };
    let ac = match *metrics.get("AC")? {
        "L" => 0.77,
        "H" => 0.44,
        _ => return None,
    };
    let pr = match (*metrics.get("PR")?, scope_changed) {
        ("N", _) => 0.85,
        ("L", false) => 0.62,
        ("L", true) => 0.68,
        ("H", false) => 0.27,
        ("H", true) => 0.5,
        _ => return None,
    };
    let ui = match *metrics.get("UI")? {
        "N" => 0.85,
        "R" => 0.62,
        _ => return None,
    };
    let cia = |key: &str| -> Option<f64> {
        match *metrics.get(key)? {
            "N" => Some(0.0),
            "L" => Some(0.22),
            "H" => Some(0.56),
            _ => None,
        }
    };
    let (c, i, a) = (cia("C")?, cia("I")?, cia("A")?);

    let iss = 1.0 - ((1.0 - c) * (1.0 - i) * (1.0 - a));
    let impact = if scope_changed {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02_f64).powi(15)
    } else {
        6.42 * iss
    };
    let exploitability = 8.22 * av * ac * pr * ui;

    let base_score = if impact <= 0.0 {
        0.0
    } else if scope_changed {
        f64::min(1.08 * (impact + exploitability), 10.0)
    } else {
        f64::min(impact + exploitability, 10.0)
    };

    Some(round_up(base_score))
}

/// CVSS v3.1 "Roundup": smallest one-decimal number >= input
fn round_up(value: f64) -> f64 {
    let scaled = (value * 100_000.0).round() as i64;
    if scaled % 10_000 == 0 {
        scaled as f64 / 100_000.0
    } else {
        ((scaled / 10_000) + 1) as f64 / 10.0
    }
}
