use crate::ports::outbound::LicenseSource;
use crate::sbom_generation::domain::{DependencyNode, LicenseRecord};
use crate::shared::security::validate_identifier_component;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Group prefix under which pinned GitHub repositories are recorded
const GITHUB_GROUP_PREFIX: &str = "github.com/";

/// GitHub's placeholder for a license it could not classify
const NO_ASSERTION: &str = "NOASSERTION";

#[derive(Debug, Deserialize)]
struct RepositoryLicenseResponse {
    #[serde(default)]
    html_url: Option<String>,
    license: Option<LicenseInfo>,
}

#[derive(Debug, Deserialize)]
struct LicenseInfo {
    #[serde(default)]
    spdx_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// GitHubLicenseSource adapter asking the GitHub REST API for the license
/// of an externally pinned repository
///
/// Only dependencies whose group is `github.com/<owner>` are looked up.
/// Requests are unauthenticated.
pub struct GitHubLicenseSource {
    api_url: String,
    client: reqwest::Client,
}

impl GitHubLicenseSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_api_url(GITHUB_API_URL, client)
    }

    pub fn with_api_url(api_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Owner and repository encoded in a pinned dependency's identity
    fn repository_of(dependency: &DependencyNode) -> Option<(&str, &str)> {
        if !dependency.is_externally_pinned() {
            return None;
        }
        let owner = dependency.group().strip_prefix(GITHUB_GROUP_PREFIX)?;
        Some((owner, dependency.name()))
    }

    /// Builds the license endpoint URL; refuses unsafe owner/repository names
    pub fn license_url(&self, owner: &str, repository: &str) -> Result<String> {
        validate_identifier_component(owner, "repository owner")?;
        validate_identifier_component(repository, "repository name")?;
        Ok(format!(
            "{}/repos/{}/{}/license",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(repository)
        ))
    }
}

/// Converts the API response to a record; unclassified licenses yield `None`
fn into_record(response: RepositoryLicenseResponse) -> Option<LicenseRecord> {
    let license = response.license?;
    let spdx_id = license
        .spdx_id
        .filter(|id| !id.is_empty() && id != NO_ASSERTION)?;
    let name = license.name.unwrap_or_else(|| spdx_id.clone());
    Some(LicenseRecord::new(spdx_id, name, response.html_url))
}

#[async_trait]
impl LicenseSource for GitHubLicenseSource {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn find_license(&self, dependency: &DependencyNode) -> Result<Option<LicenseRecord>> {
        let Some((owner, repository)) = Self::repository_of(dependency) else {
            return Ok(None);
        };
        let url = self.license_url(owner, repository)?;

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("GitHub API returned status code {}", response.status());
        }

        let body: RepositoryLicenseResponse = response.json().await?;
        Ok(into_record(body))
    }
}
