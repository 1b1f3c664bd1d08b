use crate::adapters::outbound::pom::parse_declared_license;
use crate::ports::outbound::LicenseSource;
use crate::sbom_generation::domain::{DependencyNode, LicenseRecord};
use crate::shared::security::{validate_identifier_component, MAX_DESCRIPTOR_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

pub const MAVEN_CENTRAL_URL: &str = "https://repo1.maven.org/maven2";
pub const GOOGLE_MAVEN_URL: &str = "https://dl.google.com/dl/android/maven2";

/// MavenRepositoryLicenseSource adapter fetching POM descriptors from a
/// Maven-layout repository
///
/// A 404 means "not hosted here" and yields `Ok(None)`; other failures are
/// retried briefly and then returned as errors.
pub struct MavenRepositoryLicenseSource {
    name: String,
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl MavenRepositoryLicenseSource {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            max_retries: 2,
        }
    }

    pub fn maven_central(client: reqwest::Client) -> Self {
        Self::new("Maven Central", MAVEN_CENTRAL_URL, client)
    }

    pub fn google_maven(client: reqwest::Client) -> Self {
        Self::new("Google Maven", GOOGLE_MAVEN_URL, client)
    }

    /// Builds `<base>/<group path>/<name>/<version>/<name>-<version>.pom`.
    ///
    /// # Errors
    /// Refuses to build a URL from a component outside the safe character class
    pub fn descriptor_url(&self, dependency: &DependencyNode) -> Result<String> {
        validate_identifier_component(dependency.group(), "group")?;
        validate_identifier_component(dependency.name(), "name")?;
        validate_identifier_component(dependency.version(), "version")?;

        let group_path = dependency
            .group()
            .split('.')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let name = urlencoding::encode(dependency.name());
        let version = urlencoding::encode(dependency.version());

        Ok(format!(
            "{}/{}/{}/{}/{}-{}.pom",
            self.base_url, group_path, name, version, name, version
        ))
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<Option<String>> {
        let mut attempt = 1;
        loop {
            match self.fetch_descriptor(url).await {
                Ok(result) => return Ok(result),
                Err(e) if attempt >= self.max_retries => return Err(e),
                Err(_) => {
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn fetch_descriptor(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("{} returned status code {}", self.name, response.status());
        }
        if response
            .content_length()
            .is_some_and(|length| length > MAX_DESCRIPTOR_SIZE)
        {
            anyhow::bail!("{} descriptor at {} is too large", self.name, url);
        }

        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl LicenseSource for MavenRepositoryLicenseSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_license(&self, dependency: &DependencyNode) -> Result<Option<LicenseRecord>> {
        if dependency.is_externally_pinned() {
            return Ok(None);
        }

        let url = self.descriptor_url(dependency)?;
        let Some(content) = self.fetch_with_retry(&url).await? else {
            return Ok(None);
        };
        if content.len() as u64 > MAX_DESCRIPTOR_SIZE {
            anyhow::bail!("{} descriptor at {} is too large", self.name, url);
        }

        Ok(parse_declared_license(&content)?.and_then(|declared| declared.into_record()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::network::test_server::{StubRoute, StubServer};

    fn source() -> MavenRepositoryLicenseSource {
        MavenRepositoryLicenseSource::maven_central(reqwest::Client::new())
    }

    fn node(group: &str, name: &str, version: &str) -> DependencyNode {
        DependencyNode::new(group.to_string(), name.to_string(), version.to_string()).unwrap()
    }

    #[test]
    fn test_descriptor_url_layout() {
        let url = source()
            .descriptor_url(&node("org.jetbrains.kotlinx", "kotlinx-coroutines-core", "1.7.3"))
            .unwrap();
        assert_eq!(
            url,
            "https://repo1.maven.org/maven2/org/jetbrains/kotlinx/kotlinx-coroutines-core/1.7.3/kotlinx-coroutines-core-1.7.3.pom"
        );
    }

    #[test]
    fn test_google_maven_base_url() {
        let google = MavenRepositoryLicenseSource::google_maven(reqwest::Client::new());
        let url = google
            .descriptor_url(&node("androidx.core", "core-ktx", "1.12.0"))
            .unwrap();
        assert!(url.starts_with("https://dl.google.com/dl/android/maven2/androidx/core/core-ktx/"));
        assert_eq!(google.name(), "Google Maven");
    }

    #[test]
    fn test_descriptor_url_refuses_unsafe_components() {
        assert!(source().descriptor_url(&node("com.example", "lib", "1.0+build")).is_err());
        assert!(source().descriptor_url(&node("com.example", "..", "1.0")).is_err());
        assert!(source().descriptor_url(&node("github.com/owner", "repo", "1.0")).is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base() {
        let custom = MavenRepositoryLicenseSource::new("Mirror", "https://mirror.example/maven/", reqwest::Client::new());
        let url = custom.descriptor_url(&node("a.b", "c", "1")).unwrap();
        assert_eq!(url, "https://mirror.example/maven/a/b/c/1/c-1.pom");
    }

    #[tokio::test]
    async fn test_pinned_dependency_skipped_without_network() {
        let pinned = DependencyNode::pinned(
            "github.com/kean".to_string(),
            "Nuke".to_string(),
            "12.1.6".to_string(),
        )
        .unwrap();
        assert!(source().find_license(&pinned).await.unwrap().is_none());
    }

    const MIT_POM: &str =
        "<project><licenses><license><name>MIT License</name></license></licenses></project>";

    fn stub_repository(routes: Vec<StubRoute>) -> (StubServer, MavenRepositoryLicenseSource) {
        let server = StubServer::start(routes);
        let source = MavenRepositoryLicenseSource::new("Stub", server.url(), reqwest::Client::new());
        (server, source)
    }

    #[tokio::test]
    async fn test_hosted_descriptor_yields_record() {
        let (_server, source) = stub_repository(vec![StubRoute::new(
            "/com/example/lib/1.0/lib-1.0.pom",
            200,
            MIT_POM,
        )]);
        let record = source
            .find_license(&node("com.example", "lib", "1.0"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.id(), "MIT");
    }

    #[tokio::test]
    async fn test_not_found_is_not_hosted_here() {
        let (_server, source) = stub_repository(vec![]);
        assert!(source
            .find_license(&node("com.example", "missing", "1.0"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_error_after_retries() {
        let (_server, source) = stub_repository(vec![StubRoute::new("/com/example/", 500, "")]);
        let err = source
            .find_license(&node("com.example", "lib", "1.0"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Stub returned status code 500"));
    }

    #[tokio::test]
    async fn test_oversize_descriptor_is_error() {
        let huge = "x".repeat(MAX_DESCRIPTOR_SIZE as usize + 1);
        let (_server, source) = stub_repository(vec![StubRoute::new("/com/example/", 200, huge)]);
        let err = source
            .find_license(&node("com.example", "lib", "1.0"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
