/// Network adapters for external API calls
mod caching_license_source;
mod github_license_client;
mod http_client;
mod maven_repository_client;
mod osv_client;
#[cfg(test)]
mod test_server;

pub use caching_license_source::CachingLicenseSource;
pub use github_license_client::{GitHubLicenseSource, GITHUB_API_URL};
pub use http_client::build_http_client;
pub use maven_repository_client::{MavenRepositoryLicenseSource, GOOGLE_MAVEN_URL, MAVEN_CENTRAL_URL};
pub use osv_client::OsvClient;
