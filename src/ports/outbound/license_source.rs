use crate::sbom_generation::domain::{DependencyNode, LicenseRecord};
use crate::shared::Result;
use async_trait::async_trait;

/// LicenseSource port: one strategy for finding a dependency's license
///
/// `Ok(None)` means the source has no answer for this dependency.
/// An `Err` is a failed attempt (network, parse); callers treat both the
/// same way and move on to the next source.
///
/// # Async Support
/// Lookups are async so that many dependencies can be resolved
/// concurrently. Implementations must be `Send + Sync`.
#[async_trait]
pub trait LicenseSource: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    async fn find_license(&self, dependency: &DependencyNode) -> Result<Option<LicenseRecord>>;
}

#[async_trait]
impl<S: LicenseSource + ?Sized> LicenseSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn find_license(&self, dependency: &DependencyNode) -> Result<Option<LicenseRecord>> {
        (**self).find_license(dependency).await
    }
}
