use crate::ports::outbound::LicenseSource;
use crate::sbom_generation::domain::{DependencyId, DependencyNode, LicenseRecord};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingLicenseSource wraps a LicenseSource and memoizes its answers per
/// dependency id.
///
/// Decorator over any LicenseSource; the cache is thread-safe and lives as
/// long as the decorator, i.e. one generation run. Both "found" and "not
/// found" answers are cached; errors are not, so a failed lookup is retried
/// the next time it is asked for.
pub struct CachingLicenseSource<S: LicenseSource> {
    inner: S,
    cache: Arc<DashMap<DependencyId, Option<LicenseRecord>>>,
}

impl<S: LicenseSource> CachingLicenseSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<S: LicenseSource> LicenseSource for CachingLicenseSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn find_license(&self, dependency: &DependencyNode) -> Result<Option<LicenseRecord>> {
        if let Some(cached) = self.cache.get(dependency.id()) {
            return Ok(cached.clone());
        }

        let record = self.inner.find_license(dependency).await?;
        self.cache.insert(dependency.id().clone(), record.clone());
        Ok(record)
    }
}
