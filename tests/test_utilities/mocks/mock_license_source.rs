use async_trait::async_trait;
use depgraph_sbom::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock LicenseSource for testing
///
/// Answers from an in-memory table keyed by `group:name:version`; ids
/// registered with `with_failure` fail instead.
#[derive(Clone)]
pub struct MockLicenseSource {
    name: String,
    licenses: HashMap<String, LicenseRecord>,
    failures: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockLicenseSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            licenses: HashMap::new(),
            failures: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_license(mut self, id: &str, license_id: &str) -> Self {
        self.licenses.insert(
            id.to_string(),
            LicenseRecord::new(license_id.to_string(), license_id.to_string(), None),
        );
        self
    }

    pub fn with_failure(mut self, id: &str, error: &str) -> Self {
        self.failures.insert(id.to_string(), error.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LicenseSource for MockLicenseSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_license(&self, dependency: &DependencyNode) -> Result<Option<LicenseRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = dependency.id().as_str();
        if let Some(error) = self.failures.get(id) {
            anyhow::bail!("{}", error);
        }
        Ok(self.licenses.get(id).cloned())
    }
}
