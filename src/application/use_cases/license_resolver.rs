use crate::ports::outbound::LicenseSource;
use crate::sbom_generation::domain::{DependencyNode, LicenseRecord};

/// Outcome of one license lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseLookup {
    pub record: Option<LicenseRecord>,
    /// Name of the source that answered
    pub source: Option<String>,
    /// Sources that failed before an answer was found, with their error
    pub failures: Vec<(String, String)>,
}

/// LicenseResolver - Ordered chain of license sources
///
/// Sources are asked in order and the first `Some` wins. A source that
/// fails is treated like one that has no answer: the chain moves on and
/// the failure is only recorded. When nothing answers the lookup yields
/// no record, which callers treat as data, not as an error.
pub struct LicenseResolver {
    sources: Vec<Box<dyn LicenseSource>>,
}

impl LicenseResolver {
    pub fn new(sources: Vec<Box<dyn LicenseSource>>) -> Self {
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    pub async fn resolve(&self, dependency: &DependencyNode) -> LicenseLookup {
        let mut lookup = LicenseLookup::default();

        for source in &self.sources {
            match source.find_license(dependency).await {
                Ok(Some(record)) => {
                    lookup.record = Some(record);
                    lookup.source = Some(source.name().to_string());
                    break;
                }
                Ok(None) => {}
                Err(e) => lookup
                    .failures
                    .push((source.name().to_string(), e.to_string())),
            }
        }

        lookup
    }
}
