use depgraph_sbom::prelude::*;

/// Mock CiEnvironment with fixed answers
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCiEnvironment {
    pub is_ci: bool,
    pub is_pull_request: bool,
}

impl MockCiEnvironment {
    pub fn local() -> Self {
        Self::default()
    }

    pub fn pull_request() -> Self {
        Self {
            is_ci: true,
            is_pull_request: true,
        }
    }
}

impl CiEnvironment for MockCiEnvironment {
    fn is_ci(&self) -> bool {
        self.is_ci
    }

    fn is_pull_request(&self) -> bool {
        self.is_pull_request
    }
}
