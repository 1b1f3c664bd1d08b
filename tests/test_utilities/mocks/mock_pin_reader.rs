use depgraph_sbom::prelude::*;
use std::path::Path;

/// Mock PinnedDependencyReader for testing
pub struct MockPinReader {
    pins: Option<PinnedDependencies>,
}

impl MockPinReader {
    pub fn new(pins: PinnedDependencies) -> Self {
        Self { pins: Some(pins) }
    }

    /// A reader with nothing to offer; reading always fails
    pub fn unreadable() -> Self {
        Self { pins: None }
    }
}

impl PinnedDependencyReader for MockPinReader {
    fn read_pins(&self, path: &Path) -> Result<PinnedDependencies> {
        self.pins
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Pin descriptor not readable: {}", path.display()))
    }
}
