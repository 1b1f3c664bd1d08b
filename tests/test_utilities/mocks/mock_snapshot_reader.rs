use depgraph_sbom::prelude::*;
use std::path::Path;

/// Mock ProjectSnapshotReader for testing
pub struct MockSnapshotReader {
    snapshot: ProjectSnapshot,
}

impl MockSnapshotReader {
    pub fn new(snapshot: ProjectSnapshot) -> Self {
        Self { snapshot }
    }
}

impl ProjectSnapshotReader for MockSnapshotReader {
    fn read_snapshot(&self, _path: &Path) -> Result<ProjectSnapshot> {
        Ok(self.snapshot.clone())
    }
}
