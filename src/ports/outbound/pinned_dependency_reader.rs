use crate::sbom_generation::domain::DependencyNode;
use crate::shared::Result;
use std::path::Path;

/// Pins read from one descriptor, plus the entries that were skipped
#[derive(Debug, Clone, Default)]
pub struct PinnedDependencies {
    pub dependencies: Vec<DependencyNode>,
    pub warnings: Vec<String>,
}

/// PinnedDependencyReader port for dependencies fixed outside the build
/// tool's resolver (e.g. a Swift package pin file)
pub trait PinnedDependencyReader {
    /// Reads every pin of the descriptor at `path` as an externally pinned node
    ///
    /// # Errors
    /// Returns an error if the descriptor cannot be read or parsed at all.
    /// Individual unusable entries are reported in `warnings` instead.
    fn read_pins(&self, path: &Path) -> Result<PinnedDependencies>;
}
