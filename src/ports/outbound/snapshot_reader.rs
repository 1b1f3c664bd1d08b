use crate::sbom_generation::domain::ProjectSnapshot;
use crate::shared::Result;
use std::path::Path;

/// ProjectSnapshotReader port for loading the host build's resolution state
///
/// The snapshot is produced by the build tool; this port only loads it.
pub trait ProjectSnapshotReader {
    /// Reads and validates the snapshot document at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist, is a symlink, or exceeds the size limit
    /// - The document is not a valid snapshot
    fn read_snapshot(&self, path: &Path) -> Result<ProjectSnapshot>;
}
