use super::pin_file::parse_pins;
use super::snapshot_document::parse_snapshot;
use crate::ports::outbound::{PinnedDependencies, PinnedDependencyReader, ProjectSnapshotReader};
use crate::sbom_generation::domain::ProjectSnapshot;
use crate::shared::error::SbomError;
use crate::shared::security::{read_checked, MAX_DESCRIPTOR_SIZE, MAX_FILE_SIZE};
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading input documents from the file system
///
/// Implements both ProjectSnapshotReader and PinnedDependencyReader. Every
/// read goes through the shared security checks (regular file, no symlink,
/// size limit).
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectSnapshotReader for FileSystemReader {
    fn read_snapshot(&self, path: &Path) -> Result<ProjectSnapshot> {
        if !path.exists() {
            return Err(SbomError::SnapshotNotFound {
                path: path.to_path_buf(),
                suggestion: "Export the project snapshot from the build first, or pass the correct file with --snapshot.".to_string(),
            }
            .into());
        }

        let content = read_checked(path, "project snapshot", MAX_FILE_SIZE).map_err(|e| {
            SbomError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        parse_snapshot(&content).map_err(|e| {
            SbomError::SnapshotParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl PinnedDependencyReader for FileSystemReader {
    fn read_pins(&self, path: &Path) -> Result<PinnedDependencies> {
        let content = read_checked(path, "pinned dependency descriptor", MAX_DESCRIPTOR_SIZE)?;
        parse_pins(&content).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse pinned dependency descriptor {}: {}",
                path.display(),
                e
            )
        })
    }
}
