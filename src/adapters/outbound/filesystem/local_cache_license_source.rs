use crate::adapters::outbound::pom::parse_declared_license;
use crate::ports::outbound::LicenseSource;
use crate::sbom_generation::domain::{DependencyNode, LicenseRecord};
use crate::shared::security::{read_checked, validate_identifier_component, MAX_DESCRIPTOR_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// How many directory levels below `<group>/<name>/<version>` are searched
const MAX_SEARCH_DEPTH: usize = 2;

/// LocalCacheLicenseSource adapter reading POMs from a local artifact cache
///
/// Expects the Gradle module cache layout:
/// `<root>/<group>/<name>/<version>/<hash>/<name>-<version>.pom`.
/// The lookup never touches the network.
pub struct LocalCacheLicenseSource {
    root: PathBuf,
}

impl LocalCacheLicenseSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Default cache root: `$GRADLE_USER_HOME/caches/modules-2/files-2.1`,
    /// falling back to `~/.gradle`
    pub fn default_root() -> Option<PathBuf> {
        let gradle_home = std::env::var_os("GRADLE_USER_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join(".gradle")))?;
        Some(gradle_home.join("caches").join("modules-2").join("files-2.1"))
    }
}

/// Finds the descriptor file for a dependency, if it is cached
fn locate_descriptor(root: &Path, dependency: &DependencyNode) -> Result<Option<PathBuf>> {
    validate_identifier_component(dependency.group(), "group")?;
    validate_identifier_component(dependency.name(), "name")?;
    validate_identifier_component(dependency.version(), "version")?;

    let version_dir = root
        .join(dependency.group())
        .join(dependency.name())
        .join(dependency.version());
    if !version_dir.is_dir() {
        return Ok(None);
    }

    let file_name = format!("{}-{}.pom", dependency.name(), dependency.version());
    Ok(find_file(&version_dir, &file_name, MAX_SEARCH_DEPTH))
}

/// Blocking lookup: locate, read and parse the cached descriptor
fn read_license(root: &Path, dependency: &DependencyNode) -> Result<Option<LicenseRecord>> {
    let Some(descriptor) = locate_descriptor(root, dependency)? else {
        return Ok(None);
    };

    let content = read_checked(&descriptor, "license descriptor", MAX_DESCRIPTOR_SIZE)?;
    Ok(parse_declared_license(&content)?.and_then(|declared| declared.into_record()))
}

/// Breadth-first search for `file_name`; directory entries are visited in
/// sorted order so the result does not depend on the file system
fn find_file(dir: &Path, file_name: &str, max_depth: usize) -> Option<PathBuf> {
    let mut level = vec![dir.to_path_buf()];

    for _ in 0..=max_depth {
        let mut next = Vec::new();
        for current in &level {
            let candidate = current.join(file_name);
            if candidate.is_file() {
                return Some(candidate);
            }
            let Ok(entries) = fs::read_dir(current) else {
                continue;
            };
            let mut subdirs: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
                .map(|entry| entry.path())
                .collect();
            subdirs.sort();
            next.extend(subdirs);
        }
        level = next;
    }

    None
}

#[async_trait]
impl LicenseSource for LocalCacheLicenseSource {
    fn name(&self) -> &str {
        "local cache"
    }

    async fn find_license(&self, dependency: &DependencyNode) -> Result<Option<LicenseRecord>> {
        if dependency.is_externally_pinned() {
            return Ok(None);
        }

        let root = self.root.clone();
        let dependency = dependency.clone();
        tokio::task::spawn_blocking(move || read_license(&root, &dependency)).await?
    }
}
