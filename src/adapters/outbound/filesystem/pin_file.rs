//! Parsing of pin descriptors (`Package.resolved`, format versions 1 to 3).

use crate::ports::outbound::PinnedDependencies;
use crate::sbom_generation::domain::DependencyNode;
use crate::shared::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PinFile {
    #[serde(default)]
    pins: Option<Vec<Pin>>,
    /// Version 1 nests the pins one level deeper
    #[serde(default)]
    object: Option<PinObject>,
}

#[derive(Debug, Deserialize)]
struct PinObject {
    #[serde(default)]
    pins: Vec<Pin>,
}

#[derive(Debug, Deserialize)]
struct Pin {
    #[serde(alias = "package")]
    identity: String,
    #[serde(alias = "repositoryURL")]
    location: String,
    #[serde(default)]
    state: PinState,
}

#[derive(Debug, Default, Deserialize)]
struct PinState {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    revision: Option<String>,
}

/// Host, owner and repository parsed from a source-control location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    pub host: String,
    pub owner: String,
    pub repository: String,
}

impl RepositoryLocation {
    /// Accepts `https://host/owner/repo(.git)` and `git@host:owner/repo(.git)`
    pub fn parse(location: &str) -> Option<Self> {
        let trimmed = location.trim();
        let rest = if let Some(rest) = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
        {
            rest.to_string()
        } else {
            trimmed.strip_prefix("git@")?.replacen(':', "/", 1)
        };

        let mut parts = rest.trim_end_matches('/').split('/');
        let host = parts.next()?.to_lowercase();
        let owner = parts.next()?.to_string();
        let repository = parts.next()?.trim_end_matches(".git").to_string();
        if parts.next().is_some() || host.is_empty() || owner.is_empty() || repository.is_empty() {
            return None;
        }

        Some(Self {
            host,
            owner,
            repository,
        })
    }
}

/// Parses a pin descriptor. Entries that cannot become a dependency node are
/// reported as warnings and skipped.
pub fn parse_pins(content: &str) -> Result<PinnedDependencies> {
    let file: PinFile = serde_json::from_str(content)?;
    let pins = file
        .pins
        .or_else(|| file.object.map(|object| object.pins))
        .unwrap_or_default();

    let mut result = PinnedDependencies::default();
    for pin in pins {
        match into_node(&pin) {
            Ok(node) => result.dependencies.push(node),
            Err(e) => result
                .warnings
                .push(format!("Skipping pinned dependency '{}': {}", pin.identity, e)),
        }
    }
    Ok(result)
}

fn into_node(pin: &Pin) -> Result<DependencyNode> {
    let location = RepositoryLocation::parse(&pin.location)
        .ok_or_else(|| anyhow::anyhow!("unsupported location '{}'", pin.location))?;

    let version = pin
        .state
        .version
        .clone()
        .or_else(|| pin.state.revision.clone())
        .ok_or_else(|| anyhow::anyhow!("pin has neither a version nor a revision"))?;

    DependencyNode::pinned(
        format!("{}/{}", location.host, location.owner),
        location.repository,
        version,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_location_https() {
        let location = RepositoryLocation::parse("https://github.com/Alamofire/Alamofire.git").unwrap();
        assert_eq!(location.host, "github.com");
        assert_eq!(location.owner, "Alamofire");
        assert_eq!(location.repository, "Alamofire");
    }

    #[test]
    fn test_repository_location_ssh() {
        let location = RepositoryLocation::parse("git@github.com:pointfreeco/swift-composable-architecture.git").unwrap();
        assert_eq!(location.owner, "pointfreeco");
        assert_eq!(location.repository, "swift-composable-architecture");
    }

    #[test]
    fn test_repository_location_rejects_other_shapes() {
        assert!(RepositoryLocation::parse("/local/path/Package").is_none());
        assert!(RepositoryLocation::parse("https://github.com/only-owner").is_none());
        assert!(RepositoryLocation::parse("https://example.com/a/b/c").is_none());
    }

    #[test]
    fn test_parse_pins_v2() {
        let content = r#"{
            "pins": [
                {
                    "identity": "alamofire",
                    "kind": "remoteSourceControl",
                    "location": "https://github.com/Alamofire/Alamofire.git",
                    "state": { "revision": "3dc6a42c", "version": "5.8.1" }
                },
                {
                    "identity": "local",
                    "kind": "fileSystem",
                    "location": "/Users/dev/local",
                    "state": {}
                }
            ],
            "version": 2
        }"#;

        let result = parse_pins(content).unwrap();
        assert_eq!(result.dependencies.len(), 1);
        let node = &result.dependencies[0];
        assert_eq!(node.id().as_str(), "github.com/Alamofire:Alamofire:5.8.1");
        assert!(node.is_externally_pinned());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("local"));
    }

    #[test]
    fn test_parse_pins_v1_uses_revision_when_unversioned() {
        let content = r#"{
            "object": {
                "pins": [
                    {
                        "package": "Nimble",
                        "repositoryURL": "https://github.com/Quick/Nimble",
                        "state": { "branch": "main", "revision": "abc123", "version": null }
                    }
                ]
            },
            "version": 1
        }"#;

        let result = parse_pins(content).unwrap();
        assert_eq!(result.dependencies[0].version(), "abc123");
        assert_eq!(result.dependencies[0].group(), "github.com/Quick");
    }

    #[test]
    fn test_parse_pins_malformed() {
        assert!(parse_pins("[1, 2").is_err());
    }
}
