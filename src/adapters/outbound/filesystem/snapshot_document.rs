//! Serde model of the project snapshot JSON exported by the host build.

use crate::sbom_generation::domain::{
    BuildModule, ComponentIdentity, DependencyId, LibraryCoordinates, ModuleId, NodeIndex,
    ProjectSnapshot, ResolutionGraph, Scope, ScopeResolution,
};
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    root_module: Option<String>,
    #[serde(default)]
    modules: Vec<ModuleDocument>,
}

#[derive(Debug, Deserialize)]
struct ModuleDocument {
    id: String,
    #[serde(default)]
    scopes: Vec<ScopeDocument>,
}

#[derive(Debug, Deserialize)]
struct ScopeDocument {
    name: String,
    #[serde(default = "default_resolvable")]
    resolvable: bool,
    #[serde(default)]
    module_dependencies: Vec<String>,
    #[serde(default)]
    artifacts: BTreeMap<String, PathBuf>,
    #[serde(default)]
    graph: Option<GraphDocument>,
    #[serde(default)]
    error: Option<String>,
}

fn default_resolvable() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    root: NodeIndex,
    nodes: Vec<NodeDocument>,
}

#[derive(Debug, Deserialize)]
struct NodeDocument {
    #[serde(flatten)]
    identity: IdentityDocument,
    #[serde(default)]
    children: Vec<NodeIndex>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum IdentityDocument {
    Library {
        group: String,
        name: String,
        version: String,
    },
    Module(String),
}

/// Parses snapshot JSON into the domain model.
///
/// Structural problems (bad JSON, invalid artifact ids) are errors. Dangling
/// child indices are kept as-is; traversal reports them.
pub fn parse_snapshot(content: &str) -> Result<ProjectSnapshot> {
    let document: SnapshotDocument = serde_json::from_str(content)?;

    let modules = document
        .modules
        .into_iter()
        .map(into_module)
        .collect::<Result<Vec<_>>>()?;

    Ok(ProjectSnapshot::new(
        document.root_module.map(ModuleId::new),
        modules,
    ))
}

fn into_module(document: ModuleDocument) -> Result<BuildModule> {
    let scopes = document
        .scopes
        .into_iter()
        .map(into_scope)
        .collect::<Result<Vec<_>>>()?;
    Ok(BuildModule::new(ModuleId::new(document.id), scopes))
}

fn into_scope(document: ScopeDocument) -> Result<Scope> {
    let resolution = match (document.error, document.graph) {
        (Some(error), _) => ScopeResolution::Failed(error),
        (None, Some(graph)) => ScopeResolution::Resolved(into_graph(graph)),
        (None, None) => ScopeResolution::Failed("no resolution result exported".to_string()),
    };

    let mut scope = Scope::new(document.name, resolution).with_resolvable(document.resolvable);
    for module in document.module_dependencies {
        scope = scope.with_module_dependency(ModuleId::new(module));
    }
    for (raw_id, path) in document.artifacts {
        let id = DependencyId::parse(&raw_id)
            .map_err(|e| anyhow::anyhow!("Invalid artifact key in scope '{}': {}", scope.name(), e))?;
        scope = scope.with_artifact(id, path);
    }
    Ok(scope)
}

fn into_graph(document: GraphDocument) -> ResolutionGraph {
    let nodes = document
        .nodes
        .into_iter()
        .map(|node| {
            let identity = match node.identity {
                IdentityDocument::Library {
                    group,
                    name,
                    version,
                } => ComponentIdentity::Library(LibraryCoordinates::new(group, name, version)),
                IdentityDocument::Module(id) => ComponentIdentity::Module(ModuleId::new(id)),
            };
            (identity, node.children)
        })
        .collect();
    ResolutionGraph::from_parts(nodes, document.root)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "root_module": ":app",
        "modules": [
            {
                "id": ":app",
                "scopes": [
                    {
                        "name": "releaseRuntimeClasspath",
                        "module_dependencies": [":core"],
                        "artifacts": {
                            "com.squareup.okio:okio:3.6.0": "/cache/okio-3.6.0.jar"
                        },
                        "graph": {
                            "root": 0,
                            "nodes": [
                                { "module": ":app", "children": [1, 2] },
                                { "library": { "group": "com.squareup.okio", "name": "okio", "version": "3.6.0" } },
                                { "module": ":core", "children": [1] }
                            ]
                        }
                    },
                    { "name": "debugRuntimeClasspath", "error": "Could not resolve all files" },
                    { "name": "compileOnly", "resolvable": false }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(SNAPSHOT).unwrap();
        assert_eq!(snapshot.root_module(), Some(&ModuleId::new(":app")));
        assert_eq!(snapshot.module_count(), 1);

        let app = snapshot.module(&ModuleId::new(":app")).unwrap();
        let scopes = app.scopes();
        assert_eq!(scopes.len(), 3);

        let release = &scopes[0];
        assert_eq!(release.module_dependencies(), &[ModuleId::new(":core")]);
        assert_eq!(release.artifacts().len(), 1);
        match release.resolution() {
            ScopeResolution::Resolved(graph) => {
                assert_eq!(graph.len(), 3);
                assert_eq!(graph.node(0).unwrap().children(), &[1, 2]);
                assert!(matches!(
                    graph.node(1).unwrap().identity(),
                    ComponentIdentity::Library(c) if c.name == "okio"
                ));
            }
            other => panic!("unexpected resolution: {:?}", other),
        }

        assert_eq!(
            scopes[1].resolution(),
            &ScopeResolution::Failed("Could not resolve all files".to_string())
        );
        assert!(!scopes[2].is_resolvable());
    }

    #[test]
    fn test_parse_snapshot_invalid_json() {
        assert!(parse_snapshot("{ not json").is_err());
    }

    #[test]
    fn test_parse_snapshot_invalid_artifact_key() {
        let content = r#"{
            "modules": [{
                "id": ":app",
                "scopes": [{ "name": "runtime", "artifacts": { "not-an-id": "/x.jar" }, "graph": { "nodes": [] } }]
            }]
        }"#;
        let err = parse_snapshot(content).unwrap_err();
        assert!(err.to_string().contains("Invalid artifact key"));
    }

    #[test]
    fn test_dangling_index_is_not_a_load_error() {
        let content = r#"{
            "modules": [{
                "id": ":app",
                "scopes": [{ "name": "runtime", "graph": { "nodes": [ { "module": ":app", "children": [7] } ] } }]
            }]
        }"#;
        assert!(parse_snapshot(content).is_ok());
    }
}
