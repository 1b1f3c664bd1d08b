use crate::sbom_generation::domain::{
    ComponentIdentity, DependencyCollectionResult, DependencyGraph, DependencyId, DependencyNode,
    NodeIndex, ResolutionGraph, Scope, ScopeResolution,
};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;

/// Default depth at which a frame is dropped instead of expanded.
///
/// The visited set already stops true cycles; this only catches host data
/// that bypasses it (e.g. endless chains of distinct module nodes).
pub const MAX_TRAVERSAL_DEPTH: usize = 1000;

/// Non-fatal anomaly observed while collecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionWarning {
    /// The host failed to resolve the scope; it contributed nothing
    ScopeSkipped { scope: String, reason: String },
    /// A frame went deeper than the configured limit and was dropped
    DepthLimitExceeded {
        scope: String,
        node: String,
        depth: usize,
    },
    /// A child index pointed outside the scope's node arena
    DanglingNode { scope: String, index: NodeIndex },
    /// Library coordinates could not form a valid dependency id
    InvalidCoordinates { scope: String, reason: String },
}

impl fmt::Display for CollectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionWarning::ScopeSkipped { scope, reason } => {
                write!(f, "Scope '{}' could not be resolved and was skipped: {}", scope, reason)
            }
            CollectionWarning::DepthLimitExceeded { scope, node, depth } => write!(
                f,
                "Maximum traversal depth exceeded in scope '{}' at '{}' (depth {}). Subtree dropped.",
                scope, node, depth
            ),
            CollectionWarning::DanglingNode { scope, index } => write!(
                f,
                "Scope '{}' references unknown node #{}; reference ignored",
                scope, index
            ),
            CollectionWarning::InvalidCoordinates { scope, reason } => {
                write!(f, "Invalid library coordinates in scope '{}': {}", scope, reason)
            }
        }
    }
}

/// Result of a collection run together with the anomalies it absorbed
#[derive(Debug, Clone, Default)]
pub struct CollectionOutcome {
    pub result: DependencyCollectionResult,
    pub warnings: Vec<CollectionWarning>,
}

/// One unit of pending work on the explicit traversal stack
#[derive(Debug)]
struct Frame {
    node: NodeIndex,
    parent: Option<DependencyId>,
    depth: usize,
}

/// Flattens the resolution graphs of many scopes into one deduplicated DAG.
///
/// Traversal uses a heap-allocated work-list rather than recursion, so call
/// stack usage does not depend on how deep the host graph is. The visited set
/// is shared by every scope of one run: the first discovery of an id decides
/// both its membership and its single parent edge, and any later discovery
/// (a cycle or a shared subgraph) is dropped without recording an edge. Since
/// every edge points from an earlier-discovered id to a newly discovered one,
/// the output cannot contain a cycle.
///
/// This service is pure: no I/O, no global state.
pub struct GraphCollector {
    max_depth: usize,
}

impl GraphCollector {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_TRAVERSAL_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Collects every library reachable from the given scopes, in scope order.
    pub fn collect(&self, scopes: &[&Scope]) -> CollectionOutcome {
        let artifacts = Self::merge_artifacts(scopes);
        let mut traversal = Traversal::new(&artifacts, self.max_depth);

        for scope in scopes {
            match scope.resolution() {
                ScopeResolution::Resolved(graph) => traversal.walk_scope(scope.name(), graph),
                ScopeResolution::Failed(reason) => {
                    traversal.warnings.push(CollectionWarning::ScopeSkipped {
                        scope: scope.name().to_string(),
                        reason: reason.clone(),
                    })
                }
            }
        }

        traversal.finish()
    }

    /// Merges per-scope artifact tables; the earliest scope wins for a given id
    fn merge_artifacts(scopes: &[&Scope]) -> BTreeMap<DependencyId, PathBuf> {
        let mut merged = BTreeMap::new();
        for scope in scopes {
            for (id, path) in scope.artifacts() {
                merged.entry(id.clone()).or_insert_with(|| path.clone());
            }
        }
        merged
    }
}

impl Default for GraphCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// State owned by a single `collect` invocation
struct Traversal<'a> {
    artifacts: &'a BTreeMap<DependencyId, PathBuf>,
    max_depth: usize,
    visited: HashSet<DependencyId>,
    stack: Vec<Frame>,
    dependencies: Vec<DependencyNode>,
    graph: DependencyGraph,
    warnings: Vec<CollectionWarning>,
}

impl<'a> Traversal<'a> {
    fn new(artifacts: &'a BTreeMap<DependencyId, PathBuf>, max_depth: usize) -> Self {
        Self {
            artifacts,
            max_depth,
            visited: HashSet::new(),
            stack: Vec::new(),
            dependencies: Vec::new(),
            graph: DependencyGraph::new(),
            warnings: Vec::new(),
        }
    }

    /// Drains the work-list for one scope before the next scope starts, so
    /// that discovery order follows scope order.
    fn walk_scope(&mut self, scope: &str, graph: &ResolutionGraph) {
        // (pass-through node, carried parent) pairs already expanded in this scope
        let mut passed_through: HashSet<(NodeIndex, Option<DependencyId>)> = HashSet::new();

        self.stack.push(Frame {
            node: graph.root(),
            parent: None,
            depth: 0,
        });

        while let Some(frame) = self.stack.pop() {
            let Some(node) = graph.node(frame.node) else {
                self.warnings.push(CollectionWarning::DanglingNode {
                    scope: scope.to_string(),
                    index: frame.node,
                });
                continue;
            };

            if frame.depth > self.max_depth {
                self.warnings.push(CollectionWarning::DepthLimitExceeded {
                    scope: scope.to_string(),
                    node: describe(node.identity()),
                    depth: frame.depth,
                });
                continue;
            }

            match node.identity() {
                ComponentIdentity::Module(_) => {
                    // Pass-through: children keep the nearest library ancestor
                    if passed_through.insert((frame.node, frame.parent.clone())) {
                        self.push_children(node.children(), frame.parent, frame.depth + 1);
                    }
                }
                ComponentIdentity::Library(coordinates) => {
                    let dependency = match DependencyNode::new(
                        coordinates.group.clone(),
                        coordinates.name.clone(),
                        coordinates.version.clone(),
                    ) {
                        Ok(dependency) => dependency,
                        Err(e) => {
                            // Not listed, but its children stay reachable like a module's
                            if passed_through.insert((frame.node, frame.parent.clone())) {
                                self.warnings.push(CollectionWarning::InvalidCoordinates {
                                    scope: scope.to_string(),
                                    reason: e.to_string(),
                                });
                                self.push_children(node.children(), frame.parent, frame.depth + 1);
                            }
                            continue;
                        }
                    };

                    let id = dependency.id().clone();
                    if !self.visited.insert(id.clone()) {
                        continue;
                    }

                    self.graph.ensure_node(&id);
                    if let Some(parent) = &frame.parent {
                        self.graph.add_edge(parent, &id);
                    }
                    let artifact = self.artifacts.get(&id).cloned();
                    self.dependencies.push(dependency.with_artifact(artifact));

                    self.push_children(node.children(), Some(id), frame.depth + 1);
                }
            }
        }
    }

    /// Pushes in reverse so children pop in declaration order
    fn push_children(&mut self, children: &[NodeIndex], parent: Option<DependencyId>, depth: usize) {
        for &child in children.iter().rev() {
            self.stack.push(Frame {
                node: child,
                parent: parent.clone(),
                depth,
            });
        }
    }

    fn finish(self) -> CollectionOutcome {
        CollectionOutcome {
            result: DependencyCollectionResult::new(self.dependencies, self.graph),
            warnings: self.warnings,
        }
    }
}

fn describe(identity: &ComponentIdentity) -> String {
    match identity {
        ComponentIdentity::Library(c) => format!("{}:{}:{}", c.group, c.name, c.version),
        ComponentIdentity::Module(id) => id.to_string(),
    }
}
