use serde::Serialize;
use std::fmt;

/// Index of a node inside a [`ResolutionGraph`] arena
pub type NodeIndex = usize;

/// Identifier of a build module, e.g. `:shared` or `:feature:login`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCoordinates {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl LibraryCoordinates {
    pub fn new(group: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// What a resolved node stands for: a third-party library or one of the
/// build's own modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentIdentity {
    Library(LibraryCoordinates),
    Module(ModuleId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionNode {
    identity: ComponentIdentity,
    children: Vec<NodeIndex>,
}

impl ResolutionNode {
    pub fn identity(&self) -> &ComponentIdentity {
        &self.identity
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }
}

/// Resolved dependency tree of one scope, as handed over by the host build.
///
/// Nodes live in an arena and refer to their children by index, so the same
/// node may be reachable along several paths and child lists may point back
/// to ancestors. Nothing here guarantees the structure is a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionGraph {
    nodes: Vec<ResolutionNode>,
    root: NodeIndex,
}

impl ResolutionGraph {
    /// Creates a graph whose root (index 0) has the given identity
    pub fn new(root: ComponentIdentity) -> Self {
        Self {
            nodes: vec![ResolutionNode {
                identity: root,
                children: Vec::new(),
            }],
            root: 0,
        }
    }

    /// Builds a graph from raw arena parts. Child indices are not checked.
    pub fn from_parts(nodes: Vec<(ComponentIdentity, Vec<NodeIndex>)>, root: NodeIndex) -> Self {
        Self {
            nodes: nodes
                .into_iter()
                .map(|(identity, children)| ResolutionNode { identity, children })
                .collect(),
            root,
        }
    }

    pub fn add_node(&mut self, identity: ComponentIdentity) -> NodeIndex {
        self.nodes.push(ResolutionNode {
            identity,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    pub fn add_library(&mut self, group: &str, name: &str, version: &str) -> NodeIndex {
        self.add_node(ComponentIdentity::Library(LibraryCoordinates::new(
            group, name, version,
        )))
    }

    pub fn add_module(&mut self, id: &str) -> NodeIndex {
        self.add_node(ComponentIdentity::Module(ModuleId::new(id)))
    }

    /// Appends `child` to `parent`'s children; ignored when `parent` does not exist
    pub fn add_edge(&mut self, parent: NodeIndex, child: NodeIndex) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn node(&self, index: NodeIndex) -> Option<&ResolutionNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
