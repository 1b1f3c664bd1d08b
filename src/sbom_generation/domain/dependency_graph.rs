use super::{DependencyId, DependencyNode};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Mapping from dependency id to its ordered child ids.
///
/// Built only by the graph collector, which guarantees the map is acyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: BTreeMap<DependencyId, Vec<DependencyId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` as a graph key with no children if it is not yet present
    pub(crate) fn ensure_node(&mut self, id: &DependencyId) {
        self.edges.entry(id.clone()).or_default();
    }

    pub(crate) fn add_edge(&mut self, parent: &DependencyId, child: &DependencyId) {
        self.edges
            .entry(parent.clone())
            .or_default()
            .push(child.clone());
    }

    pub fn children(&self, id: &DependencyId) -> Option<&[DependencyId]> {
        self.edges.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &DependencyId) -> bool {
        self.edges.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DependencyId, &[DependencyId])> {
        self.edges.iter().map(|(id, children)| (id, children.as_slice()))
    }

    /// Ids that are never a child of another id
    pub fn roots(&self) -> Vec<&DependencyId> {
        let children: HashSet<&DependencyId> = self.edges.values().flatten().collect();
        self.edges
            .keys()
            .filter(|id| !children.contains(id))
            .collect()
    }

    /// Returns true if some id is reachable from itself.
    ///
    /// Iterative three-color DFS so that deep graphs do not grow the call stack.
    pub fn has_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            InProgress,
            Done,
        }

        let mut marks: BTreeMap<&DependencyId, Mark> = BTreeMap::new();

        for start in self.edges.keys() {
            if marks.contains_key(start) {
                continue;
            }
            let mut stack: Vec<(&DependencyId, usize)> = vec![(start, 0)];
            marks.insert(start, Mark::InProgress);

            while let Some((id, next_child)) = stack.pop() {
                let children = self.edges.get(id).map(Vec::as_slice).unwrap_or(&[]);
                if let Some(child) = children.get(next_child) {
                    stack.push((id, next_child + 1));
                    match marks.get(child) {
                        Some(Mark::InProgress) => return true,
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(child, Mark::InProgress);
                            stack.push((child, 0));
                        }
                    }
                } else {
                    marks.insert(id, Mark::Done);
                }
            }
        }

        false
    }
}

/// Output of one collection run: every distinct library plus the DAG over them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DependencyCollectionResult {
    dependencies: Vec<DependencyNode>,
    graph: DependencyGraph,
}

impl DependencyCollectionResult {
    pub(crate) fn new(dependencies: Vec<DependencyNode>, graph: DependencyGraph) -> Self {
        Self {
            dependencies,
            graph,
        }
    }

    /// Dependencies in discovery order; ids are unique
    pub fn dependencies(&self) -> &[DependencyNode] {
        &self.dependencies
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn get(&self, id: &DependencyId) -> Option<&DependencyNode> {
        self.dependencies.iter().find(|node| node.id() == id)
    }

    /// Adds a root dependency with no parent edge; ignored if the id is already known
    pub fn add_root(&mut self, node: DependencyNode) -> bool {
        if self.graph.contains(node.id()) {
            return false;
        }
        self.graph.ensure_node(node.id());
        self.dependencies.push(node);
        true
    }

    pub fn into_parts(self) -> (Vec<DependencyNode>, DependencyGraph) {
        (self.dependencies, self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> DependencyId {
        DependencyId::new("com.example", name, "1.0").unwrap()
    }

    #[test]
    fn test_dependency_graph_counts() {
        let mut graph = DependencyGraph::new();
        graph.ensure_node(&id("a"));
        graph.ensure_node(&id("b"));
        graph.add_edge(&id("a"), &id("b"));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.children(&id("a")).unwrap(), &[id("b")]);
        assert_eq!(graph.children(&id("b")).unwrap(), &[] as &[DependencyId]);
        assert_eq!(graph.roots(), vec![&id("a")]);
    }

    #[test]
    fn test_has_cycle_detects_loop() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(&id("a"), &id("b"));
        graph.add_edge(&id("b"), &id("c"));
        graph.add_edge(&id("c"), &id("a"));
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_has_cycle_accepts_diamond() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(&id("a"), &id("b"));
        graph.add_edge(&id("a"), &id("c"));
        graph.add_edge(&id("b"), &id("d"));
        graph.add_edge(&id("c"), &id("d"));
        graph.ensure_node(&id("d"));
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_collection_result_add_root_skips_known_id() {
        let mut result = DependencyCollectionResult::default();
        let node = DependencyNode::new("com.example".into(), "a".into(), "1.0".into()).unwrap();

        assert!(result.add_root(node.clone()));
        assert!(!result.add_root(node));
        assert_eq!(result.dependencies().len(), 1);
        assert!(result.graph().contains(&id("a")));
    }
}
