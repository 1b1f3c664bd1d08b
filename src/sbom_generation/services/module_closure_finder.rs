use super::ScopeFilter;
use crate::sbom_generation::domain::{ModuleId, ProjectSnapshot};
use std::collections::{HashSet, VecDeque};

/// Build modules reachable from a root, in breadth-first discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSet {
    order: Vec<ModuleId>,
}

impl ModuleSet {
    pub fn iter(&self) -> impl Iterator<Item = &ModuleId> {
        self.order.iter()
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.order.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Result of a closure search
#[derive(Debug, Clone, Default)]
pub struct ModuleClosure {
    pub modules: ModuleSet,
    /// Declared targets that the snapshot does not describe
    pub missing: Vec<ModuleId>,
}

/// ModuleClosureFinder - Discovers the transitive set of build modules
///
/// Follows inter-module declarations found in every eligible scope of each
/// discovered module. Library dependencies are not looked at here.
pub struct ModuleClosureFinder;

impl ModuleClosureFinder {
    pub fn find(snapshot: &ProjectSnapshot, root: &ModuleId, filter: &ScopeFilter) -> ModuleClosure {
        let mut closure = ModuleClosure::default();
        let mut seen: HashSet<ModuleId> = HashSet::new();
        let mut queue: VecDeque<ModuleId> = VecDeque::new();

        seen.insert(root.clone());
        queue.push_back(root.clone());

        while let Some(current) = queue.pop_front() {
            let Some(module) = snapshot.module(&current) else {
                closure.missing.push(current);
                continue;
            };
            closure.modules.order.push(current);

            for scope in filter.select(module) {
                for target in scope.module_dependencies() {
                    if seen.insert(target.clone()) {
                        queue.push_back(target.clone());
                    }
                }
            }
        }

        closure
    }
}
