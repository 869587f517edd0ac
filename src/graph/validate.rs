//! DAG validation - elementary cycle enumeration
//!
//! Recommendation and leveling both loop forever (or recurse without bound)
//! on a cyclic graph, so the acyclicity gate runs before either. Validation
//! enumerates every elementary cycle rather than stopping at the first, so
//! content authors see the full list of misconfigured topics in one pass.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{CoraError, Result};

use super::CurriculumGraph;

impl CurriculumGraph {
    /// Enumerate all elementary cycles, each in traversal order.
    ///
    /// DFS rooted at each node in insertion order, restricted to nodes with
    /// an equal-or-higher insertion index: every cycle is discovered exactly
    /// once, rooted at its lowest-index member. Exponential in the worst
    /// case, fine at curriculum scale (tens to low hundreds of topics).
    pub fn find_cycles(&self) -> Vec<Vec<Arc<str>>> {
        let index: FxHashMap<&str, usize> = self
            .node_ids()
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_ref(), i))
            .collect();

        let mut cycles = Vec::new();
        for (root_idx, root) in self.node_ids().iter().enumerate() {
            let mut path = vec![Arc::clone(root)];
            let mut on_path: FxHashSet<Arc<str>> = FxHashSet::default();
            on_path.insert(Arc::clone(root));
            self.cycle_dfs(root_idx, root, &index, &mut path, &mut on_path, &mut cycles);
        }
        cycles
    }

    fn cycle_dfs(
        &self,
        root_idx: usize,
        node: &Arc<str>,
        index: &FxHashMap<&str, usize>,
        path: &mut Vec<Arc<str>>,
        on_path: &mut FxHashSet<Arc<str>>,
        out: &mut Vec<Vec<Arc<str>>>,
    ) {
        for next in self.successors(node) {
            let Some(&next_idx) = index.get(next.as_ref()) else {
                continue;
            };
            if next_idx == root_idx {
                // Closed back to the root: the current path is one cycle
                out.push(path.clone());
            } else if next_idx > root_idx && !on_path.contains(next.as_ref()) {
                path.push(Arc::clone(next));
                on_path.insert(Arc::clone(next));
                self.cycle_dfs(root_idx, next, index, path, on_path, out);
                on_path.remove(next.as_ref());
                path.pop();
            }
        }
    }

    /// Gate for the algorithms that require a DAG.
    ///
    /// `Ok(())` on an acyclic graph; otherwise `CyclicGraph` carrying every
    /// elementary cycle. Fatal for the request - the curriculum has to be
    /// fixed at the authoring layer.
    pub fn ensure_acyclic(&self) -> Result<()> {
        let cycles = self.find_cycles();
        if cycles.is_empty() {
            return Ok(());
        }
        Err(CoraError::CyclicGraph {
            cycles: cycles
                .into_iter()
                .map(|cycle| cycle.into_iter().map(|key| key.to_string()).collect())
                .collect(),
        })
    }
}
