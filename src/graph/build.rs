//! CurriculumGraph - prerequisite DAG built from topic records
//!
//! Uses Arc<str> for zero-cost cloning of topic keys, FxHashMap for
//! non-cryptographic hashing, and SmallVec for stack-allocated edge lists.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::warn;

use crate::curriculum::{TopicRecord, DEFAULT_CLUSTER};

/// Stack-allocated edge lists: most topics have 0-4 prerequisites
pub type EdgeVec = SmallVec<[Arc<str>; 4]>;

/// Display attributes attached to each node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeInfo {
    pub title: String,
    pub description: String,
    pub cluster: String,
    /// Longest-prerequisite-chain depth; set by `assign_levels`
    pub level: Option<u32>,
}

/// Directed graph of topic keys with prerequisite → dependent edges
///
/// Nodes iterate in builder insertion order; that order is the canonical
/// tie-breaker for every deterministic traversal downstream.
pub struct CurriculumGraph {
    /// key -> dependents this topic unlocks
    adjacency: FxHashMap<Arc<str>, EdgeVec>,
    /// key -> direct prerequisites
    predecessors: FxHashMap<Arc<str>, EdgeVec>,
    /// All keys in insertion order (for deterministic iteration)
    node_ids: Vec<Arc<str>>,
    /// Membership lookup, doubling as the per-graph intern table
    node_set: FxHashSet<Arc<str>>,
    /// key -> display attributes
    nodes: FxHashMap<Arc<str>, NodeInfo>,
    /// Keys synthesized for prerequisites with no matching record
    placeholders: Vec<Arc<str>>,
}

impl CurriculumGraph {
    /// Build a graph from topic records.
    ///
    /// Every record becomes a node (re-registering a key updates its
    /// attributes). Every prerequisite `p` of topic `t` with `p != t` adds an
    /// edge `p → t`; a prerequisite naming no known record synthesizes an
    /// empty-title placeholder node, recorded in `placeholders` as a
    /// data-quality signal. Self-loops are dropped. Never fails.
    pub fn build(topics: impl IntoIterator<Item = TopicRecord>) -> Self {
        let topics: Vec<TopicRecord> = topics.into_iter().collect();
        let capacity = topics.len();
        let mut graph = Self {
            adjacency: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            predecessors: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            node_ids: Vec::with_capacity(capacity),
            node_set: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            nodes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            placeholders: Vec::new(),
        };

        // First pass: register every record as a node, in record order
        for topic in &topics {
            let id = graph.intern(&topic.key);
            graph.nodes.insert(
                id,
                NodeInfo {
                    title: topic.title.clone(),
                    description: topic.description.clone(),
                    cluster: topic.cluster.clone(),
                    level: None,
                },
            );
        }

        // Second pass: prerequisite → topic edges
        for topic in &topics {
            let target = graph.intern(&topic.key);
            for prereq in &topic.prerequisites {
                if prereq == &topic.key {
                    // Self-loops are never introduced
                    continue;
                }
                let source = match graph.node_set.get(prereq.as_str()) {
                    Some(existing) => Arc::clone(existing),
                    None => {
                        warn!(key = %prereq, "prerequisite has no topic record; synthesizing placeholder node");
                        let id = graph.intern(prereq);
                        graph.nodes.insert(
                            Arc::clone(&id),
                            NodeInfo {
                                cluster: DEFAULT_CLUSTER.to_string(),
                                ..NodeInfo::default()
                            },
                        );
                        graph.placeholders.push(Arc::clone(&id));
                        id
                    }
                };
                graph.add_edge(source, Arc::clone(&target));
            }
        }

        graph
    }

    /// Intern a key: reuse the existing Arc<str> or register a new node slot
    fn intern(&mut self, key: &str) -> Arc<str> {
        if let Some(existing) = self.node_set.get(key) {
            return Arc::clone(existing);
        }
        let id: Arc<str> = Arc::from(key);
        self.node_set.insert(Arc::clone(&id));
        self.node_ids.push(Arc::clone(&id));
        self.adjacency.insert(Arc::clone(&id), EdgeVec::new());
        self.predecessors.insert(Arc::clone(&id), EdgeVec::new());
        id
    }

    fn add_edge(&mut self, source: Arc<str>, target: Arc<str>) {
        let dependents = self.adjacency.entry(Arc::clone(&source)).or_default();
        if dependents.iter().any(|d| d == &target) {
            // Duplicate prerequisite entries collapse to a single edge
            return;
        }
        dependents.push(Arc::clone(&target));
        self.predecessors.entry(target).or_default().push(source);
    }

    /// All keys in insertion order
    #[inline]
    pub fn node_ids(&self) -> &[Arc<str>] {
        &self.node_ids
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.node_set.contains(key)
    }

    #[inline]
    pub fn node(&self, key: &str) -> Option<&NodeInfo> {
        self.nodes.get(key)
    }

    pub(crate) fn set_level(&mut self, key: &str, level: u32) {
        if let Some(info) = self.nodes.get_mut(key) {
            info.level = Some(level);
        }
    }

    /// Direct prerequisites of a topic
    #[inline]
    pub fn predecessors(&self, key: &str) -> &[Arc<str>] {
        static EMPTY: &[Arc<str>] = &[];
        self.predecessors.get(key).map_or(EMPTY, SmallVec::as_slice)
    }

    /// Topics directly unlocked by a topic
    #[inline]
    pub fn successors(&self, key: &str) -> &[Arc<str>] {
        static EMPTY: &[Arc<str>] = &[];
        self.adjacency.get(key).map_or(EMPTY, SmallVec::as_slice)
    }

    #[inline]
    pub fn in_degree(&self, key: &str) -> usize {
        self.predecessors(key).len()
    }

    #[inline]
    pub fn out_degree(&self, key: &str) -> usize {
        self.successors(key).len()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(SmallVec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Keys synthesized for dangling prerequisite references
    #[inline]
    pub fn placeholders(&self) -> &[Arc<str>] {
        &self.placeholders
    }

    /// Canonical topological order, or `None` if the graph has a cycle.
    ///
    /// Kahn's algorithm; whenever several nodes are ready, the one with the
    /// lowest builder insertion index goes first, so identical inputs always
    /// produce identical orderings.
    pub fn topo_order(&self) -> Option<Vec<Arc<str>>> {
        let index: FxHashMap<&str, usize> = self
            .node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_ref(), i))
            .collect();
        let mut in_degrees: Vec<usize> =
            self.node_ids.iter().map(|id| self.in_degree(id)).collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degrees
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(self.node_ids.len());
        while let Some(Reverse(i)) = ready.pop() {
            let node = &self.node_ids[i];
            for next in self.successors(node) {
                if let Some(&j) = index.get(next.as_ref()) {
                    in_degrees[j] -= 1;
                    if in_degrees[j] == 0 {
                        ready.push(Reverse(j));
                    }
                }
            }
            order.push(Arc::clone(node));
        }

        if order.len() == self.node_ids.len() {
            Some(order)
        } else {
            None // Cycle: some nodes never reached in-degree zero
        }
    }

    /// Check if there's a directed path from `from` to `to` (BFS)
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        if from == to {
            return true;
        }

        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut queue: VecDeque<&str> = VecDeque::new();

        queue.push_back(from);
        visited.insert(from);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.successors(current) {
                if neighbor.as_ref() == to {
                    return true;
                }
                if visited.insert(neighbor.as_ref()) {
                    queue.push_back(neighbor.as_ref());
                }
            }
        }

        false
    }

    /// Shortest directed path from `from` to `to`, endpoints included (BFS).
    ///
    /// Neighbor expansion follows edge insertion order, so the returned path
    /// is deterministic across calls.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<Arc<str>>> {
        let start = Arc::clone(self.node_set.get(from)?);
        if !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(vec![start]);
        }

        let mut parent: FxHashMap<Arc<str>, Arc<str>> = FxHashMap::default();
        let mut visited: FxHashSet<Arc<str>> = FxHashSet::default();
        let mut queue: VecDeque<Arc<str>> = VecDeque::new();

        visited.insert(Arc::clone(&start));
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.successors(&current) {
                if !visited.insert(Arc::clone(neighbor)) {
                    continue;
                }
                parent.insert(Arc::clone(neighbor), Arc::clone(&current));
                if neighbor.as_ref() == to {
                    let mut path = vec![Arc::clone(neighbor)];
                    let mut cursor = Arc::clone(neighbor);
                    while let Some(prev) = parent.get(cursor.as_ref()) {
                        let prev = Arc::clone(prev);
                        path.push(Arc::clone(&prev));
                        cursor = prev;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(Arc::clone(neighbor));
            }
        }

        None
    }
}
