//! Level assignment - longest prerequisite chain depth
//!
//! Levels only order and group topics for presentation; the recommendation
//! tiers never read them.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::Result;

use super::CurriculumGraph;

/// Assign a level to every node: 0 for topics with no prerequisites,
/// otherwise `1 + max(level of each prerequisite)`.
///
/// Processing follows the canonical topological order, so every
/// prerequisite's level is known by the time its dependents are reached.
/// Levels are written back onto the node attributes and returned as a map.
/// An empty graph yields an empty map; a cyclic graph yields `CyclicGraph`
/// with the offending cycles enumerated.
pub fn assign_levels(graph: &mut CurriculumGraph) -> Result<FxHashMap<Arc<str>, u32>> {
    if graph.is_empty() {
        return Ok(FxHashMap::default());
    }
    graph.ensure_acyclic()?;

    // Acyclic per the gate above, so the order is always present
    let order = graph.topo_order().unwrap_or_default();
    let mut levels: FxHashMap<Arc<str>, u32> =
        FxHashMap::with_capacity_and_hasher(order.len(), Default::default());

    for node in &order {
        let level = graph
            .predecessors(node)
            .iter()
            .filter_map(|p| levels.get(p.as_ref()).copied())
            .max()
            .map_or(0, |deepest| deepest + 1);
        levels.insert(Arc::clone(node), level);
    }

    for (key, level) in &levels {
        graph.set_level(key, *level);
    }

    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::TopicRecord;

    fn record(key: &str, prereqs: &[&str]) -> TopicRecord {
        TopicRecord::new(key).with_prerequisites(prereqs.iter().copied())
    }

    #[test]
    fn diamond_levels() {
        let mut graph = CurriculumGraph::build([
            record("a", &[]),
            record("b", &["a"]),
            record("c", &["a"]),
            record("d", &["b", "c"]),
        ]);
        let levels = assign_levels(&mut graph).unwrap();
        assert_eq!(levels["a"], 0);
        assert_eq!(levels["b"], 1);
        assert_eq!(levels["c"], 1);
        assert_eq!(levels["d"], 2);
    }

    #[test]
    fn level_follows_longest_chain() {
        // d is reachable in one hop from a but sits below the a→b→c chain
        let mut graph = CurriculumGraph::build([
            record("a", &[]),
            record("b", &["a"]),
            record("c", &["b"]),
            record("d", &["a", "c"]),
        ]);
        let levels = assign_levels(&mut graph).unwrap();
        assert_eq!(levels["d"], 3);
    }

    #[test]
    fn levels_written_back_to_nodes() {
        let mut graph = CurriculumGraph::build([record("a", &[]), record("b", &["a"])]);
        assert_eq!(graph.node("b").unwrap().level, None);
        assign_levels(&mut graph).unwrap();
        assert_eq!(graph.node("a").unwrap().level, Some(0));
        assert_eq!(graph.node("b").unwrap().level, Some(1));
    }

    #[test]
    fn edge_invariant_holds() {
        let mut graph = CurriculumGraph::build([
            record("a", &[]),
            record("b", &["a"]),
            record("c", &["a", "b"]),
            record("d", &["c"]),
            record("e", &["a", "d"]),
        ]);
        let levels = assign_levels(&mut graph).unwrap();
        for node in graph.node_ids() {
            for dependent in graph.successors(node) {
                assert!(levels[dependent.as_ref()] > levels[node.as_ref()]);
            }
        }
    }

    #[test]
    fn roots_are_level_zero() {
        let mut graph =
            CurriculumGraph::build([record("a", &[]), record("b", &[]), record("c", &["a"])]);
        let levels = assign_levels(&mut graph).unwrap();
        assert_eq!(levels["a"], 0);
        assert_eq!(levels["b"], 0);
    }

    #[test]
    fn empty_graph_yields_empty_map() {
        let mut graph = CurriculumGraph::build([]);
        let levels = assign_levels(&mut graph).unwrap();
        assert!(levels.is_empty());
    }

    #[test]
    fn cyclic_graph_errors_instead_of_hanging() {
        let mut graph = CurriculumGraph::build([record("a", &["b"]), record("b", &["a"])]);
        let err = assign_levels(&mut graph).unwrap_err();
        assert_eq!(err.code(), "CORA-020");
    }
}
