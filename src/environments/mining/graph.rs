//! Coordination graph between villages and mines.

use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::factored::PartialKeys;

/// A node of the village–mine coordination graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinationNode {
    Village(usize),
    Mine(usize),
}

impl fmt::Display for CoordinationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinationNode::Village(i) => write!(f, "village {}", i),
            CoordinationNode::Mine(i) => write!(f, "mine {}", i),
        }
    }
}

/// Builds the bipartite coordination graph.
///
/// Nodes `0..villages` are villages, followed by one node per mine. There
/// is an edge for every village that can send workers to a mine.
pub(crate) fn coordination_graph(
    villages: usize,
    groups: &[PartialKeys],
) -> UnGraph<CoordinationNode, ()> {
    let mut graph = UnGraph::with_capacity(
        villages + groups.len(),
        groups.iter().map(Vec::len).sum(),
    );
    let village_nodes: Vec<NodeIndex> = (0..villages)
        .map(|v| graph.add_node(CoordinationNode::Village(v)))
        .collect();
    for (mine, group) in groups.iter().enumerate() {
        let mine_node = graph.add_node(CoordinationNode::Mine(mine));
        for &village in group {
            graph.add_edge(village_nodes[village], mine_node, ());
        }
    }
    graph
}
