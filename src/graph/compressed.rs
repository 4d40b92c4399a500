//! Read-only compressed sparse row snapshot of a network

use serde::{Deserialize, Serialize};

use crate::graph::Network;

/// Compressed sparse representation of a graph optimized for traversal.
///
/// Undirected networks store every edge in both directions, so
/// `outgoing_edges` yields all neighbours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's edges begin
    /// offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<u32>,

    /// Edge array: concatenated lists of target nodes
    pub edges: Vec<u32>,

    /// Optional edge weights, parallel to `edges`
    pub weights: Option<Vec<f64>>,

    /// Optional mapping from internal node IDs to file labels
    pub node_ids: Option<Vec<String>>,

    /// Whether the source network was directed
    pub directed: bool,
}

impl CompressedGraph {
    /// Create a new graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count),
            weights: None,
            node_ids: None,
            directed: false,
        }
    }

    /// Snapshot a network's out-adjacency
    pub fn from_network(network: &Network) -> Self {
        let node_count = network.node_count();
        let stored_edges = if network.is_directed() {
            network.edge_count()
        } else {
            2 * network.edge_count()
        };

        let mut graph = Self::with_capacity(node_count, stored_edges);
        let mut weights = network
            .is_weighted()
            .then(|| Vec::with_capacity(stored_edges));

        graph.offsets.push(0);
        let mut offset = 0;
        for node in network.nodes() {
            for target in network.neighbors(node) {
                graph.edges.push(target);
                if let Some(ref mut weights) = weights {
                    weights.push(network.weight(node, target).unwrap_or(1.0));
                }
                offset += 1;
            }
            graph.offsets.push(offset);
        }

        graph.weights = weights;
        graph.node_ids = Some(network.labels().to_vec());
        graph.directed = network.is_directed();
        graph
    }

    /// Get outgoing edges for a node
    pub fn outgoing_edges(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Get the weights of a node's outgoing edges, if the graph is weighted
    pub fn outgoing_weights(&self, node: usize) -> Option<&[f64]> {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        self.weights.as_ref().map(|w| &w[start..end])
    }

    /// Check if there's an edge from src to dst
    pub fn has_edge(&self, src: usize, dst: u32) -> bool {
        let edges = self.outgoing_edges(src);
        edges.binary_search(&dst).is_ok()
    }

    /// Get out-degree of a node
    pub fn out_degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Number of stored (directed) adjacency entries
    pub fn stored_edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build the reverse graph, so that `outgoing_edges` of the result lists
    /// in-neighbours. Adjacency lists stay sorted.
    pub fn transpose(&self) -> Self {
        let mut in_counts = vec![0u32; self.node_count];
        for &dst in &self.edges {
            in_counts[dst as usize] += 1;
        }

        let mut transposed = Self::with_capacity(self.node_count, self.edges.len());
        transposed.offsets.push(0);
        let mut offset = 0;
        for &count in &in_counts {
            offset += count;
            transposed.offsets.push(offset);
        }

        transposed.edges.resize(self.edges.len(), 0);
        let mut weights = self.weights.as_ref().map(|w| vec![0.0; w.len()]);
        let mut current_pos = vec![0usize; self.node_count];

        // Sources are visited in increasing order, which keeps every reversed
        // adjacency list sorted.
        for src in 0..self.node_count {
            let start = self.offsets[src] as usize;
            for (i, &dst) in self.outgoing_edges(src).iter().enumerate() {
                let d = dst as usize;
                let pos = transposed.offsets[d] as usize + current_pos[d];
                transposed.edges[pos] = src as u32;
                if let (Some(out), Some(w)) = (weights.as_mut(), self.weights.as_ref()) {
                    out[pos] = w[start + i];
                }
                current_pos[d] += 1;
            }
        }

        transposed.weights = weights;
        transposed.node_ids = self.node_ids.clone();
        transposed.directed = self.directed;
        transposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Network {
        let mut network = Network::with_nodes(3, true);
        network.add_weighted_edge(0, 1, 1.5).unwrap();
        network.add_weighted_edge(1, 2, 2.5).unwrap();
        network.add_weighted_edge(0, 2, 3.5).unwrap();
        network
    }

    #[test]
    fn snapshot_keeps_adjacency() {
        let graph = CompressedGraph::from_network(&path());
        assert_eq!(graph.outgoing_edges(0), &[1, 2]);
        assert_eq!(graph.outgoing_weights(0), Some(&[1.5, 3.5][..]));
        assert_eq!(graph.out_degree(2), 0);
        assert!(graph.has_edge(1, 2));
        assert!(!graph.has_edge(2, 1));
    }

    #[test]
    fn undirected_snapshot_stores_both_directions() {
        let mut network = Network::with_nodes(2, false);
        network.add_edge(0, 1).unwrap();
        let graph = CompressedGraph::from_network(&network);
        assert_eq!(graph.stored_edge_count(), 2);
        assert!(graph.weights.is_none());
    }

    #[test]
    fn transpose_reverses_edges() {
        let graph = CompressedGraph::from_network(&path()).transpose();
        assert_eq!(graph.outgoing_edges(2), &[0, 1]);
        assert_eq!(graph.outgoing_weights(2), Some(&[3.5, 2.5][..]));
        assert_eq!(graph.outgoing_edges(0), &[] as &[u32]);
    }
}
