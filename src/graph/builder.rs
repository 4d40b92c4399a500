//! Graph construction module

use crate::error::{NetError, Result};
use crate::graph::Network;

/// Builder for incrementally constructing a Network from string-labelled edges
pub struct GraphBuilder {
    /// Network under construction
    network: Network,

    /// Self-loops dropped while building
    self_loops: usize,

    /// Repeated edges dropped while building
    duplicates: usize,
}

impl GraphBuilder {
    /// Create a new builder for a directed or undirected network
    pub fn new(directed: bool) -> Self {
        let network = if directed {
            Network::directed()
        } else {
            Network::undirected()
        };
        Self {
            network,
            self_loops: 0,
            duplicates: 0,
        }
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        self.network.add_node(id)
    }

    /// Add an edge from one node to another
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) -> Result<()> {
        self.insert(src_id, dst_id, None)
    }

    /// Add a weighted edge from one node to another
    pub fn add_weighted_edge(&mut self, src_id: &str, dst_id: &str, weight: f64) -> Result<()> {
        self.insert(src_id, dst_id, Some(weight))
    }

    fn insert(&mut self, src_id: &str, dst_id: &str, weight: Option<f64>) -> Result<()> {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        if src_idx == dst_idx {
            self.self_loops += 1;
            return Ok(());
        }

        let inserted = match weight {
            Some(w) => self.network.add_weighted_edge(src_idx, dst_idx, w)?,
            None => self.network.add_edge(src_idx, dst_idx)?,
        };
        if !inserted {
            self.duplicates += 1;
        }
        Ok(())
    }

    /// Finish building; a network without nodes is rejected
    pub fn build(self) -> Result<Network> {
        if self.network.node_count() == 0 {
            return Err(NetError::EmptyGraph);
        }

        if self.self_loops > 0 || self.duplicates > 0 {
            log::warn!(
                "Dropped {} self-loops and {} duplicate edges",
                self.self_loops,
                self.duplicates
            );
        }

        log::debug!(
            "Built network with {} nodes and {} edges",
            self.network.node_count(),
            self.network.edge_count()
        );

        Ok(self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_labels() {
        let mut builder = GraphBuilder::new(false);
        builder.add_edge("a", "b").unwrap();
        builder.add_edge("b", "c").unwrap();
        builder.add_edge("c", "c").unwrap();
        builder.add_edge("b", "a").unwrap();

        let network = builder.build().unwrap();
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 2);
    }

    #[test]
    fn keeps_weights() {
        let mut builder = GraphBuilder::new(false);
        builder.add_weighted_edge("x", "y", 4.0).unwrap();
        let network = builder.build().unwrap();
        let (x, y) = (network.node_id("x").unwrap(), network.node_id("y").unwrap());
        assert_eq!(network.weight(y, x), Some(4.0));
    }

    #[test]
    fn empty_build_fails() {
        assert!(matches!(
            GraphBuilder::new(true).build(),
            Err(NetError::EmptyGraph)
        ));
    }
}
