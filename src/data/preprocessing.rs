//! Data preprocessing module for graph analysis

use std::collections::HashMap;

use crate::graph::Network;
use crate::percolation::components::giant_component;

/// Extract the subgraph induced by `members`.
///
/// Nodes are renumbered in the order given; labels, direction and weights are
/// carried over.
pub fn induced_subgraph(network: &Network, members: &[u32]) -> Network {
    let mut subgraph = if network.is_directed() {
        Network::directed()
    } else {
        Network::undirected()
    };

    // network index -> subgraph index
    let mut orig_to_sub: HashMap<u32, u32> = HashMap::with_capacity(members.len());
    for &node in members {
        let idx = subgraph.add_node(network.label(node));
        orig_to_sub.insert(node, idx);
    }

    for &node in members {
        let src = orig_to_sub[&node];
        for target in network.neighbors(node) {
            // Only include edges where both endpoints are in the subgraph
            if let Some(&dst) = orig_to_sub.get(&target) {
                // Indices come from the subgraph itself; duplicates of an
                // undirected edge are ignored by the network.
                let _ = match network.weight(node, target) {
                    Some(w) => subgraph.add_weighted_edge(src, dst, w),
                    None => subgraph.add_edge(src, dst),
                };
            }
        }
    }

    subgraph
}

/// The largest connected component as a standalone network
pub fn giant_component_subgraph(network: &Network) -> Network {
    induced_subgraph(network, &giant_component(network))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_internal_edges_only() {
        let mut network = Network::with_nodes(5, false);
        network.add_weighted_edge(0, 1, 2.0).unwrap();
        network.add_weighted_edge(1, 2, 3.0).unwrap();
        network.add_edge(3, 4).unwrap();

        let sub = induced_subgraph(&network, &[1, 2]);
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(sub.label(0), "1");
        assert_eq!(sub.weight(0, 1), Some(3.0));
    }

    #[test]
    fn giant_subgraph() {
        let mut network = Network::with_nodes(5, false);
        network.add_edge(0, 1).unwrap();
        network.add_edge(1, 2).unwrap();
        network.add_edge(3, 4).unwrap();

        let giant = giant_component_subgraph(&network);
        assert_eq!(giant.node_count(), 3);
        assert_eq!(giant.edge_count(), 2);
    }
}
