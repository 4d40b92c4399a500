//! Graph algorithms for analysis

use std::collections::BTreeSet;

use itertools::Itertools;
use petgraph::algo::{dijkstra, min_spanning_tree};
use petgraph::data::Element;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::error::{NetError, Result};
use crate::graph::Network;
use crate::percolation::components::connected_components;

/// Edge density: 2m / n(n-1) for undirected, m / n(n-1) for directed graphs
pub fn density(network: &Network) -> f64 {
    let n = network.node_count() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let m = network.edge_count() as f64;
    let pairs = n * (n - 1.0);
    if network.is_directed() {
        m / pairs
    } else {
        2.0 * m / pairs
    }
}

/// Degrees of all nodes, in node order
pub fn degrees(network: &Network) -> Vec<usize> {
    network.nodes().map(|node| network.degree(node)).collect()
}

fn undirected_neighbors(network: &Network, node: u32) -> BTreeSet<u32> {
    network
        .neighbors(node)
        .chain(network.in_neighbors(node))
        .collect()
}

fn adjacent(network: &Network, u: u32, v: u32) -> bool {
    network.has_edge(u, v) || network.has_edge(v, u)
}

/// Local clustering coefficient of every node; nodes with degree below 2 get 0.
/// Directed graphs are treated as undirected.
pub fn local_clustering(network: &Network) -> Vec<f64> {
    network
        .nodes()
        .map(|node| {
            let neighbors: Vec<u32> = undirected_neighbors(network, node).into_iter().collect();
            let k = neighbors.len();
            if k < 2 {
                return 0.0;
            }
            let triangles = neighbors
                .iter()
                .tuple_combinations()
                .filter(|(a, b)| adjacent(network, **a, **b))
                .count();
            2.0 * triangles as f64 / (k * (k - 1)) as f64
        })
        .collect()
}

/// Local clustering coefficients together with their average (zeros counted)
pub fn clustering_and_average_clustering(network: &Network) -> (Vec<f64>, f64) {
    let coefficients = local_clustering(network);
    let average = if coefficients.is_empty() {
        0.0
    } else {
        coefficients.iter().sum::<f64>() / coefficients.len() as f64
    };
    (coefficients, average)
}

/// Hop distances from `source` to every reachable node
fn hop_distances(graph: &UnGraph<u32, f64>, source: usize) -> Vec<usize> {
    dijkstra(graph, NodeIndex::new(source), None, |_| 1usize)
        .into_values()
        .collect()
}

fn ensure_connected(network: &Network) -> Result<()> {
    if network.node_count() == 0 {
        return Err(NetError::EmptyGraph);
    }
    if connected_components(network).len() > 1 {
        return Err(NetError::InvalidParameter(
            "graph is not connected".to_string(),
        ));
    }
    Ok(())
}

/// Average shortest path length over all ordered node pairs of a connected graph
pub fn average_shortest_path_length(network: &Network) -> Result<f64> {
    ensure_connected(network)?;
    let n = network.node_count();
    if n == 1 {
        return Ok(0.0);
    }

    let graph = network.to_petgraph();
    let total: usize = (0..n)
        .map(|source| hop_distances(&graph, source).iter().sum::<usize>())
        .sum();
    Ok(total as f64 / (n * (n - 1)) as f64)
}

/// Largest eccentricity of a connected graph
pub fn diameter(network: &Network) -> Result<usize> {
    ensure_connected(network)?;
    let graph = network.to_petgraph();
    Ok((0..network.node_count())
        .filter_map(|source| hop_distances(&graph, source).into_iter().max())
        .max()
        .unwrap_or(0))
}

/// A weighted edge `(u, v, weight)`
pub type WeightedEdge = (u32, u32, f64);

fn spanning_edges(graph: &UnGraph<u32, f64>, sign: f64) -> Vec<WeightedEdge> {
    let signed = graph.map(|_, &node| node, |_, &w| sign * w);
    min_spanning_tree(&signed)
        .filter_map(|element| match element {
            Element::Edge {
                source,
                target,
                weight,
            } => Some((source as u32, target as u32, sign * weight)),
            Element::Node { .. } => None,
        })
        .collect()
}

/// Minimum spanning forest edges
pub fn minimum_spanning_edges(network: &Network) -> Vec<WeightedEdge> {
    spanning_edges(&network.to_petgraph(), 1.0)
}

/// Maximum spanning forest edges
pub fn maximum_spanning_edges(network: &Network) -> Vec<WeightedEdge> {
    spanning_edges(&network.to_petgraph(), -1.0)
}

/// The `k` heaviest edges, heaviest first
pub fn heaviest_edges(network: &Network, k: usize) -> Vec<WeightedEdge> {
    network
        .edges()
        .into_iter()
        .map(|(u, v)| (u, v, network.weight(u, v).unwrap_or(1.0)))
        .sorted_by(|a, b| b.2.total_cmp(&a.2))
        .take(k)
        .collect()
}

/// Number of maximum spanning tree edges that are also among the
/// |tree| heaviest edges of the network
pub fn spanning_tree_overlap(network: &Network) -> usize {
    let tree = maximum_spanning_edges(network);
    let normalize = |&(u, v, _): &WeightedEdge| (u.min(v), u.max(v));
    let heaviest: BTreeSet<(u32, u32)> = heaviest_edges(network, tree.len())
        .iter()
        .map(normalize)
        .collect();
    tree.iter()
        .map(normalize)
        .filter(|edge| heaviest.contains(edge))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Network {
        let mut network = Network::with_nodes(n, false);
        for i in 1..n as u32 {
            network.add_edge(i - 1, i).unwrap();
        }
        network
    }

    #[test]
    fn triangle_has_full_density_and_clustering() {
        let mut network = path(3);
        network.add_edge(0, 2).unwrap();
        assert_eq!(density(&network), 1.0);
        let (local, average) = clustering_and_average_clustering(&network);
        assert_eq!(local, vec![1.0, 1.0, 1.0]);
        assert_eq!(average, 1.0);
    }

    #[test]
    fn path_clustering_is_zero() {
        let (_, average) = clustering_and_average_clustering(&path(4));
        assert_eq!(average, 0.0);
    }

    #[test]
    fn directed_density_counts_ordered_pairs() {
        let mut network = Network::with_nodes(2, true);
        network.add_edge(0, 1).unwrap();
        assert_eq!(density(&network), 0.5);
    }

    #[test]
    fn path_lengths() {
        let network = path(4);
        // distances: 1,2,3,1,2,1 counted twice over 12 ordered pairs
        assert!((average_shortest_path_length(&network).unwrap() - 20.0 / 12.0).abs() < 1e-12);
        assert_eq!(diameter(&network).unwrap(), 3);
    }

    #[test]
    fn disconnected_path_length_is_an_error() {
        let network = Network::with_nodes(2, false);
        assert!(average_shortest_path_length(&network).is_err());
    }

    #[test]
    fn spanning_trees_pick_extreme_weights() {
        let mut network = Network::with_nodes(3, false);
        network.add_weighted_edge(0, 1, 1.0).unwrap();
        network.add_weighted_edge(1, 2, 2.0).unwrap();
        network.add_weighted_edge(0, 2, 3.0).unwrap();

        let min_total: f64 = minimum_spanning_edges(&network).iter().map(|e| e.2).sum();
        let max_total: f64 = maximum_spanning_edges(&network).iter().map(|e| e.2).sum();
        assert_eq!(min_total, 3.0);
        assert_eq!(max_total, 5.0);
        assert_eq!(spanning_tree_overlap(&network), 2);
    }
}
