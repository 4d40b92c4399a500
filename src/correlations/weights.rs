//! Weight-topology correlations: link weights, strengths and overlaps

use std::collections::HashSet;

use crate::graph::Network;

/// Weight of every edge in `Network::edges` order; unweighted edges count 1
pub fn link_weights(network: &Network) -> Vec<f64> {
    network
        .edges()
        .into_iter()
        .map(|(u, v)| network.weight(u, v).unwrap_or(1.0))
        .collect()
}

/// Sum of incident edge weights of every node
pub fn strengths(network: &Network) -> Vec<f64> {
    network.nodes().map(|node| network.strength(node)).collect()
}

/// Strength over degree per node, 0 for isolated nodes
pub fn average_link_weight(network: &Network) -> Vec<f64> {
    network
        .nodes()
        .map(|node| match network.degree(node) {
            0 => 0.0,
            k => network.strength(node) / k as f64,
        })
        .collect()
}

/// Neighbourhood overlap `n_ij / (k_i + k_j - 2 - n_ij)` of every edge, with
/// `n_ij` the number of common neighbours.
///
/// Edges without common neighbours, or whose endpoints have no other
/// neighbours at all, get 0.
pub fn link_overlaps(network: &Network) -> Vec<f64> {
    network
        .edges()
        .into_iter()
        .map(|(u, v)| {
            let of_u: HashSet<u32> = network.neighbors(u).collect();
            let common = network.neighbors(v).filter(|n| of_u.contains(n)).count();
            let denominator = (network.degree(u) + network.degree(v)) as f64 - 2.0 - common as f64;
            if common == 0 || denominator <= 0.0 {
                0.0
            } else {
                common as f64 / denominator
            }
        })
        .collect()
}
