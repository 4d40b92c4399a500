//! Barabasi-Albert preferential attachment

use std::collections::BTreeSet;

use rand::Rng;

use crate::error::{NetError, Result};
use crate::graph::Network;

/// A grown network and the targets each added node attached to
#[derive(Debug, Clone)]
pub struct PreferentialAttachment {
    pub network: Network,
    /// `attachments[i]` lists the targets of node `seed_size + i`
    pub attachments: Vec<Vec<u32>>,
}

/// Complete graph on `n` nodes
pub fn complete_graph(n: usize) -> Network {
    let mut network = Network::with_nodes(n, false);
    for u in 0..n as u32 {
        for v in (u + 1)..n as u32 {
            // both ends exist and the pair is new
            let _ = network.add_edge(u, v);
        }
    }
    network
}

/// Grow a network from a complete seed of `seed_size` nodes until it has `n`
/// nodes. Each new node links to `m` distinct existing nodes picked with
/// probability proportional to their current degree.
pub fn barabasi_albert<R: Rng + ?Sized>(
    n: usize,
    m: usize,
    seed_size: usize,
    rng: &mut R,
) -> Result<PreferentialAttachment> {
    if seed_size < 2 {
        return Err(NetError::InvalidParameter(format!(
            "seed must have at least 2 nodes, got {}",
            seed_size
        )));
    }
    if m == 0 || m > seed_size {
        return Err(NetError::InvalidParameter(format!(
            "m must be in 1..={}, got {}",
            seed_size, m
        )));
    }
    if n < seed_size {
        return Err(NetError::InvalidParameter(format!(
            "n={} is smaller than the seed size {}",
            n, seed_size
        )));
    }

    let mut network = complete_graph(seed_size);

    // Every node appears once per unit of degree
    let mut node_pool: Vec<u32> = Vec::with_capacity(2 * (seed_size * seed_size + m * n));
    for node in network.nodes() {
        for _ in 0..network.degree(node) {
            node_pool.push(node);
        }
    }

    let mut attachments = Vec::with_capacity(n - seed_size);
    let mut next_node = seed_size;
    while next_node < n {
        let mut targets = BTreeSet::new();
        while targets.len() < m {
            let pick = node_pool[rng.gen_range(0..node_pool.len())];
            targets.insert(pick);
        }

        let new_node = network.add_node(&next_node.to_string());
        for &target in &targets {
            network.add_edge(new_node, target)?;
            node_pool.push(target);
            node_pool.push(new_node);
        }

        attachments.push(targets.into_iter().collect());
        next_node += 1;
    }

    log::debug!(
        "Grew preferential attachment network to {} nodes and {} edges",
        network.node_count(),
        network.edge_count()
    );

    Ok(PreferentialAttachment {
        network,
        attachments,
    })
}

/// Asymptotic degree distribution of the model, 2m(m + 1) / (k(k + 1)(k + 2))
pub fn degree_probability(m: usize, k: f64) -> f64 {
    let m = m as f64;
    2.0 * m * (m + 1.0) / (k * (k + 1.0) * (k + 2.0))
}
