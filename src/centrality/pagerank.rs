//! PageRank by random walk simulation and by power iteration

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::{NetError, Result};
use crate::generators::erdos_renyi::realization_seed;
use crate::graph::CompressedGraph;

fn check_damping(d: f64) -> Result<()> {
    if (0.0..=1.0).contains(&d) {
        Ok(())
    } else {
        Err(NetError::InvalidParameter(format!(
            "damping factor must be in [0, 1], got {}",
            d
        )))
    }
}

/// Estimate PageRank as the fraction of time a random walker spends in each
/// node.
///
/// Each step the walker teleports to a uniformly random node with probability
/// `1 - d` and otherwise follows a uniformly random out-edge. A node without
/// out-edges always teleports.
pub fn random_walk<R: Rng + ?Sized>(
    graph: &CompressedGraph,
    d: f64,
    n_steps: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let n = graph.node_count;
    if n == 0 {
        return Err(NetError::EmptyGraph);
    }
    if n_steps == 0 {
        return Err(NetError::InvalidParameter("n_steps must be positive".to_string()));
    }
    check_damping(d)?;

    let mut visits = vec![0u64; n];
    let mut walker = rng.gen_range(0..n);
    let mut forced_teleports = 0usize;

    for _ in 0..n_steps {
        visits[walker] += 1;
        let neighbors = graph.outgoing_edges(walker);
        if rng.gen::<f64>() > d {
            walker = rng.gen_range(0..n);
        } else if let Some(&next) = neighbors.choose(rng) {
            walker = next as usize;
        } else {
            forced_teleports += 1;
            walker = rng.gen_range(0..n);
        }
    }

    if forced_teleports > 0 {
        log::debug!("{} teleports forced by dangling nodes", forced_teleports);
    }

    Ok(visits
        .into_iter()
        .map(|count| count as f64 / n_steps as f64)
        .collect())
}

/// PageRank by a fixed number of power iteration rounds.
///
/// Scores start at `1/N`; each round sets
/// `x_i = (1 - d)/N + d * sum_j x_j / k_j^out` over in-neighbours `j`, updating
/// nodes in place in index order. Mass sitting on nodes without out-edges is
/// not redistributed, so the scores only sum to 1 when there are none.
pub fn power_iteration(graph: &CompressedGraph, d: f64, iterations: usize) -> Result<Vec<f64>> {
    let n = graph.node_count;
    if n == 0 {
        return Err(NetError::EmptyGraph);
    }
    check_damping(d)?;

    let incoming = graph.transpose();
    let out_degree: Vec<f64> = (0..n).map(|node| graph.out_degree(node) as f64).collect();
    let teleport = (1.0 - d) / n as f64;
    let mut scores = vec![1.0 / n as f64; n];

    for iteration in 0..iterations {
        let previous = scores.clone();
        for i in 0..n {
            let contribution: f64 = incoming
                .outgoing_edges(i)
                .iter()
                .map(|&j| scores[j as usize] / out_degree[j as usize])
                .sum();
            scores[i] = teleport + d * contribution;
        }

        let total: f64 = scores.iter().sum();
        let change: f64 = scores
            .iter()
            .zip(&previous)
            .map(|(new, old)| (new - old).abs())
            .sum();
        log::debug!(
            "iteration {}: PageRank sums to {:.6}, change {:.3e}",
            iteration + 1,
            total,
            change
        );
    }

    Ok(scores)
}

/// Random-walk PageRank for each damping factor in `ds`, one independently
/// seeded walker per value
pub fn damping_sweep(
    graph: &CompressedGraph,
    ds: &[f64],
    n_steps: usize,
    seed: u64,
) -> Result<Vec<Vec<f64>>> {
    ds.par_iter()
        .enumerate()
        .map(|(i, &d)| {
            let mut rng = StdRng::seed_from_u64(realization_seed(seed, i));
            random_walk(graph, d, n_steps, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Network;

    fn directed(n: usize, edges: &[(u32, u32)]) -> CompressedGraph {
        let mut network = Network::with_nodes(n, true);
        for &(u, v) in edges {
            network.add_edge(u, v).unwrap();
        }
        CompressedGraph::from_network(&network)
    }

    #[test]
    fn single_edge_fixed_point() {
        let d = 0.85;
        let graph = directed(2, &[(0, 1)]);
        let scores = power_iteration(&graph, d, 50).unwrap();
        assert!((scores[0] - (1.0 - d) / 2.0).abs() < 1e-12);
        assert!((scores[1] - ((1.0 - d) / 2.0 + d * scores[0])).abs() < 1e-12);
    }

    #[test]
    fn dangling_mass_is_not_redistributed() {
        let graph = directed(2, &[(0, 1)]);
        let scores = power_iteration(&graph, 0.85, 50).unwrap();
        let total: f64 = scores.iter().sum();
        assert!((total - 0.21375).abs() < 1e-12);
    }

    #[test]
    fn scores_sum_to_one_without_dangling_nodes() {
        let graph = directed(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let scores = power_iteration(&graph, 0.85, 200).unwrap();
        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric_cycle_is_uniform() {
        let graph = directed(3, &[(0, 1), (1, 2), (2, 0)]);
        let scores = power_iteration(&graph, 0.85, 10).unwrap();
        for score in scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn random_walk_is_a_distribution() {
        let graph = directed(3, &[(0, 1), (1, 2), (2, 0), (0, 2)]);
        let mut rng = StdRng::seed_from_u64(42);
        let scores = random_walk(&graph, 0.85, 10_000, &mut rng).unwrap();
        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(scores.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn random_walk_agrees_with_power_iteration() {
        let graph = directed(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let mut rng = StdRng::seed_from_u64(1);
        let walk = random_walk(&graph, 0.85, 200_000, &mut rng).unwrap();
        let exact = power_iteration(&graph, 0.85, 200).unwrap();
        for (w, e) in walk.iter().zip(&exact) {
            assert!((w - e).abs() < 0.01, "walk {} vs {}", w, e);
        }
    }

    #[test]
    fn dangling_nodes_force_teleport() {
        let graph = directed(3, &[(0, 1)]);
        let mut rng = StdRng::seed_from_u64(9);
        let scores = random_walk(&graph, 1.0, 1000, &mut rng).unwrap();
        assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_input() {
        let graph = directed(2, &[(0, 1)]);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_walk(&graph, 0.85, 0, &mut rng).is_err());
        assert!(random_walk(&graph, 1.5, 10, &mut rng).is_err());
        assert!(power_iteration(&directed(0, &[]), 0.85, 10).is_err());
    }

    #[test]
    fn sweep_returns_one_vector_per_damping() {
        let graph = directed(3, &[(0, 1), (1, 2), (2, 0)]);
        let sweep = damping_sweep(&graph, &[0.0, 0.5, 1.0], 1000, 3).unwrap();
        assert_eq!(sweep.len(), 3);
        assert!(sweep.iter().all(|scores| scores.len() == 3));
    }
}
