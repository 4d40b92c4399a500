//! Watts-Strogatz small-world networks

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::data::preprocessing::giant_component_subgraph;
use crate::error::{NetError, Result};
use crate::generators::erdos_renyi::realization_seed;
use crate::graph::algorithms::{average_shortest_path_length, clustering_and_average_clustering};
use crate::graph::Network;

/// A rewired ring together with its rewiring counters
#[derive(Debug, Clone)]
pub struct SmallWorld {
    pub network: Network,
    pub stats: RewiringStats,
}

/// Counters reported by the rewiring pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewiringStats {
    /// Edges in the ring before rewiring
    pub total_edges: usize,
    /// Edges moved to a new endpoint
    pub rewired_edges: usize,
    /// Rewiring attempts abandoned because the endpoint had no free partner
    pub rejected: usize,
}

/// Ring lattice of `n` nodes, each linked to its `m` nearest neighbours on
/// each side. `m = 0` gives an edgeless ring.
pub fn ring(n: usize, m: usize) -> Result<Network> {
    if m > 0 && 2 * m >= n {
        return Err(NetError::InvalidParameter(format!(
            "ring needs 2m < n, got n={} m={}",
            n, m
        )));
    }

    let mut network = Network::with_nodes(n, false);
    for node in 0..n {
        for reach in 1..=m {
            let neighbour = (node + reach) % n;
            network.add_edge(node as u32, neighbour as u32)?;
        }
    }
    Ok(network)
}

/// Build a ring with `ring(n, m)` and rewire every edge with probability `p`.
///
/// A rewired edge `(u, v)` keeps `u` and moves its other end to a node that is
/// neither `u`, `v` nor a current neighbour of `u`. When no such node exists the
/// edge is put back and counted as rejected.
pub fn watts_strogatz<R: Rng + ?Sized>(n: usize, m: usize, p: f64, rng: &mut R) -> Result<SmallWorld> {
    if !(0.0..=1.0).contains(&p) {
        return Err(NetError::InvalidParameter(format!(
            "rewiring probability must be in [0, 1], got {}",
            p
        )));
    }

    let mut network = ring(n, m)?;
    let all_edges = network.edges();
    let mut stats = RewiringStats {
        total_edges: all_edges.len(),
        rewired_edges: 0,
        rejected: 0,
    };

    for (u, v) in all_edges {
        if rng.gen::<f64>() >= p {
            continue;
        }

        network.remove_edge(u, v);
        let candidates: Vec<u32> = network
            .non_neighbors(u)
            .into_iter()
            .filter(|&w| w != v)
            .collect();

        match candidates.choose(rng) {
            Some(&w) => {
                network.add_edge(u, w)?;
                stats.rewired_edges += 1;
            }
            None => {
                network.add_edge(u, v)?;
                stats.rejected += 1;
            }
        }
    }

    if stats.rejected > 0 {
        log::warn!(
            "{} rewiring attempts had no free endpoint and were kept",
            stats.rejected
        );
    }
    log::info!("total number of links: {}", stats.total_edges);
    log::info!("number of rewired links: {}", stats.rewired_edges);

    Ok(SmallWorld { network, stats })
}

/// Clustering and path length of a rewired ring relative to the unrewired one
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmallWorldPoint {
    pub p: f64,
    pub relative_clustering: f64,
    pub relative_path_length: f64,
    pub rewired_edges: usize,
}

/// Rewiring probabilities 0.001, 0.002, 0.004, ..., the last capped at 1
pub fn doubling_probabilities() -> Vec<f64> {
    (0..11)
        .map(|i| (0.001 * f64::from(1u32 << i)).min(1.0))
        .collect()
}

/// Average clustering and giant-component path length of `watts_strogatz(n,
/// m, p)` for every `p`, divided by the values of the plain ring
pub fn small_world_sweep(n: usize, m: usize, ps: &[f64], seed: u64) -> Result<Vec<SmallWorldPoint>> {
    let basic = ring(n, m)?;
    let (_, c_basic) = clustering_and_average_clustering(&basic);
    let l_basic = average_shortest_path_length(&basic)?;
    log::info!("ring n={} m={}: C={:.4} L={:.4}", n, m, c_basic, l_basic);

    ps.par_iter()
        .enumerate()
        .map(|(i, &p)| {
            let mut rng = StdRng::seed_from_u64(realization_seed(seed, i));
            let small_world = watts_strogatz(n, m, p, &mut rng)?;
            let (_, c) = clustering_and_average_clustering(&small_world.network);
            let l = average_shortest_path_length(&giant_component_subgraph(&small_world.network))?;
            log::debug!("p={}: C={:.4} L={:.4}", p, c, l);
            Ok(SmallWorldPoint {
                p,
                relative_clustering: if c_basic > 0.0 { c / c_basic } else { 0.0 },
                relative_path_length: if l_basic > 0.0 { l / l_basic } else { 0.0 },
                rewired_edges: small_world.stats.rewired_edges,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ring_degrees() {
        let network = ring(10, 2).unwrap();
        assert_eq!(network.edge_count(), 20);
        assert!(network.nodes().all(|node| network.degree(node) == 4));
        assert!(network.has_edge(0, 9));
        assert!(network.has_edge(0, 8));
        assert!(!network.has_edge(0, 7));
    }

    #[test]
    fn zero_neighbours_is_edgeless() {
        let mut rng = StdRng::seed_from_u64(1);
        let small_world = watts_strogatz(15, 0, 1.0, &mut rng).unwrap();
        assert_eq!(small_world.network.edge_count(), 0);
        assert_eq!(small_world.stats.total_edges, 0);
        assert_eq!(small_world.stats.rewired_edges, 0);
    }

    #[test]
    fn no_rewiring_keeps_the_ring() {
        let mut rng = StdRng::seed_from_u64(2);
        let small_world = watts_strogatz(50, 3, 0.0, &mut rng).unwrap();
        assert_eq!(small_world.stats.rewired_edges, 0);
        assert_eq!(small_world.network.edges(), ring(50, 3).unwrap().edges());
    }

    #[test]
    fn full_rewiring_moves_every_edge() {
        let mut rng = StdRng::seed_from_u64(3);
        let small_world = watts_strogatz(1000, 5, 1.0, &mut rng).unwrap();
        assert_eq!(small_world.stats.total_edges, 5000);
        assert_eq!(small_world.stats.rewired_edges, 5000);
        assert_eq!(small_world.stats.rejected, 0);
        assert_eq!(small_world.network.edge_count(), 5000);
    }

    #[test]
    fn saturated_ring_rejects_rewiring() {
        // n = 3, m = 1 is a triangle: no endpoint has a free partner
        let mut rng = StdRng::seed_from_u64(4);
        let small_world = watts_strogatz(3, 1, 1.0, &mut rng).unwrap();
        assert_eq!(small_world.stats.rewired_edges, 0);
        assert_eq!(small_world.stats.rejected, 3);
        assert_eq!(small_world.network.edge_count(), 3);
    }

    #[test]
    fn rewiring_never_creates_self_loops() {
        let mut rng = StdRng::seed_from_u64(5);
        let small_world = watts_strogatz(40, 2, 0.5, &mut rng).unwrap();
        let network = &small_world.network;
        assert!(network.nodes().all(|node| !network.has_edge(node, node)));
        assert_eq!(network.edge_count(), 80);
    }

    #[test]
    fn invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(6);
        assert!(ring(4, 2).is_err());
        assert!(watts_strogatz(10, 1, 1.5, &mut rng).is_err());
    }

    #[test]
    fn sweep_is_relative_to_the_ring() {
        let points = small_world_sweep(200, 3, &[0.0, 1.0], 5).unwrap();
        assert_eq!(points[0].relative_clustering, 1.0);
        assert_eq!(points[0].relative_path_length, 1.0);
        assert!(points[1].relative_clustering < 0.5);
        assert!(points[1].relative_path_length < 1.0);
    }

    #[test]
    fn doubling_probabilities_end_at_one() {
        let ps = doubling_probabilities();
        assert_eq!(ps.len(), 11);
        assert_eq!(ps[0], 0.001);
        assert_eq!(ps[10], 1.0);
    }
}
