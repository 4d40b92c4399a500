//! Erdos-Renyi random graphs and ensemble estimates

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{NetError, Result};
use crate::graph::algorithms::{clustering_and_average_clustering, diameter};
use crate::graph::Network;
use crate::percolation::components::giant_component;
use crate::data::preprocessing::induced_subgraph;

/// G(n, p): every one of the n(n-1)/2 pairs is linked independently with
/// probability `p`.
///
/// Pairs are visited with geometric skips, so the cost is proportional to the
/// number of edges drawn rather than to n^2.
pub fn gnp<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Result<Network> {
    if !(0.0..=1.0).contains(&p) {
        return Err(NetError::InvalidParameter(format!(
            "edge probability must be in [0, 1], got {}",
            p
        )));
    }

    let mut network = Network::with_nodes(n, false);
    if p == 0.0 || n < 2 {
        return Ok(network);
    }
    if p == 1.0 {
        for u in 0..n as u32 {
            for v in (u + 1)..n as u32 {
                network.add_edge(u, v)?;
            }
        }
        return Ok(network);
    }

    // ln(1 - p) stays nonzero for p below f64 epsilon
    let log_q = (-p).ln_1p();
    // no skip this long can land on a remaining pair
    let max_skip = (n as f64) * (n as f64);
    let mut v: usize = 1;
    let mut w: i64 = -1;
    while v < n {
        let log_r = (1.0 - rng.gen::<f64>()).ln();
        let skip = (log_r / log_q).floor();
        if skip >= max_skip {
            break;
        }
        w += 1 + skip as i64;
        while w >= v as i64 && v < n {
            w -= v as i64;
            v += 1;
        }
        if v < n {
            network.add_edge(v as u32, w as u32)?;
        }
    }
    Ok(network)
}

/// Edge probability giving an expected average degree of `avg_degree`
pub fn edge_probability(net_size: usize, avg_degree: f64) -> Result<f64> {
    if net_size == 0 {
        return Err(NetError::EmptyGraph);
    }
    let p = avg_degree / net_size as f64;
    if !(0.0..=1.0).contains(&p) {
        return Err(NetError::InvalidParameter(format!(
            "average degree {} is out of range for {} nodes",
            avg_degree, net_size
        )));
    }
    Ok(p)
}

/// ER network with the expected average degree `avg_degree`, p = avg_degree / n
pub fn er_network<R: Rng + ?Sized>(net_size: usize, avg_degree: f64, rng: &mut R) -> Result<Network> {
    let p = edge_probability(net_size, avg_degree)?;
    gnp(net_size, p, rng)
}

/// Seed for realization `index` of an ensemble seeded with `seed`
pub fn realization_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Ensemble means of the basic ER properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErProperties {
    /// Average clustering coefficient (zeros counted)
    pub clustering: f64,
    /// Average degree
    pub degree: f64,
    /// Diameter of the giant component
    pub diameter: f64,
}

/// Average clustering, average degree and giant-component diameter over
/// `realizations` independent G(n, p) draws.
pub fn er_properties(n: usize, p: f64, realizations: usize, seed: u64) -> Result<ErProperties> {
    if realizations == 0 {
        return Err(NetError::EmptyInput("realizations"));
    }
    if n == 0 {
        return Err(NetError::EmptyGraph);
    }

    let samples: Vec<ErProperties> = (0..realizations)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(realization_seed(seed, i));
            let network = gnp(n, p, &mut rng)?;
            let (_, clustering) = clustering_and_average_clustering(&network);
            let degree = 2.0 * network.edge_count() as f64 / n as f64;
            let giant = induced_subgraph(&network, &giant_component(&network));
            let diameter = diameter(&giant)? as f64;
            Ok(ErProperties {
                clustering,
                degree,
                diameter,
            })
        })
        .collect::<Result<_>>()?;

    let count = samples.len() as f64;
    Ok(ErProperties {
        clustering: samples.iter().map(|s| s.clustering).sum::<f64>() / count,
        degree: samples.iter().map(|s| s.degree).sum::<f64>() / count,
        diameter: samples.iter().map(|s| s.diameter).sum::<f64>() / count,
    })
}

/// Closed-form expectations for a three-node ER network
pub fn er_properties_theoretical(p: f64) -> ErProperties {
    ErProperties {
        clustering: p.powi(3),
        degree: 2.0 * p,
        diameter: 3.0 * p - 2.0 * p.powi(3),
    }
}
